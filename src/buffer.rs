// フレーム、ハンドル、統計のデータ型
pub mod entity;

// バッファプールの抽象 (BufferPoolManager) とエラー
pub mod manager;

// 追い出し方針の抽象
pub mod replacer;
