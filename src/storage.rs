// ページ番号とページサイズ
pub mod entity;

// ストレージの抽象 (StorageManager) とエラー
pub mod manager;

// メモリ上の StorageManager 実装
pub mod memory;
