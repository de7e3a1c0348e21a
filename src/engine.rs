// ファイルを使った StorageManager の具体的な実装
pub mod disk;

// 開いているページファイルの一覧
pub mod registry;

// フレーム配列とページテーブル
pub mod frame_table;

// 追い出し方針の具体的な実装
pub mod clocksweep;
pub mod fifo;
pub mod lru;

// BufferPoolManager の具体的な実装
pub mod pool;
