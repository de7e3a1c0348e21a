pub mod buffer;
pub mod config;
pub mod engine;
pub mod storage;
