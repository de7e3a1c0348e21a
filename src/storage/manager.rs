use super::entity::{Page, PageId};

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("page file {} not found", .path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("page file handle is not open")]
    NotInitialized,
    #[error("page {page_id} is out of range (total pages: {total_pages})")]
    InvalidPage { page_id: PageId, total_pages: u64 },
    #[error("failed to create page file {}", .path.display())]
    StorageFault {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write page {page_id}")]
    WriteFault {
        page_id: PageId,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub trait StorageManager {
    // 現在のページ数
    fn total_pages(&self) -> u64;
    // ページのデータを読み出す
    fn read_block(&mut self, page_id: PageId, data: &mut Page) -> Result<(), Error>;
    // データをページに書き出す (必要ならファイルを伸ばす)
    fn write_block(&mut self, page_id: PageId, data: &Page) -> Result<(), Error>;
    // ページ数が num_pages 以上になるまで空ページを追加する
    fn ensure_capacity(&mut self, num_pages: u64) -> Result<(), Error>;
    // 同期処理
    fn sync(&mut self) -> Result<(), Error>;
    // ハンドルを閉じる
    fn close(&mut self) -> Result<(), Error>;
}
