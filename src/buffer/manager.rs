use super::entity::{PageHandle, PoolStats};
use crate::storage::{entity::PageId, manager};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Storage(#[from] manager::Error),
    #[error("buffer pool is not initialized")]
    NotInitialized,
    #[error("page {0} is not resident in the buffer pool")]
    UnknownPage(PageId),
    #[error("page {0} is borrowed mutably through a handle")]
    PageBusy(PageId),
    #[error("no free buffer available in buffer pool")]
    PoolExhausted,
    #[error("invalid buffer pool configuration: {0}")]
    InvalidConfiguration(String),
}

pub trait BufferPoolManager {
    // ページを pin して取得する (無ければ読み込む)
    fn pin(&mut self, page_id: PageId) -> Result<PageHandle, Error>;
    // pin を 1 つ外す
    fn unpin(&mut self, handle: &PageHandle) -> Result<(), Error>;
    // 変更があったことを記録する
    fn mark_dirty(&mut self, handle: &PageHandle) -> Result<(), Error>;
    // 変更済みならストレージに書き出す
    fn force_page(&mut self, handle: &PageHandle) -> Result<(), Error>;
    // pin されていない変更済みページを全て書き出す
    fn force_flush_pool(&mut self) -> Result<(), Error>;
    // 書き出してからストレージを閉じる
    fn shutdown(&mut self) -> Result<(), Error>;

    fn frame_contents(&self) -> Vec<PageId>;
    fn dirty_flags(&self) -> Vec<bool>;
    fn fix_counts(&self) -> Vec<u32>;
    fn read_io_count(&self) -> u64;
    fn write_io_count(&self) -> u64;

    fn stats(&self) -> PoolStats {
        PoolStats {
            frame_contents: self.frame_contents(),
            dirty_flags: self.dirty_flags(),
            fix_counts: self.fix_counts(),
            read_io_count: self.read_io_count(),
            write_io_count: self.write_io_count(),
        }
    }
}
