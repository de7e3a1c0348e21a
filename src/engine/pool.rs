use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use tracing::{debug, trace, warn};

use super::disk::PageFile;
use super::frame_table::FrameTable;
use crate::buffer::entity::{FrameId, PageHandle};
use crate::buffer::manager::*;
use crate::buffer::replacer::{ReplacementStrategy, Replacer};
use crate::storage::entity::{PageId, PAGE_SIZE};
use crate::storage::manager::{self, StorageManager};

// 固定数のフレームでストレージのページをキャッシュする。
// pin 数が 0 でないフレームは追い出し候補にならず、変更済みフレームは再利用前に書き戻す
pub struct BufferPool<T: StorageManager> {
    disk: T,
    frames: FrameTable,
    replacer: Box<dyn Replacer>,
    num_read_io: u64,
    num_write_io: u64,
    // ロード時刻と pin 時刻で共有する単調増加カウンタ
    tick: u64,
    is_open: bool,
}

fn check_pool_size(pool_size: usize) -> Result<(), Error> {
    if pool_size == 0 {
        return Err(Error::InvalidConfiguration(
            "buffer pool needs at least one frame".to_string(),
        ));
    }
    Ok(())
}

impl BufferPool<PageFile> {
    pub fn initialize(
        path: impl AsRef<Path>,
        pool_size: usize,
        strategy: ReplacementStrategy,
    ) -> Result<Self, Error> {
        check_pool_size(pool_size)?;
        let disk = PageFile::open(path)?;
        Self::new(disk, pool_size, strategy)
    }
}

impl<T: StorageManager> BufferPool<T> {
    pub fn new(disk: T, pool_size: usize, strategy: ReplacementStrategy) -> Result<Self, Error> {
        Self::with_replacer(disk, pool_size, strategy.replacer())
    }

    pub fn with_replacer(
        disk: T,
        pool_size: usize,
        replacer: Box<dyn Replacer>,
    ) -> Result<Self, Error> {
        check_pool_size(pool_size)?;
        debug!(pool_size, ?replacer, "initialized buffer pool");
        Ok(Self {
            disk,
            frames: FrameTable::new(pool_size),
            replacer,
            num_read_io: 0,
            num_write_io: 0,
            tick: 0,
            is_open: true,
        })
    }

    pub fn pool_size(&self) -> usize {
        self.frames.size()
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn storage(&self) -> &T {
        &self.disk
    }

    fn check_open(&self) -> Result<(), Error> {
        if self.is_open {
            Ok(())
        } else {
            Err(Error::NotInitialized)
        }
    }

    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    fn resident(&self, page_id: PageId) -> Result<FrameId, Error> {
        self.check_open()?;
        self.frames
            .find_by_page(page_id)
            .ok_or(Error::UnknownPage(page_id))
    }

    fn flush_frame(&mut self, frame_id: FrameId) -> Result<(), Error> {
        let frame = &mut self.frames[frame_id];
        if frame.is_empty() || !frame.is_dirty {
            return Ok(());
        }
        // 呼び出し側が data_mut() を握ったままなら書き出せない
        let page = frame
            .page
            .try_borrow()
            .map_err(|_| Error::PageBusy(frame.page_id))?;
        self.disk.write_block(frame.page_id, &page)?;
        drop(page);
        frame.is_dirty = false;
        self.num_write_io += 1;
        trace!(page_id = %frame.page_id, frame_id = frame_id.0, "flushed frame");
        Ok(())
    }

    // pin されていない変更済みフレームを全て書き出す。失敗しても残りは試し、最初のエラーを返す
    fn flush_unpinned(&mut self) -> Result<(), Error> {
        let mut result = Ok(());
        for index in 0..self.frames.size() {
            let frame_id = FrameId(index);
            if self.frames[frame_id].fix_count > 0 {
                continue;
            }
            if let Err(e) = self.flush_frame(frame_id) {
                if result.is_ok() {
                    result = Err(e);
                }
            }
        }
        result
    }
}

impl<T: StorageManager> BufferPoolManager for BufferPool<T> {
    fn pin(&mut self, page_id: PageId) -> Result<PageHandle, Error> {
        self.check_open()?;
        if !page_id.is_valid() {
            return Err(manager::Error::InvalidPage {
                page_id,
                total_pages: self.disk.total_pages(),
            }
            .into());
        }
        if let Some(frame_id) = self.frames.find_by_page(page_id) {
            let tick = self.next_tick();
            let frame = &mut self.frames[frame_id];
            frame.fix_count += 1;
            frame.last_touch = tick;
            trace!(page_id = %page_id, frame_id = frame_id.0, "buffer pool hit");
            return Ok(PageHandle::new(page_id, Rc::clone(&frame.page)));
        }
        let frame_id = match self.frames.find_empty() {
            Some(frame_id) => frame_id,
            None => self
                .replacer
                .select_victim(self.frames.as_slice())
                .ok_or(Error::PoolExhausted)?,
        };
        let evict_page_id = self.frames[frame_id].page_id;
        self.flush_frame(frame_id)?;
        if page_id.to_u64() >= self.disk.total_pages() {
            self.disk.ensure_capacity(page_id.to_u64() + 1)?;
        }
        // 読み込みに成功するまでフレームには手を付けない
        let mut page = [0u8; PAGE_SIZE];
        self.disk.read_block(page_id, &mut page)?;
        self.num_read_io += 1;

        let arrival = self.next_tick();
        let last_touch = self.next_tick();
        self.frames.assign(frame_id, page_id);
        let frame = &mut self.frames[frame_id];
        match Rc::get_mut(&mut frame.page) {
            Some(buffer) => *buffer.get_mut() = page,
            // unpin 後もハンドルが残っているので、そのハンドルとは切り離す
            None => frame.page = Rc::new(RefCell::new(page)),
        }
        frame.is_dirty = false;
        frame.fix_count = 1;
        frame.arrival = arrival;
        frame.last_touch = last_touch;
        debug!(
            page_id = %page_id,
            frame_id = frame_id.0,
            evicted = %evict_page_id,
            "buffer pool miss"
        );
        Ok(PageHandle::new(page_id, Rc::clone(&frame.page)))
    }

    fn unpin(&mut self, handle: &PageHandle) -> Result<(), Error> {
        let frame_id = self.resident(handle.page_id())?;
        let frame = &mut self.frames[frame_id];
        frame.fix_count = frame.fix_count.saturating_sub(1);
        Ok(())
    }

    fn mark_dirty(&mut self, handle: &PageHandle) -> Result<(), Error> {
        let frame_id = self.resident(handle.page_id())?;
        self.frames[frame_id].is_dirty = true;
        Ok(())
    }

    fn force_page(&mut self, handle: &PageHandle) -> Result<(), Error> {
        let frame_id = self.resident(handle.page_id())?;
        if !self.frames[frame_id].is_dirty {
            return Ok(());
        }
        self.flush_frame(frame_id)?;
        self.disk.sync()?;
        Ok(())
    }

    fn force_flush_pool(&mut self) -> Result<(), Error> {
        self.check_open()?;
        self.flush_unpinned()?;
        self.disk.sync()?;
        Ok(())
    }

    fn shutdown(&mut self) -> Result<(), Error> {
        self.check_open()?;
        let pinned_dirty = self
            .frames
            .as_slice()
            .iter()
            .filter(|frame| frame.is_dirty && frame.fix_count > 0)
            .count();
        if pinned_dirty > 0 {
            warn!(pinned_dirty, "shutting down with pinned dirty pages, they are not written back");
        }
        let flushed = self.flush_unpinned();
        self.frames.release();
        self.is_open = false;
        let closed = self.disk.close();
        debug!(
            read_io = self.num_read_io,
            write_io = self.num_write_io,
            "shut down buffer pool"
        );
        flushed?;
        closed?;
        Ok(())
    }

    fn frame_contents(&self) -> Vec<PageId> {
        self.frames.frame_contents()
    }

    fn dirty_flags(&self) -> Vec<bool> {
        self.frames.dirty_flags()
    }

    fn fix_counts(&self) -> Vec<u32> {
        self.frames.fix_counts()
    }

    fn read_io_count(&self) -> u64 {
        self.num_read_io
    }

    fn write_io_count(&self) -> u64 {
        self.num_write_io
    }
}

impl<T: StorageManager> Drop for BufferPool<T> {
    fn drop(&mut self) {
        if self.is_open {
            if let Err(e) = self.shutdown() {
                warn!(error = %e, "failed to shut down buffer pool");
            }
        }
    }
}
