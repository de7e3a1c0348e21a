use std::fs::{self, File, OpenOptions};
use std::io::{self, prelude::*, SeekFrom};
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::storage::entity::{page_count, Page, PageId, PAGE_SIZE};
use crate::storage::manager::*;

const ZERO_PAGE: Page = [0; PAGE_SIZE];

// PAGE_SIZE ごとのブロックに区切ったファイル。ページ k は [k * PAGE_SIZE, (k + 1) * PAGE_SIZE) にありヘッダは無い。
// カーソルは最後に読み書きしたページで、前後のブロック読み出しはここからの相対位置
#[derive(Debug)]
pub struct PageFile {
    path: PathBuf,
    // 閉じられた後は None
    heap_file: Option<File>,
    total_pages: u64,
    cur_page_pos: u64,
}

impl PageFile {
    // ゼロで埋めた 1 ページだけのファイルを作る (既存なら切り詰める)
    pub fn create(path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        let fault = |source| Error::StorageFault {
            path: path.to_path_buf(),
            source,
        };
        let mut heap_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(fault)?;
        heap_file.write_all(&ZERO_PAGE).map_err(fault)?;
        heap_file.sync_all().map_err(fault)?;
        debug!(path = %path.display(), "created page file");
        Ok(())
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();
        let heap_file = match OpenOptions::new().read(true).write(true).open(&path) {
            Ok(file) => file,
            Err(source) => return Err(Error::NotFound { path, source }),
        };
        let total_pages = page_count(heap_file.metadata()?.len());
        debug!(path = %path.display(), total_pages, "opened page file");
        Ok(Self {
            path,
            heap_file: Some(heap_file),
            total_pages,
            cur_page_pos: 0,
        })
    }

    pub fn destroy(path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        fs::remove_file(path).map_err(|source| Error::NotFound {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "destroyed page file");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.heap_file.is_some()
    }

    pub fn cur_page_pos(&self) -> PageId {
        PageId(self.cur_page_pos)
    }

    fn heap_file(&mut self) -> Result<&mut File, Error> {
        self.heap_file.as_mut().ok_or(Error::NotInitialized)
    }

    fn refresh_page_count(&mut self) -> Result<(), Error> {
        let len = self.heap_file()?.metadata()?.len();
        self.total_pages = page_count(len);
        Ok(())
    }

    pub fn read_first_block(&mut self, data: &mut Page) -> Result<(), Error> {
        self.read_block(PageId(0), data)
    }

    pub fn read_previous_block(&mut self, data: &mut Page) -> Result<(), Error> {
        let page_id = match self.cur_page_pos.checked_sub(1) {
            Some(prev) => PageId(prev),
            None => PageId::INVALID_PAGE_ID,
        };
        self.read_block(page_id, data)
    }

    pub fn read_current_block(&mut self, data: &mut Page) -> Result<(), Error> {
        self.read_block(PageId(self.cur_page_pos), data)
    }

    pub fn read_next_block(&mut self, data: &mut Page) -> Result<(), Error> {
        self.read_block(PageId(self.cur_page_pos + 1), data)
    }

    pub fn read_last_block(&mut self, data: &mut Page) -> Result<(), Error> {
        self.read_block(PageId(self.total_pages - 1), data)
    }

    pub fn write_current_block(&mut self, data: &Page) -> Result<(), Error> {
        self.write_block(PageId(self.cur_page_pos), data)
    }

    pub fn append_empty_block(&mut self) -> Result<(), Error> {
        let page_id = PageId(self.total_pages);
        let heap_file = self.heap_file()?;
        heap_file
            .seek(SeekFrom::End(0))
            .and_then(|_| heap_file.write_all(&ZERO_PAGE))
            .map_err(|source| Error::WriteFault { page_id, source })?;
        self.refresh_page_count()
    }
}

impl StorageManager for PageFile {
    fn total_pages(&self) -> u64 {
        self.total_pages
    }
    fn read_block(&mut self, page_id: PageId, data: &mut Page) -> Result<(), Error> {
        let total_pages = self.total_pages;
        let heap_file = self.heap_file()?;
        if page_id.to_u64() >= total_pages {
            return Err(Error::InvalidPage {
                page_id,
                total_pages,
            });
        }
        // ページ先頭へシーク
        heap_file.seek(SeekFrom::Start(page_id.offset()))?;
        // 末尾が欠けていれば残りはゼロで埋める
        let mut filled = 0;
        while filled < PAGE_SIZE {
            match heap_file.read(&mut data[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        data[filled..].fill(0);
        self.cur_page_pos = page_id.to_u64();
        Ok(())
    }
    fn write_block(&mut self, page_id: PageId, data: &Page) -> Result<(), Error> {
        if !page_id.is_valid() {
            return Err(Error::InvalidPage {
                page_id,
                total_pages: self.total_pages,
            });
        }
        self.heap_file()?;
        // 末尾より先への書き込みはファイルを伸ばしてから行う
        self.ensure_capacity(page_id.to_u64() + 1)?;
        let heap_file = self.heap_file()?;
        heap_file
            .seek(SeekFrom::Start(page_id.offset()))
            .and_then(|_| heap_file.write_all(data))
            .map_err(|source| Error::WriteFault { page_id, source })?;
        trace!(page_id = %page_id, "wrote block");
        self.cur_page_pos = page_id.to_u64();
        self.refresh_page_count()
    }
    fn ensure_capacity(&mut self, num_pages: u64) -> Result<(), Error> {
        self.refresh_page_count()?;
        if self.total_pages >= num_pages {
            return Ok(());
        }
        debug!(from = self.total_pages, to = num_pages, "growing page file");
        while self.total_pages < num_pages {
            self.append_empty_block()?;
        }
        Ok(())
    }
    fn sync(&mut self) -> Result<(), Error> {
        let heap_file = self.heap_file()?;
        heap_file.flush()?;
        heap_file.sync_all()?;
        Ok(())
    }
    fn close(&mut self) -> Result<(), Error> {
        let heap_file = self.heap_file.take().ok_or(Error::NotInitialized)?;
        heap_file.sync_all()?;
        debug!(path = %self.path.display(), "closed page file");
        Ok(())
    }
}
