use std::io::{Read, Write};

use zerocopy::AsBytes;

use super::entity::{Page, PageId, PAGE_SIZE};
use super::manager::*;

// ファイルを持たない StorageManager。作成直後のページファイルと同じく 1 ページから始まる
pub struct MemoryManager {
    heap: Vec<Page>,
    is_open: bool,
}

impl MemoryManager {
    pub fn new() -> Self {
        Self {
            heap: vec![[0; PAGE_SIZE]],
            is_open: true,
        }
    }

    fn check_open(&self) -> Result<(), Error> {
        if self.is_open {
            Ok(())
        } else {
            Err(Error::NotInitialized)
        }
    }
}

impl Default for MemoryManager {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageManager for MemoryManager {
    fn total_pages(&self) -> u64 {
        self.heap.len() as u64
    }
    fn read_block(&mut self, page_id: PageId, data: &mut Page) -> Result<(), Error> {
        self.check_open()?;
        let total_pages = self.total_pages();
        let mut row: &[u8] = self
            .heap
            .get(page_id.to_u64() as usize)
            .ok_or(Error::InvalidPage {
                page_id,
                total_pages,
            })?
            .as_bytes();
        row.read_exact(&mut data[..])?;
        Ok(())
    }
    fn write_block(&mut self, page_id: PageId, data: &Page) -> Result<(), Error> {
        self.check_open()?;
        if !page_id.is_valid() {
            return Err(Error::InvalidPage {
                page_id,
                total_pages: self.total_pages(),
            });
        }
        self.ensure_capacity(page_id.to_u64() + 1)?;
        let mut row: &mut [u8] = self.heap[page_id.to_u64() as usize].as_bytes_mut();
        row.write_all(data.as_bytes())
            .map_err(|source| Error::WriteFault { page_id, source })
    }
    fn ensure_capacity(&mut self, num_pages: u64) -> Result<(), Error> {
        self.check_open()?;
        while self.total_pages() < num_pages {
            self.heap.push([0; PAGE_SIZE]);
        }
        Ok(())
    }
    fn sync(&mut self) -> Result<(), Error> {
        self.check_open()
    }
    fn close(&mut self) -> Result<(), Error> {
        self.check_open()?;
        self.is_open = false;
        Ok(())
    }
}
