use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::disk::PageFile;
use crate::storage::manager::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileHandle(usize);

// 開いたページファイルを覚えておき、ハンドルが残っていても名前で削除できるようにする
#[derive(Debug, Default)]
pub struct FileRegistry {
    open_files: HashMap<FileHandle, PageFile>,
    next_handle: usize,
}

impl FileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, path: impl AsRef<Path>) -> Result<(), Error> {
        PageFile::create(path)
    }

    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<FileHandle, Error> {
        let file = PageFile::open(path)?;
        let handle = FileHandle(self.next_handle);
        self.next_handle += 1;
        self.open_files.insert(handle, file);
        Ok(handle)
    }

    pub fn close(&mut self, handle: FileHandle) -> Result<(), Error> {
        let mut file = self
            .open_files
            .remove(&handle)
            .ok_or(Error::NotInitialized)?;
        file.close()
    }

    // 開いているハンドルを全て閉じてからファイルを削除する
    pub fn destroy(&mut self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        let handles: Vec<FileHandle> = self
            .open_files
            .iter()
            .filter(|(_, file)| file.path() == path)
            .map(|(&handle, _)| handle)
            .collect();
        for handle in handles {
            debug!(?handle, path = %path.display(), "closing live handle before destroy");
            self.close(handle)?;
        }
        PageFile::destroy(path)
    }

    pub fn file(&self, handle: FileHandle) -> Result<&PageFile, Error> {
        self.open_files.get(&handle).ok_or(Error::NotInitialized)
    }

    pub fn file_mut(&mut self, handle: FileHandle) -> Result<&mut PageFile, Error> {
        self.open_files
            .get_mut(&handle)
            .ok_or(Error::NotInitialized)
    }

    pub fn is_open(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        self.open_files.values().any(|file| file.path() == path)
    }

    pub fn open_paths(&self) -> Vec<PathBuf> {
        self.open_files
            .values()
            .map(|file| file.path().to_path_buf())
            .collect()
    }
}
