use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::buffer::manager;
use crate::buffer::replacer::ReplacementStrategy;
use crate::engine::{disk::PageFile, pool::BufferPool};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read config {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Pool(#[from] manager::Error),
}

// 例: { "page_file": "pages.db", "capacity": 10, "strategy": "lru" }
// 省略したフィールドは Default の値になる
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    pub page_file: PathBuf,
    pub capacity: usize,
    pub strategy: ReplacementStrategy,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            page_file: PathBuf::from("pages.db"),
            capacity: 10,
            strategy: ReplacementStrategy::Lru,
        }
    }
}

impl PoolConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        debug!(?config, "loaded pool config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), manager::Error> {
        if self.capacity == 0 {
            return Err(manager::Error::InvalidConfiguration(
                "capacity must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    // ページファイルが無ければ作ってからプールを開く
    pub fn open_pool(&self) -> Result<BufferPool<PageFile>, Error> {
        self.validate()?;
        if !self.page_file.exists() {
            PageFile::create(&self.page_file).map_err(manager::Error::from)?;
        }
        Ok(BufferPool::initialize(
            &self.page_file,
            self.capacity,
            self.strategy,
        )?)
    }
}
