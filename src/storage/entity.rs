use std::fmt;

use serde::{Deserialize, Serialize};

pub const PAGE_SIZE: usize = 4096;

pub type Page = [u8; PAGE_SIZE];

#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct PageId(pub u64);
impl PageId {
    pub const INVALID_PAGE_ID: PageId = PageId(u64::MAX);

    pub fn to_u64(self) -> u64 {
        self.0
    }

    pub fn is_valid(self) -> bool {
        self != Self::INVALID_PAGE_ID
    }

    // ページ先頭のバイトオフセット
    pub fn offset(self) -> u64 {
        self.0 * PAGE_SIZE as u64
    }
}

impl Default for PageId {
    fn default() -> Self {
        Self::INVALID_PAGE_ID
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{}", self.0)
        } else {
            f.write_str("NO_PAGE")
        }
    }
}

// len バイトを収めるのに必要なページ数 (端数は切り上げ、開いているファイルは最低 1 ページ)
pub fn page_count(len: u64) -> u64 {
    let page_size = PAGE_SIZE as u64;
    ((len + page_size - 1) / page_size).max(1)
}
