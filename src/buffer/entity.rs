use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use serde::Serialize;

use crate::storage::entity::{Page, PageId, PAGE_SIZE};

#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
pub struct FrameId(pub usize);

#[derive(Debug)]
pub struct Frame {
    pub page_id: PageId,
    pub is_dirty: bool,
    pub fix_count: u32,
    // ロードされた時刻 (FIFO)
    pub arrival: u64,
    // 最後に pin された時刻 (LRU)
    pub last_touch: u64,
    pub page: Rc<RefCell<Page>>,
}

impl Frame {
    pub fn is_empty(&self) -> bool {
        !self.page_id.is_valid()
    }

    pub fn is_evictable(&self) -> bool {
        !self.is_empty() && self.fix_count == 0
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            page_id: Default::default(),
            is_dirty: false,
            fix_count: 0,
            arrival: 0,
            last_touch: 0,
            page: Rc::new(RefCell::new([0u8; PAGE_SIZE])),
        }
    }
}

// 呼び出し側から見た pin 済みページ。フレームのバッファを共有するが常駐は保証しない。
// unpin 後にフレームが別ページに使われると、ハンドルは古い内容を見たままになる
#[derive(Debug, Clone)]
pub struct PageHandle {
    page_id: PageId,
    page: Rc<RefCell<Page>>,
}

impl PageHandle {
    pub(crate) fn new(page_id: PageId, page: Rc<RefCell<Page>>) -> Self {
        Self { page_id, page }
    }

    pub fn page_id(&self) -> PageId {
        self.page_id
    }

    pub fn data(&self) -> Ref<'_, Page> {
        self.page.borrow()
    }

    pub fn data_mut(&self) -> RefMut<'_, Page> {
        self.page.borrow_mut()
    }
}

// 外部の表示用ツール向けのスナップショット
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolStats {
    pub frame_contents: Vec<PageId>,
    pub dirty_flags: Vec<bool>,
    pub fix_counts: Vec<u32>,
    pub read_io_count: u64,
    pub write_io_count: u64,
}
