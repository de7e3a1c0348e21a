use std::collections::HashMap;
use std::ops::{Index, IndexMut};

use crate::buffer::entity::{Frame, FrameId};
use crate::storage::entity::PageId;

// フレームの配列と、ページ ID からフレームを引くためのページテーブル
#[derive(Debug)]
pub struct FrameTable {
    frames: Vec<Frame>,
    page_table: HashMap<PageId, FrameId>,
}

impl Index<FrameId> for FrameTable {
    type Output = Frame;
    fn index(&self, index: FrameId) -> &Self::Output {
        &self.frames[index.0]
    }
}

impl IndexMut<FrameId> for FrameTable {
    fn index_mut(&mut self, index: FrameId) -> &mut Self::Output {
        &mut self.frames[index.0]
    }
}

impl FrameTable {
    pub fn new(pool_size: usize) -> Self {
        let mut frames = vec![];
        frames.resize_with(pool_size, Default::default);
        Self {
            frames,
            page_table: HashMap::with_capacity(pool_size),
        }
    }

    pub fn size(&self) -> usize {
        self.frames.len()
    }

    pub fn as_slice(&self) -> &[Frame] {
        &self.frames
    }

    pub fn find_by_page(&self, page_id: PageId) -> Option<FrameId> {
        self.page_table.get(&page_id).copied()
    }

    pub fn find_empty(&self) -> Option<FrameId> {
        self.frames
            .iter()
            .position(Frame::is_empty)
            .map(FrameId)
    }

    // フレームの持ち主を page_id に付け替える
    pub fn assign(&mut self, frame_id: FrameId, page_id: PageId) {
        let evict_page_id = self[frame_id].page_id;
        if evict_page_id.is_valid() {
            self.page_table.remove(&evict_page_id);
        }
        self[frame_id].page_id = page_id;
        self.page_table.insert(page_id, frame_id);
    }

    pub fn frame_contents(&self) -> Vec<PageId> {
        self.frames.iter().map(|frame| frame.page_id).collect()
    }

    pub fn dirty_flags(&self) -> Vec<bool> {
        self.frames.iter().map(|frame| frame.is_dirty).collect()
    }

    pub fn fix_counts(&self) -> Vec<u32> {
        self.frames.iter().map(|frame| frame.fix_count).collect()
    }

    pub fn release(&mut self) {
        self.frames = vec![];
        self.page_table.clear();
    }
}
