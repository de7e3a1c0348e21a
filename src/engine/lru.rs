use crate::buffer::entity::{Frame, FrameId};
use crate::buffer::replacer::{min_evictable_by, Replacer};

// 最後に pin されたのが一番古いページを追い出す
#[derive(Debug, Default, Clone, Copy)]
pub struct Lru;

impl Replacer for Lru {
    fn select_victim(&mut self, frames: &[Frame]) -> Option<FrameId> {
        min_evictable_by(frames, |frame| frame.last_touch)
    }
}
