use crate::buffer::entity::{Frame, FrameId};
use crate::buffer::replacer::{min_evictable_by, Replacer};

// 一番早くロードされたページを追い出す。再 pin は順序に影響しない
#[derive(Debug, Default, Clone, Copy)]
pub struct Fifo;

impl Replacer for Fifo {
    fn select_victim(&mut self, frames: &[Frame]) -> Option<FrameId> {
        min_evictable_by(frames, |frame| frame.arrival)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::entity::PageId;

    fn frame(page_id: u64, fix_count: u32, arrival: u64, last_touch: u64) -> Frame {
        Frame {
            page_id: PageId(page_id),
            fix_count,
            arrival,
            last_touch,
            ..Default::default()
        }
    }

    #[test]
    fn picks_earliest_arrival() {
        let frames = vec![frame(0, 0, 3, 3), frame(1, 0, 1, 9), frame(2, 0, 2, 2)];
        assert_eq!(Some(FrameId(1)), Fifo.select_victim(&frames));
    }

    #[test]
    fn skips_pinned_and_empty_frames() {
        let frames = vec![
            frame(0, 2, 1, 1),
            Frame::default(),
            frame(2, 0, 5, 5),
            frame(3, 0, 4, 8),
        ];
        assert_eq!(Some(FrameId(3)), Fifo.select_victim(&frames));
    }

    #[test]
    fn ties_go_to_lowest_index() {
        let frames = vec![frame(0, 1, 1, 1), frame(1, 0, 2, 2), frame(2, 0, 2, 2)];
        assert_eq!(Some(FrameId(1)), Fifo.select_victim(&frames));
    }

    #[test]
    fn none_when_all_pinned() {
        let frames = vec![frame(0, 1, 1, 1), frame(1, 3, 2, 2)];
        assert_eq!(None, Fifo.select_victim(&frames));
    }
}
