use crate::buffer::entity::{Frame, FrameId};
use crate::buffer::replacer::Replacer;

// Clock-sweep (second chance)
//
// 針が通過したときの last_touch を覚えておき、それ以降に pin されたフレームは一度だけ見逃す。
#[derive(Debug, Default)]
pub struct ClockSweep {
    next_victim_id: FrameId,
    seen_touch: Vec<u64>,
}

impl ClockSweep {
    fn increment_id(&self, frame_id: FrameId, pool_size: usize) -> FrameId {
        FrameId((frame_id.0 + 1) % pool_size)
    }
}

impl Replacer for ClockSweep {
    fn select_victim(&mut self, frames: &[Frame]) -> Option<FrameId> {
        let pool_size = frames.len();
        if pool_size == 0 {
            return None;
        }
        self.seen_touch.resize(pool_size, 0);
        if self.next_victim_id.0 >= pool_size {
            self.next_victim_id = FrameId::default();
        }
        let mut consecutive_pinned = 0;
        let victim_id = loop {
            let next_victim_id = self.next_victim_id;
            let frame = &frames[next_victim_id.0];
            self.next_victim_id = self.increment_id(next_victim_id, pool_size);
            if !frame.is_evictable() {
                consecutive_pinned += 1;
                if consecutive_pinned >= pool_size {
                    return None;
                }
                continue;
            }
            let seen = &mut self.seen_touch[next_victim_id.0];
            if frame.last_touch > *seen {
                *seen = frame.last_touch;
                consecutive_pinned = 0;
                continue;
            }
            break next_victim_id;
        };
        Some(victim_id)
    }
}
