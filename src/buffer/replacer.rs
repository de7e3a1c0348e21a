use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use super::entity::{Frame, FrameId};
use crate::engine::{clocksweep::ClockSweep, fifo::Fifo, lru::Lru};

// 空きフレームが無いときに再利用するフレームを選ぶ。
// pin 数 0 の使用中フレームだけを返し、全て pin されていれば None
pub trait Replacer: Debug {
    fn select_victim(&mut self, frames: &[Frame]) -> Option<FrameId>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplacementStrategy {
    Fifo,
    Lru,
    Clock,
}

impl ReplacementStrategy {
    pub fn replacer(self) -> Box<dyn Replacer> {
        match self {
            ReplacementStrategy::Fifo => Box::new(Fifo),
            ReplacementStrategy::Lru => Box::new(Lru),
            ReplacementStrategy::Clock => Box::new(ClockSweep::default()),
        }
    }
}

// key が最小の追い出し可能なフレーム。同じ値なら添字の小さい方
pub(crate) fn min_evictable_by<F>(frames: &[Frame], key: F) -> Option<FrameId>
where
    F: Fn(&Frame) -> u64,
{
    frames
        .iter()
        .enumerate()
        .filter(|(_, frame)| frame.is_evictable())
        .min_by_key(|&(_, frame)| key(frame))
        .map(|(index, _)| FrameId(index))
}
