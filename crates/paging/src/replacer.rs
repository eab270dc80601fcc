use std::fmt;
use std::str::FromStr;

use common::PageId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::history::AccessHistory;
use crate::memory::PhysicalMemory;

/// Eviction policy for a full physical memory.
pub trait Replacer {
    /// Chooses the resident page to evict.
    ///
    /// Returns `None` only when memory holds no pages.
    fn victim(&self, memory: &PhysicalMemory, history: &AccessHistory) -> Option<PageId>;
}

/// Evicts whatever page sits in frame 0.
///
/// Replacements overwrite slots in place, so once memory has filled this
/// keeps choosing frame 0 rather than the page loaded earliest.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlotFifoReplacer;

impl Replacer for SlotFifoReplacer {
    fn victim(&self, memory: &PhysicalMemory, _history: &AccessHistory) -> Option<PageId> {
        memory.page_at(0)
    }
}

/// Evicts the resident page whose latest access is oldest in the history.
///
/// Frames are scanned in index order and the first page with the smallest
/// position wins. A resident page missing from the history is returned at
/// once without looking at later frames.
#[derive(Debug, Clone, Copy, Default)]
pub struct LRUReplacer;

impl Replacer for LRUReplacer {
    fn victim(&self, memory: &PhysicalMemory, history: &AccessHistory) -> Option<PageId> {
        let mut victim = None;
        let mut oldest = usize::MAX;
        for (_, page_id) in memory.resident() {
            match history.last_position(page_id) {
                None => return Some(page_id),
                Some(position) if position < oldest => {
                    oldest = position;
                    victim = Some(page_id);
                }
                Some(_) => {}
            }
        }
        victim
    }
}

/// Replacement policy selectable on the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Policy {
    /// Labelled "FIFO"; evicts the page in frame 0 (see [`SlotFifoReplacer`]).
    #[default]
    #[serde(rename = "FIFO")]
    FirstInFirstOutSlot,
    #[serde(rename = "LRU")]
    LeastRecentlyUsed,
}

impl Policy {
    /// Returns the other policy.
    pub fn toggled(self) -> Self {
        match self {
            Policy::FirstInFirstOutSlot => Policy::LeastRecentlyUsed,
            Policy::LeastRecentlyUsed => Policy::FirstInFirstOutSlot,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Policy::FirstInFirstOutSlot => "FIFO",
            Policy::LeastRecentlyUsed => "LRU",
        }
    }

    fn replacer(self) -> &'static dyn Replacer {
        match self {
            Policy::FirstInFirstOutSlot => &SlotFifoReplacer,
            Policy::LeastRecentlyUsed => &LRUReplacer,
        }
    }
}

impl Replacer for Policy {
    fn victim(&self, memory: &PhysicalMemory, history: &AccessHistory) -> Option<PageId> {
        self.replacer().victim(memory, history)
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown policy '{0}', expected fifo or lru")]
pub struct ParsePolicyError(pub String);

impl FromStr for Policy {
    type Err = ParsePolicyError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_lowercase().as_str() {
            "fifo" => Ok(Policy::FirstInFirstOutSlot),
            "lru" => Ok(Policy::LeastRecentlyUsed),
            _ => Err(ParsePolicyError(input.trim().to_string())),
        }
    }
}
