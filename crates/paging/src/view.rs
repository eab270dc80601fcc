use common::{FrameId, PageId};
use serde::Serialize;

use crate::engine::Access;
use crate::replacer::Policy;

/// One frame of physical memory as seen by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameSlot {
    pub frame: FrameId,
    pub page: Option<PageId>,
}

/// One position of the reference sequence on the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimelineCell {
    pub index: usize,
    pub page: PageId,
    /// The replay has reached this position.
    pub reached: bool,
    /// Reached and referencing the same page as the current step.
    pub highlighted: bool,
    /// The access at this position was a page fault.
    pub faulted: bool,
}

/// Read-only snapshot of the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineView {
    pub frames: Vec<FrameSlot>,
    pub fault_count: usize,
    pub current_step: usize,
    pub policy: Policy,
    pub sequence: Vec<PageId>,
    pub accesses: Vec<Access>,
}

impl EngineView {
    /// Page referenced at the current step.
    pub fn current_page(&self) -> Option<PageId> {
        self.sequence.get(self.current_step).copied()
    }

    pub fn occupied_frames(&self) -> usize {
        self.frames.iter().filter(|slot| slot.page.is_some()).count()
    }

    /// Steps that evicted a page, with the page they evicted.
    pub fn evictions(&self) -> Vec<(usize, PageId)> {
        self.accesses
            .iter()
            .enumerate()
            .filter_map(|(step, access)| access.evicted().map(|victim| (step, victim)))
            .collect()
    }

    pub fn timeline(&self) -> Vec<TimelineCell> {
        let current = self.current_page();
        self.sequence
            .iter()
            .enumerate()
            .map(|(index, &page)| {
                let reached = index <= self.current_step;
                TimelineCell {
                    index,
                    page,
                    reached,
                    highlighted: reached && Some(page) == current,
                    faulted: self
                        .accesses
                        .get(index)
                        .is_some_and(|access| access.is_fault()),
                }
            })
            .collect()
    }
}
