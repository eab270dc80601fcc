//! Replay engine for page replacement simulations.
//!
//! Invariants:
//! - State is always derived: every step change or policy change rebuilds it
//!   from an empty memory, never by undoing or redoing single accesses.
//! - A page occupies at most one frame; its page table entry is valid exactly
//!   while it does.
//! - A failed `set_step` leaves the previous state untouched.

use common::{FrameId, PageId};
use log::{debug, trace};
use serde::Serialize;
use thiserror::Error;

use crate::history::AccessHistory;
use crate::memory::PhysicalMemory;
use crate::page_table::{PageTable, PageTableEntry};
use crate::replacer::{Policy, Replacer};
use crate::view::{EngineView, FrameSlot};

/// Errors returned by the paging engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Zero frames or an empty reference sequence.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
    /// The requested step is past the end of the reference sequence.
    #[error("step {step} is out of range for a sequence of {len} references")]
    OutOfRange { step: usize, len: usize },
}

/// Convenience alias for engine results.
pub type EngineResult<T> = Result<T, EngineError>;

/// Outcome of referencing a single page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Access {
    /// The page was already resident in `frame`.
    Hit { frame: FrameId },
    /// The page was loaded into `frame`, replacing `evicted` if memory was full.
    Fault {
        frame: FrameId,
        evicted: Option<PageId>,
    },
}

impl Access {
    pub fn is_fault(&self) -> bool {
        matches!(self, Access::Fault { .. })
    }

    pub fn frame(&self) -> FrameId {
        match *self {
            Access::Hit { frame } | Access::Fault { frame, .. } => frame,
        }
    }

    /// Page evicted by this access, if any.
    pub fn evicted(&self) -> Option<PageId> {
        match *self {
            Access::Fault { evicted, .. } => evicted,
            Access::Hit { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SimulationState {
    memory: PhysicalMemory,
    page_table: PageTable,
    history: AccessHistory,
    fault_count: usize,
    current_step: usize,
    accesses: Vec<Access>,
}

impl SimulationState {
    fn new(total_frames: usize) -> Self {
        Self {
            memory: PhysicalMemory::new(total_frames),
            page_table: PageTable::new(),
            history: AccessHistory::default(),
            fault_count: 0,
            current_step: 0,
            accesses: Vec::new(),
        }
    }

    fn reset(&mut self) {
        self.memory.reset();
        self.page_table.clear();
        self.history.clear();
        self.fault_count = 0;
        self.current_step = 0;
        self.accesses.clear();
    }

    fn record_access(&mut self, page_id: PageId, policy: Policy) -> Access {
        if let Some(frame) = self.page_table.resident_frame(page_id) {
            self.history.push(page_id);
            trace!("hit on {} in frame {}", page_id, frame);
            return Access::Hit { frame };
        }

        self.fault_count += 1;
        let (frame, evicted) = match self.memory.load(page_id) {
            Some(frame) => (frame, None),
            None => self.replace(page_id, policy),
        };
        self.page_table.map(page_id, frame);
        self.history.push(page_id);

        match evicted {
            Some(victim) => debug!(
                "fault on {}: evicted {} from frame {} ({})",
                page_id, victim, frame, policy
            ),
            None => debug!("fault on {}: loaded into free frame {}", page_id, frame),
        }
        Access::Fault { frame, evicted }
    }

    fn replace(&mut self, page_id: PageId, policy: Policy) -> (FrameId, Option<PageId>) {
        let victim = policy.victim(&self.memory, &self.history);
        let frame = victim
            .and_then(|victim| self.page_table.invalidate(victim))
            .unwrap_or_default();
        debug_assert!(victim.is_some(), "full memory must yield a victim");
        self.memory.replace(frame, page_id);
        (frame, victim)
    }
}

/// Replays a reference sequence against a fixed number of frames.
#[derive(Debug, Clone)]
pub struct PagingEngine {
    sequence: Vec<PageId>,
    policy: Policy,
    state: SimulationState,
}

impl PagingEngine {
    /// Creates an engine at step 0 with nothing replayed yet.
    pub fn new(total_frames: usize, sequence: Vec<PageId>, policy: Policy) -> EngineResult<Self> {
        if total_frames == 0 {
            return Err(EngineError::InvalidConfiguration(
                "total frames must be positive",
            ));
        }
        if sequence.is_empty() {
            return Err(EngineError::InvalidConfiguration(
                "reference sequence must not be empty",
            ));
        }
        Ok(Self {
            sequence,
            policy,
            state: SimulationState::new(total_frames),
        })
    }

    /// Switches policy and discards all simulation state.
    pub fn set_policy(&mut self, policy: Policy) {
        debug!("policy set to {}", policy);
        self.policy = policy;
        self.reset();
    }

    /// Switches between FIFO and LRU, returning the new policy.
    pub fn toggle_policy(&mut self) -> Policy {
        let policy = self.policy.toggled();
        self.set_policy(policy);
        policy
    }

    /// Replays the sequence up to and including `step`.
    pub fn set_step(&mut self, step: usize) -> EngineResult<()> {
        if step >= self.sequence.len() {
            return Err(EngineError::OutOfRange {
                step,
                len: self.sequence.len(),
            });
        }
        self.replay(step);
        Ok(())
    }

    /// Advances one step if not already at the end.
    pub fn next_step(&mut self) -> bool {
        if self.state.current_step >= self.last_step() {
            return false;
        }
        self.replay(self.state.current_step + 1);
        true
    }

    /// Moves back one step if not already at the start.
    pub fn prev_step(&mut self) -> bool {
        if self.state.current_step == 0 {
            return false;
        }
        self.replay(self.state.current_step - 1);
        true
    }

    /// Clears memory, page table, history and fault count.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    fn replay(&mut self, step: usize) {
        trace!("replaying {} references with {}", step + 1, self.policy);
        self.state.reset();
        for &page_id in &self.sequence[..=step] {
            let access = self.state.record_access(page_id, self.policy);
            self.state.accesses.push(access);
        }
        self.state.current_step = step;
    }

    /// Snapshot of everything a renderer needs.
    pub fn current_view(&self) -> EngineView {
        let frames = self
            .state
            .memory
            .slots()
            .iter()
            .enumerate()
            .map(|(frame, &page)| FrameSlot { frame, page })
            .collect();
        EngineView {
            frames,
            fault_count: self.state.fault_count,
            current_step: self.state.current_step,
            policy: self.policy,
            sequence: self.sequence.clone(),
            accesses: self.state.accesses.clone(),
        }
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn sequence(&self) -> &[PageId] {
        &self.sequence
    }

    pub fn total_frames(&self) -> usize {
        self.state.memory.total_frames()
    }

    pub fn current_step(&self) -> usize {
        self.state.current_step
    }

    /// Index of the final reference.
    pub fn last_step(&self) -> usize {
        self.sequence.len() - 1
    }

    pub fn fault_count(&self) -> usize {
        self.state.fault_count
    }

    /// Outcomes of the replayed prefix, one per step.
    pub fn accesses(&self) -> &[Access] {
        &self.state.accesses
    }

    /// Page table entry for `page_id`, including evicted pages.
    pub fn page_table_entry(&self, page_id: PageId) -> Option<PageTableEntry> {
        self.state.page_table.get(page_id).copied()
    }

    pub fn history(&self) -> &AccessHistory {
        &self.state.history
    }
}
