// MODULE DECLARATIONS
// These files exist internally but we decide what to expose below.
mod engine;
mod history;
mod memory;
mod page_table;
mod replacer;
mod view;

// PUBLIC API EXPORTS
// Front-ends (the terminal simulator, tests) use these directly.
pub use common::{FrameId, PageId};
pub use engine::{Access, EngineError, EngineResult, PagingEngine};
pub use history::{AccessHistory, HISTORY_CAPACITY};
pub use memory::PhysicalMemory;
pub use page_table::{PageTable, PageTableEntry};
pub use replacer::{LRUReplacer, ParsePolicyError, Policy, Replacer, SlotFifoReplacer};
pub use view::{EngineView, FrameSlot, TimelineCell};
