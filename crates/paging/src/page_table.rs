use std::collections::HashMap;

use common::{FrameId, PageId};
use serde::Serialize;

/// Where a page was last loaded and whether it is still there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageTableEntry {
    pub frame: FrameId,
    pub valid: bool,
}

/// Maps every page ever loaded to its entry.
///
/// Evicted pages keep their entry with `valid == false`; entries are only
/// dropped by [`PageTable::clear`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageTable {
    entries: HashMap<PageId, PageTableEntry>,
}

impl PageTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, page_id: PageId) -> Option<&PageTableEntry> {
        self.entries.get(&page_id)
    }

    /// Returns the frame of a resident page.
    pub fn resident_frame(&self, page_id: PageId) -> Option<FrameId> {
        self.entries
            .get(&page_id)
            .filter(|entry| entry.valid)
            .map(|entry| entry.frame)
    }

    /// Records `page_id` as resident in `frame`.
    pub fn map(&mut self, page_id: PageId, frame: FrameId) {
        self.entries
            .insert(page_id, PageTableEntry { frame, valid: true });
    }

    /// Marks a page evicted, returning the frame it occupied.
    pub fn invalidate(&mut self, page_id: PageId) -> Option<FrameId> {
        let entry = self.entries.get_mut(&page_id)?;
        entry.valid = false;
        Some(entry.frame)
    }

    /// Number of pages ever loaded since the last clear.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalidate_keeps_entry() {
        let mut table = PageTable::new();
        table.map(PageId(1), 2);
        assert_eq!(table.resident_frame(PageId(1)), Some(2));

        assert_eq!(table.invalidate(PageId(1)), Some(2));
        assert_eq!(table.resident_frame(PageId(1)), None);
        assert_eq!(
            table.get(PageId(1)),
            Some(&PageTableEntry {
                frame: 2,
                valid: false
            })
        );
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_remap_after_eviction() {
        let mut table = PageTable::new();
        table.map(PageId(4), 0);
        table.invalidate(PageId(4));
        table.map(PageId(4), 3);
        assert_eq!(table.resident_frame(PageId(4)), Some(3));
        assert_eq!(table.invalidate(PageId(8)), None);
    }
}
