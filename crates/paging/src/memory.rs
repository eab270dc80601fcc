use common::{FrameId, PageId};

/// Fixed set of frames, each empty or holding one page.
///
/// Frames are handed out in index order (0, 1, 2, ...) and never freed
/// individually; a replacement overwrites the slot in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhysicalMemory {
    slots: Vec<Option<PageId>>,
    occupied: usize,
}

impl PhysicalMemory {
    /// Creates a memory with `total_frames` empty frames.
    pub fn new(total_frames: usize) -> Self {
        Self {
            slots: vec![None; total_frames],
            occupied: 0,
        }
    }

    /// Returns the number of frames.
    pub fn total_frames(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of frames holding a page.
    pub fn occupied(&self) -> usize {
        self.occupied
    }

    pub fn is_full(&self) -> bool {
        self.occupied == self.slots.len()
    }

    /// Lowest frame that has never been filled.
    pub fn next_free(&self) -> Option<FrameId> {
        (!self.is_full()).then_some(self.occupied)
    }

    /// Returns the page held by `frame_id`.
    pub fn page_at(&self, frame_id: FrameId) -> Option<PageId> {
        self.slots.get(frame_id).copied().flatten()
    }

    /// Places `page_id` into the next free frame.
    pub fn load(&mut self, page_id: PageId) -> Option<FrameId> {
        let frame_id = self.next_free()?;
        self.slots[frame_id] = Some(page_id);
        self.occupied += 1;
        Some(frame_id)
    }

    /// Overwrites an occupied frame, returning the page it held.
    pub fn replace(&mut self, frame_id: FrameId, page_id: PageId) -> Option<PageId> {
        let slot = self.slots.get_mut(frame_id)?;
        slot.replace(page_id)
    }

    /// Iterates over resident pages in frame order.
    pub fn resident(&self) -> impl Iterator<Item = (FrameId, PageId)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(frame_id, slot)| slot.map(|page_id| (frame_id, page_id)))
    }

    /// Returns every slot, empty ones included.
    pub fn slots(&self) -> &[Option<PageId>] {
        &self.slots
    }

    /// Empties every frame.
    pub fn reset(&mut self) {
        self.slots.fill(None);
        self.occupied = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fills_frames_in_index_order() {
        let mut memory = PhysicalMemory::new(2);
        assert_eq!(memory.load(PageId(7)), Some(0));
        assert_eq!(memory.load(PageId(3)), Some(1));
        assert!(memory.is_full());
        assert_eq!(memory.load(PageId(4)), None);
        assert_eq!(
            memory.resident().collect::<Vec<_>>(),
            vec![(0, PageId(7)), (1, PageId(3))]
        );
    }

    #[test]
    fn test_replace_keeps_slot() {
        let mut memory = PhysicalMemory::new(2);
        memory.load(PageId(1));
        memory.load(PageId(2));
        assert_eq!(memory.replace(0, PageId(5)), Some(PageId(1)));
        assert_eq!(memory.page_at(0), Some(PageId(5)));
        assert_eq!(memory.occupied(), 2);
        assert_eq!(memory.replace(9, PageId(6)), None);
    }

    #[test]
    fn test_reset() {
        let mut memory = PhysicalMemory::new(3);
        memory.load(PageId(1));
        memory.reset();
        assert_eq!(memory.occupied(), 0);
        assert_eq!(memory.slots(), &[None, None, None]);
        assert_eq!(memory.next_free(), Some(0));
    }
}
