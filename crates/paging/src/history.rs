use std::collections::VecDeque;

use common::PageId;

/// Number of accesses retained by [`AccessHistory`].
pub const HISTORY_CAPACITY: usize = 100;

/// Bounded log of the most recent page accesses.
///
/// Pushing onto a full history drops the oldest entry. Positions are counted
/// from the oldest retained entry, so they shift down by one every time an
/// entry falls off the front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessHistory {
    entries: VecDeque<PageId>,
    capacity: usize,
}

impl AccessHistory {
    /// Creates an empty history holding at most `capacity` accesses.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends an access, evicting the oldest one when full.
    pub fn push(&mut self, page_id: PageId) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(page_id);
    }

    /// Iterates from the newest access to the oldest.
    pub fn iter_newest(&self) -> impl Iterator<Item = PageId> + '_ {
        self.entries.iter().rev().copied()
    }

    /// Position of the most recent access to `page_id`, counted from the
    /// oldest retained entry.
    pub fn last_position(&self, page_id: PageId) -> Option<usize> {
        self.iter_newest()
            .position(|entry| entry == page_id)
            .map(|from_newest| self.entries.len() - 1 - from_newest)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for AccessHistory {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::pages;

    #[test]
    fn test_last_position_prefers_newest() {
        let mut history = AccessHistory::default();
        for page in pages(&[1, 2, 3, 1]) {
            history.push(page);
        }
        assert_eq!(history.last_position(PageId(1)), Some(3));
        assert_eq!(history.last_position(PageId(2)), Some(1));
        assert_eq!(history.last_position(PageId(9)), None);
    }

    #[test]
    fn test_drops_oldest_when_full() {
        let mut history = AccessHistory::with_capacity(3);
        for page in pages(&[1, 2, 3, 4]) {
            history.push(page);
        }
        assert_eq!(history.len(), 3);
        assert_eq!(
            history.iter_newest().collect::<Vec<_>>(),
            pages(&[4, 3, 2])
        );
        assert_eq!(history.last_position(PageId(1)), None);
        assert_eq!(history.last_position(PageId(2)), Some(0));
    }

    #[test]
    fn test_default_capacity_is_one_hundred() {
        let mut history = AccessHistory::default();
        for number in 0..150 {
            history.push(PageId(number));
        }
        assert_eq!(history.capacity(), HISTORY_CAPACITY);
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.last_position(PageId(49)), None);
        assert_eq!(history.last_position(PageId(50)), Some(0));
        assert_eq!(history.iter_newest().next(), Some(PageId(149)));
    }

    #[test]
    fn test_clear() {
        let mut history = AccessHistory::default();
        history.push(PageId(1));
        history.clear();
        assert!(history.is_empty());
    }
}
