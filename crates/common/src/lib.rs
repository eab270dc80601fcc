//! Identifiers shared by the paging engine and its front-ends.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifies a frame of physical memory.
pub type FrameId = usize;

/// Identifies a page in a reference sequence. Rendered as `P<n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(pub u64);

impl PageId {
    /// Returns the raw page number.
    pub fn number(self) -> u64 {
        self.0
    }
}

impl From<u64> for PageId {
    fn from(number: u64) -> Self {
        PageId(number)
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Accepts both the bare number (`7`) and the rendered form (`P7`).
impl FromStr for PageId {
    type Err = ParseIntError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let digits = trimmed
            .strip_prefix('P')
            .or_else(|| trimmed.strip_prefix('p'))
            .unwrap_or(trimmed);
        digits.parse::<u64>().map(PageId)
    }
}

/// Builds a reference sequence from raw page numbers.
pub fn pages(numbers: &[u64]) -> Vec<PageId> {
    numbers.iter().copied().map(PageId).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_with_page_prefix() {
        assert_eq!(PageId(5).to_string(), "P5");
    }

    #[test]
    fn parses_bare_and_prefixed_numbers() {
        assert_eq!("7".parse::<PageId>(), Ok(PageId(7)));
        assert_eq!(" P12 ".parse::<PageId>(), Ok(PageId(12)));
        assert_eq!("p3".parse::<PageId>(), Ok(PageId(3)));
        assert!("P".parse::<PageId>().is_err());
        assert!("-1".parse::<PageId>().is_err());
        assert!("Q4".parse::<PageId>().is_err());
    }

    #[test]
    fn builds_sequence_from_numbers() {
        let numbers = pages(&[1, 2]);
        assert_eq!(numbers, vec![PageId(1), PageId(2)]);
    }
}
