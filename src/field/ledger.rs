//! Token ledger: the ordered table of token boundaries over the text buffer.
//!
//! Only end offsets are stored. Token `i` spans `[end(i-1), end(i))`, and the
//! first token starts at the ledger origin (the end of the fixed prefix), so
//! ranges are contiguous and non-overlapping by construction. The ledger never
//! touches the buffer; callers mutate the buffer to match.

use std::ops::Range;

/// Ordered table of token end boundaries, in UTF-16 code units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenLedger {
    /// Where the first token starts
    origin: usize,
    /// End offset of each token, strictly ascending
    ends: Vec<usize>,
}

impl TokenLedger {
    pub fn new(origin: usize) -> Self {
        Self {
            origin,
            ends: Vec::new(),
        }
    }

    /// Offset where the first token starts
    pub fn origin(&self) -> usize {
        self.origin
    }

    /// Number of tokens
    pub fn len(&self) -> usize {
        self.ends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ends.is_empty()
    }

    /// End of the last token, or the origin when there are no tokens.
    /// A new token always starts here.
    pub fn last_end(&self) -> usize {
        self.ends.last().copied().unwrap_or(self.origin)
    }

    /// All end boundaries in ascending order
    pub fn ends(&self) -> &[usize] {
        &self.ends
    }

    /// Record a new token ending at `end`; it starts at the previous last end.
    pub fn append(&mut self, end: usize) {
        debug_assert!(
            end > self.last_end(),
            "boundary {} must lie after {}",
            end,
            self.last_end()
        );
        self.ends.push(end);
    }

    /// Range of the token at `index`.
    ///
    /// Panics if `index` is out of bounds: indices must come from the current
    /// ledger snapshot.
    pub fn range_of(&self, index: usize) -> Range<usize> {
        assert!(
            index < self.ends.len(),
            "token index {} out of bounds (ledger holds {})",
            index,
            self.ends.len()
        );
        self.start_of(index)..self.ends[index]
    }

    fn start_of(&self, index: usize) -> usize {
        if index == 0 {
            self.origin
        } else {
            self.ends[index - 1]
        }
    }

    /// Iterate every token range in order
    pub fn ranges(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        (0..self.ends.len()).map(|i| self.start_of(i)..self.ends[i])
    }

    /// Remove the token at `index`, returning the range it occupied.
    ///
    /// Every later boundary shifts left by the removed length, so index
    /// `index` afterwards refers to what was `index + 1`.
    pub fn remove_at(&mut self, index: usize) -> Range<usize> {
        let range = self.range_of(index);
        self.ends.remove(index);
        let removed = range.len();
        for end in &mut self.ends[index..] {
            *end -= removed;
        }
        range
    }

    /// Index of the token whose range contains `offset`.
    ///
    /// Offsets before the origin, at or after the last boundary (pending
    /// input), are contained in no token. Upper ends are exclusive.
    pub fn index_containing(&self, offset: usize) -> Option<usize> {
        let last = *self.ends.last()?;
        if offset < self.origin || offset >= last {
            return None;
        }
        Some(self.ends.partition_point(|&end| end <= offset))
    }

    /// Drop every token
    pub fn clear(&mut self) {
        self.ends.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger(origin: usize, ends: &[usize]) -> TokenLedger {
        let mut ledger = TokenLedger::new(origin);
        for &end in ends {
            ledger.append(end);
        }
        ledger
    }

    #[test]
    fn test_empty_ledger() {
        let l = TokenLedger::new(3);
        assert!(l.is_empty());
        assert_eq!(l.last_end(), 3);
        assert_eq!(l.index_containing(3), None);
        assert_eq!(l.index_containing(0), None);
    }

    #[test]
    fn test_append_ranges() {
        let l = ledger(3, &[6, 9, 15]);
        assert_eq!(l.range_of(0), 3..6);
        assert_eq!(l.range_of(1), 6..9);
        assert_eq!(l.range_of(2), 9..15);
        assert_eq!(l.ranges().collect::<Vec<_>>(), vec![3..6, 6..9, 9..15]);
    }

    #[test]
    fn test_index_containing() {
        let l = ledger(3, &[6, 9]);
        assert_eq!(l.index_containing(2), None); // inside the prefix
        assert_eq!(l.index_containing(3), Some(0));
        assert_eq!(l.index_containing(5), Some(0));
        assert_eq!(l.index_containing(6), Some(1)); // boundary opens the next token
        assert_eq!(l.index_containing(8), Some(1));
        assert_eq!(l.index_containing(9), None); // last boundary is exclusive
        assert_eq!(l.index_containing(42), None);
    }

    #[test]
    fn test_remove_last() {
        let mut l = ledger(3, &[6, 9]);
        assert_eq!(l.remove_at(1), 6..9);
        assert_eq!(l.ends(), &[6]);
        assert_eq!(l.last_end(), 6);
    }

    #[test]
    fn test_remove_interior_shifts_later_boundaries() {
        let mut l = ledger(3, &[6, 12, 16]);
        assert_eq!(l.remove_at(1), 6..12);
        assert_eq!(l.ends(), &[6, 10]);
        assert_eq!(l.range_of(1), 6..10);
    }

    #[test]
    fn test_remove_first() {
        let mut l = ledger(3, &[6, 9]);
        assert_eq!(l.remove_at(0), 3..6);
        assert_eq!(l.ends(), &[6]);
        assert_eq!(l.range_of(0), 3..6);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_range_of_invalid_index_panics() {
        let l = ledger(3, &[6]);
        let _ = l.range_of(1);
    }
}
