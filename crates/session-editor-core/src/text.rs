//! Char-offset splicing over a session buffer.
//!
//! Offsets are inclusive character indices (Unicode scalar values), never bytes. Splicing goes
//! through a [`Rope`] so multi-byte text is never cut in the middle of a character.

use crate::error::EngineError;
use ropey::Rope;

/// Inclusive character range `[start, end]`.
///
/// Constructed through [`CharRange::new`], which swaps the bounds when they are given out of
/// order, so `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CharRange {
    /// First character covered by the range.
    pub start: usize,
    /// Last character covered by the range.
    pub end: usize,
}

impl CharRange {
    /// Create a normalized range.
    pub fn new(start: usize, end: usize) -> Self {
        if start > end {
            Self {
                start: end,
                end: start,
            }
        } else {
            Self { start, end }
        }
    }

    /// Number of characters covered.
    pub fn len(self) -> usize {
        self.end - self.start + 1
    }

    /// Whether the range addresses a single offset (`start == end`).
    pub fn is_single(self) -> bool {
        self.start == self.end
    }

    /// Check that both bounds address an existing character of a buffer of `len` chars.
    pub fn check_within(self, len: usize) -> Result<(), EngineError> {
        if self.end < len {
            Ok(())
        } else {
            Err(self.out_of_range(len))
        }
    }

    /// Like [`CharRange::check_within`], but an empty buffer accepts the insertion point `(0, 0)`.
    pub fn check_paste_within(self, len: usize) -> Result<(), EngineError> {
        if len == 0 && self.start == 0 && self.end == 0 {
            return Ok(());
        }
        self.check_within(len)
    }

    fn out_of_range(self, len: usize) -> EngineError {
        EngineError::IndexOutOfRange {
            start: self.start,
            end: self.end,
            len,
        }
    }
}

/// Length of `text` in characters.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Characters of `text` covered by `range`.
///
/// The range must already be checked against `text`.
pub fn slice(text: &str, range: CharRange) -> String {
    Rope::from_str(text)
        .slice(range.start..=range.end)
        .to_string()
}

/// `text` with the characters covered by `range` removed.
pub fn remove(text: &str, range: CharRange) -> String {
    let mut rope = Rope::from_str(text);
    rope.remove(range.start..=range.end);
    rope.to_string()
}

/// `text` with `insert` pasted at `range`.
///
/// A single-offset range inserts before the character at `start`, except on the last character
/// where the text is appended after it. A wider range is replaced by `insert`.
pub fn paste(text: &str, range: CharRange, insert: &str) -> String {
    let mut rope = Rope::from_str(text);
    if range.is_single() {
        let len = rope.len_chars();
        let at = if len > 0 && range.start == len - 1 {
            len
        } else {
            range.start
        };
        rope.insert(at, insert);
    } else {
        rope.remove(range.start..=range.end);
        rope.insert(range.start, insert);
    }
    rope.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_normalizes_reversed_bounds() {
        let range = CharRange::new(5, 2);
        assert_eq!(range, CharRange { start: 2, end: 5 });
        assert_eq!(range.len(), 4);
    }

    #[test]
    fn test_paste_single_offset_positions() {
        assert_eq!(paste("", CharRange::new(0, 0), "AB"), "AB");
        assert_eq!(paste("HELLO", CharRange::new(0, 0), ">"), ">HELLO");
        assert_eq!(paste("HELLO", CharRange::new(2, 2), "-"), "HE-LLO");
        assert_eq!(paste("HELLO", CharRange::new(4, 4), "!"), "HELLO!");
        // A one-character buffer appends: offset 0 is also the last character.
        assert_eq!(paste("A", CharRange::new(0, 0), "B"), "AB");
    }

    #[test]
    fn test_paste_replaces_wide_range() {
        assert_eq!(paste("AB", CharRange::new(0, 1), "X"), "X");
        assert_eq!(paste("HELLO", CharRange::new(1, 3), "ipp"), "HippO");
    }

    #[test]
    fn test_remove_and_slice_are_char_based() {
        let text = "añb日c";
        assert_eq!(slice(text, CharRange::new(1, 3)), "ñb日");
        assert_eq!(remove(text, CharRange::new(1, 3)), "ac");
        assert_eq!(char_len(text), 5);
    }

    #[test]
    fn test_range_checks() {
        assert!(CharRange::new(0, 4).check_within(5).is_ok());
        assert_eq!(
            CharRange::new(2, 5).check_within(5),
            Err(EngineError::IndexOutOfRange {
                start: 2,
                end: 5,
                len: 5
            })
        );
        assert!(CharRange::new(0, 0).check_within(0).is_err());
        assert!(CharRange::new(0, 0).check_paste_within(0).is_ok());
        assert!(CharRange::new(0, 1).check_paste_within(0).is_err());
    }
}
