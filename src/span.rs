//! Source spans for diagnostics and navigation
//!
//! A `Span` is a half-open `[start, end)` byte-offset range into the source
//! text being analyzed. Spans are attached to every segment, expression node,
//! and issue so editor layers can surface exact locations.

use serde::Serialize;
use std::fmt;

/// A half-open `[start, end)` byte-offset range into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    /// Byte offset of the first character in the span.
    pub start: usize,
    /// Byte offset one past the last character in the span.
    pub end: usize,
}

impl Span {
    /// Create a new span. `end` must not be less than `start`.
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(end >= start, "span end ({}) < start ({})", end, start);
        Self { start, end }
    }

    /// Create a zero-width span anchored at `index`.
    pub fn empty(index: usize) -> Self {
        Self::new(index, index)
    }

    /// The number of bytes covered by this span.
    pub fn length(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span covers no characters.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `index` falls inside the span (`start <= index < end`).
    pub fn contains_index(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }

    /// The smallest span covering both `self` and `other`.
    pub fn merge(&self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_length() {
        assert_eq!(Span::new(3, 8).length(), 5);
        assert_eq!(Span::empty(4).length(), 0);
    }

    #[test]
    fn test_contains_index() {
        let span = Span::new(2, 5);
        assert!(!span.contains_index(1));
        assert!(span.contains_index(2));
        assert!(span.contains_index(4));
        assert!(!span.contains_index(5));

        // A zero-width span contains nothing.
        assert!(!Span::empty(3).contains_index(3));
    }

    #[test]
    fn test_merge() {
        assert_eq!(Span::new(1, 4).merge(Span::new(3, 9)), Span::new(1, 9));
        assert_eq!(Span::new(5, 7).merge(Span::empty(2)), Span::new(2, 7));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Span::new(0, 12)), "[0, 12)");
    }
}
