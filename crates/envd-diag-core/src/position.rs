//! Zero-based editor coordinates.

use std::fmt;

use serde::Serialize;

/// A zero-based line/character pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    line: u32,
    character: u32,
}

impl Position {
    /// Create a new position from zero-based coordinates.
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }

    /// Get the zero-based line.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Get the zero-based character offset within the line.
    pub fn character(&self) -> u32 {
        self.character
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.character)
    }
}

/// A half-open range between two positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Range {
    start: Position,
    end: Position,
}

impl Range {
    /// Create a range from two positions.
    ///
    /// The positions are ordered so that `start <= end`.
    pub fn new(a: Position, b: Position) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// Create an empty range at a single position.
    pub fn at(position: Position) -> Self {
        Self::new(position, position)
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    /// Returns `true` if the range covers no characters.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_at_is_empty() {
        let range = Range::at(Position::new(3, 6));

        assert!(range.is_empty());
        assert_eq!(range.start(), range.end());
    }

    #[test]
    fn test_range_new_orders_positions() {
        let range = Range::new(Position::new(5, 0), Position::new(2, 9));

        assert_eq!(range.start(), Position::new(2, 9));
        assert_eq!(range.end(), Position::new(5, 0));
        assert!(!range.is_empty());
    }

    #[test]
    fn test_position_ordering_is_line_major() {
        assert!(Position::new(1, 50) < Position::new(2, 0));
        assert!(Position::new(2, 1) > Position::new(2, 0));
    }
}
