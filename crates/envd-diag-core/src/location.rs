//! Source locations reported by envd and the parse result that carries them.

use std::fmt;

use serde::Serialize;

use crate::position::Position;

/// A `path:line:col` location extracted from envd output.
///
/// Both `line` and `column` are 1-based and always at least 1; the parser
/// only constructs locations from tokens whose numeric fields have no
/// leading zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SourceLocation {
    path: String,
    line: u32,
    #[serde(rename = "col")]
    column: u32,
}

impl SourceLocation {
    /// Create a new location.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `line` or `column` is zero.
    pub fn new(path: impl Into<String>, line: u32, column: u32) -> Self {
        debug_assert!(line >= 1, "line numbers are 1-based");
        debug_assert!(column >= 1, "column numbers are 1-based");
        Self {
            path: path.into(),
            line,
            column,
        }
    }

    /// Get the file path as written by the tool.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Get the 1-based line number.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Get the 1-based column number.
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Convert to the zero-based position used by editors.
    pub fn to_position(&self) -> Position {
        Position::new(self.line.saturating_sub(1), self.column.saturating_sub(1))
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.path, self.line, self.column)
    }
}

/// The structured form of one envd error.
///
/// `message` is the error text with the leading location frames removed and
/// may be empty. `locations` preserves the order in which the locations
/// appeared in the input, outermost frame first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    message: String,
    locations: Vec<SourceLocation>,
}

impl ParseResult {
    /// Create a result from a message and its locations.
    pub fn new(message: impl Into<String>, locations: Vec<SourceLocation>) -> Self {
        Self {
            message: message.into(),
            locations,
        }
    }

    /// The result for input that matched no known error shape.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Get the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the locations in order of appearance.
    pub fn locations(&self) -> &[SourceLocation] {
        &self.locations
    }

    /// Returns `true` if neither a message nor a location was recognized.
    pub fn is_empty(&self) -> bool {
        self.message.is_empty() && self.locations.is_empty()
    }
}
