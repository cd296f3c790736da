//! # envd-diag parser
//!
//! Extracts source locations from the error text envd prints when a build
//! file fails to load or evaluate.
//!
//! Two shapes are recognized:
//!
//! - **Simple errors**, a single `path:line:col: message` line.
//! - **Tracebacks**, starting with `Traceback (most recent call last):`,
//!   followed by one frame per line and a trailing message block.
//!
//! ## Usage
//!
//! ```
//! use envd_diag_parser::parse;
//!
//! let result = parse(Some("/private/tmp/scope/Tiltfile:7:19: undefined: dc")).unwrap();
//!
//! assert_eq!(result.message(), "undefined: dc");
//! assert_eq!(result.locations()[0].line(), 7);
//! assert_eq!(result.locations()[0].column(), 19);
//! ```
//!
//! Parsing never fails. Input without a recognizable shape produces an empty
//! [`ParseResult`]; only absent or empty input produces `None`.

mod grammar;
mod traceback;

use std::fmt;

pub use envd_diag_core::{ParseResult, SourceLocation};

pub use traceback::TRACEBACK_HEADER;

/// The shape of an error text, decided by its first line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorShape {
    /// Starts with [`TRACEBACK_HEADER`].
    Traceback,
    /// Anything else; only a leading `path:line:col: message` is recognized.
    Simple,
}

impl ErrorShape {
    /// Classify an error text.
    pub fn of(text: &str) -> Self {
        if text.starts_with(TRACEBACK_HEADER) {
            ErrorShape::Traceback
        } else {
            ErrorShape::Simple
        }
    }
}

impl fmt::Display for ErrorShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorShape::Traceback => write!(f, "traceback"),
            ErrorShape::Simple => write!(f, "simple"),
        }
    }
}

/// Parse envd error text into a message and its source locations.
///
/// Returns `None` when `error` is absent or empty, meaning there is nothing
/// to report. Otherwise returns a result, which is empty when the text
/// matched neither a traceback nor a simple error.
///
/// A traceback whose lines after the header are all frames has no message
/// block. Such text falls back to simple-error matching against the whole
/// input, which a traceback header never satisfies, so the result is empty.
///
/// # Example
///
/// ```
/// use envd_diag_parser::parse;
///
/// let text = "Traceback (most recent call last):
///   /private/tmp/stringlit/Tiltfile:2:2: in <toplevel>
///   /private/tmp/stringlit/Tiltfile.inc:4:7: in f
/// Error: local variable a referenced before assignment";
///
/// let result = parse(Some(text)).unwrap();
/// assert_eq!(result.message(), "Error: local variable a referenced before assignment");
/// assert_eq!(result.locations().len(), 2);
///
/// assert!(parse(None).is_none());
/// assert!(parse(Some("")).is_none());
/// ```
pub fn parse(error: Option<&str>) -> Option<ParseResult> {
    let text = error.filter(|text| !text.is_empty())?;

    if ErrorShape::of(text) == ErrorShape::Traceback {
        if let Some(result) = traceback::parse_traceback(text) {
            return Some(result);
        }
    }

    Some(grammar::simple_error(text).unwrap_or_default())
}
