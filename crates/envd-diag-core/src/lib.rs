//! # envd-diag core
//!
//! Shared value types for the envd diagnostics workspace: source locations
//! extracted from tool output, the parse result that carries them, and the
//! zero-based positions editors expect.

pub mod location;
pub mod position;
pub mod severity;

pub use location::{ParseResult, SourceLocation};
pub use position::{Position, Range};
pub use severity::Severity;
