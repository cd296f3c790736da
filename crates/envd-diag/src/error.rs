//! Error types for envd-diag operations.
//!
//! Parsing envd output never fails; these errors cover reading input,
//! decoding session documents, and encoding reports.

use std::io;

use thiserror::Error;

/// The main error type for envd-diag operations.
#[derive(Debug, Error)]
pub enum EnvdDiagError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed session document on line {line}: {source}")]
    Session {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EnvdDiagError {
    /// Create a new `Session` error for the given 1-based line number.
    pub fn new_session_error(line: usize, source: serde_json::Error) -> Self {
        Self::Session { line, source }
    }
}
