//! Processing of envd session streams.
//!
//! A session stream carries one JSON document per line, each describing the
//! terminated state of the envd update target:
//!
//! ```text
//! {"error": "/tmp/build.envd:3:1: undefined: install", "finishedAt": "..."}
//! ```
//!
//! Every document replaces the current diagnostic set. A document without an
//! `error` clears it. Lines that are not JSON objects are rejected and leave
//! the set unchanged.

use std::io::BufRead;

use log::{debug, info, warn};
use serde::Deserialize;

use crate::{DiagnosticSet, EnvdDiagError, config::DiagnosticsConfig};

/// The part of a terminated state that matters for diagnostics.
#[derive(Debug, Deserialize)]
struct Terminated {
    #[serde(default)]
    error: Option<String>,
}

/// Tracks the diagnostics of a running envd session.
#[derive(Debug, Default)]
pub struct SessionWatcher {
    config: DiagnosticsConfig,
    current: DiagnosticSet,
    line_number: usize,
}

impl SessionWatcher {
    /// Create a watcher that labels diagnostics according to `config`.
    pub fn new(config: DiagnosticsConfig) -> Self {
        Self {
            config,
            current: DiagnosticSet::new(),
            line_number: 0,
        }
    }

    /// Get the diagnostics of the latest document.
    pub fn current(&self) -> &DiagnosticSet {
        &self.current
    }

    /// Process one line of the stream.
    ///
    /// Returns `Ok(None)` for blank lines and the replaced set otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`EnvdDiagError::Session`] if the line is not a JSON document
    /// of the expected shape. The current set is left unchanged.
    pub fn process_line(&mut self, line: &str) -> Result<Option<&DiagnosticSet>, EnvdDiagError> {
        self.line_number += 1;

        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let terminated: Terminated = serde_json::from_str(line)
            .map_err(|err| EnvdDiagError::new_session_error(self.line_number, err))?;

        self.current.clear();
        if let Some(result) = envd_diag_parser::parse(terminated.error.as_deref()) {
            self.current = DiagnosticSet::from_parse_result(&result, &self.config);
        }

        debug!(
            line = self.line_number,
            diagnostics_count = self.current.len();
            "Session diagnostics replaced"
        );

        Ok(Some(&self.current))
    }

    /// Process every line of `reader`, calling `on_update` after each
    /// document.
    ///
    /// Malformed documents are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or `on_update` fails.
    pub fn watch<R, F>(&mut self, reader: R, mut on_update: F) -> Result<(), EnvdDiagError>
    where
        R: BufRead,
        F: FnMut(&DiagnosticSet) -> Result<(), EnvdDiagError>,
    {
        for line in reader.lines() {
            let line = line?;
            match self.process_line(&line) {
                Ok(Some(set)) => on_update(set)?,
                Ok(None) => {}
                Err(err @ EnvdDiagError::Session { .. }) => {
                    warn!(err:%; "Error processing session document");
                }
                Err(err) => return Err(err),
            }
        }

        info!(lines = self.line_number; "Session stream ended");
        Ok(())
    }
}
