//! envd-diag - editor diagnostics for envd build errors
//!
//! This library turns the error text envd prints when a build file fails to
//! load or evaluate into per-file diagnostics with zero-based positions, and
//! follows session streams in which each line carries the latest error.

pub mod config;
pub mod diagnostics;
pub mod session;

mod error;

pub use envd_diag_core::{ParseResult, Position, Range, Severity, SourceLocation};
pub use envd_diag_parser::ErrorShape;

pub use diagnostics::{Diagnostic, DiagnosticSet};
pub use error::EnvdDiagError;
pub use session::SessionWatcher;

use log::{debug, info, trace};

use config::AppConfig;

/// Builder for turning envd error text into diagnostics.
///
/// # Examples
///
/// ```
/// use envd_diag::{DiagnosticsBuilder, config::AppConfig};
///
/// let builder = DiagnosticsBuilder::new(AppConfig::default());
///
/// let set = builder.diagnose("/tmp/build.envd:3:1: undefined: install");
/// assert_eq!(set.len(), 1);
///
/// let diag = set.get("/tmp/build.envd").unwrap();
/// assert_eq!(diag.range().start().line(), 2);
/// assert_eq!(diag.range().start().character(), 0);
/// ```
#[derive(Debug, Default)]
pub struct DiagnosticsBuilder {
    config: AppConfig,
}

impl DiagnosticsBuilder {
    /// Create a new builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Get the configuration this builder was created with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse error text into a message and its locations.
    ///
    /// Returns `None` for empty text.
    pub fn parse(&self, text: &str) -> Option<ParseResult> {
        if text.is_empty() {
            debug!("Empty error text, nothing to report");
            return None;
        }

        let shape = ErrorShape::of(text);
        info!(shape:% = shape; "Parsing envd error");
        let result = envd_diag_parser::parse(Some(text))?;
        debug!(locations_count = result.locations().len(); "Error parsed");
        trace!(result:?; "Parse result");
        Some(result)
    }

    /// Parse error text and map its locations to diagnostics.
    pub fn diagnose(&self, text: &str) -> DiagnosticSet {
        self.parse(text)
            .map(|result| DiagnosticSet::from_parse_result(&result, &self.config.diagnostics))
            .unwrap_or_default()
    }

    /// Create a session watcher sharing this builder's diagnostics settings.
    pub fn watcher(&self) -> SessionWatcher {
        SessionWatcher::new(self.config.diagnostics.clone())
    }
}
