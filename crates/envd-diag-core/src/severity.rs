//! Severity levels for diagnostics.
//!
//! envd only reports failures, so every diagnostic produced from one error
//! shares a single severity chosen by configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The severity level of a diagnostic.
///
/// Severity decides how an editor presents the diagnostic:
/// - [`Severity::Error`] marks the location of a failed build file load
/// - [`Severity::Warning`] shows the same location less prominently
///
/// Configuration names the levels in lowercase (`"error"`, `"warning"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A failure that stopped evaluation of the build file.
    ///
    /// This is the default, matching what envd itself reports.
    #[default]
    Error,

    /// An advisory marker.
    ///
    /// Useful when the diagnostics duplicate errors an editor already
    /// reports from another source.
    Warning,
}

impl Severity {
    /// Returns `true` if this is an error severity.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Returns `true` if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }

    /// The lowercase name used in configuration and JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
