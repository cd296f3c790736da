//! Editor diagnostics built from parsed envd errors.
//!
//! Every [`SourceLocation`] in a [`ParseResult`] becomes one [`Diagnostic`]
//! positioned at the zero-based equivalent of its line and column. The set
//! holds at most one diagnostic per file; when a file appears several times
//! in a traceback, its last location wins.

use indexmap::IndexMap;
use serde::{Serialize, Serializer, ser::SerializeStruct};

use envd_diag_core::{ParseResult, Range, Severity, SourceLocation};

use crate::config::DiagnosticsConfig;

/// A single diagnostic attached to a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    path: String,
    range: Range,
    message: String,
    severity: Severity,
    source: String,
}

impl Diagnostic {
    /// Create a diagnostic at an envd location.
    pub fn from_location(
        location: &SourceLocation,
        message: impl Into<String>,
        severity: Severity,
        source: impl Into<String>,
    ) -> Self {
        Self {
            path: location.path().to_string(),
            range: Range::at(location.to_position()),
            message: message.into(),
            severity,
            source: source.into(),
        }
    }

    /// Get the path of the file this diagnostic belongs to.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Get the zero-based range.
    pub fn range(&self) -> Range {
        self.range
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the label of the tool that produced this diagnostic.
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Diagnostics keyed by file, in the order files were first reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticSet {
    message: String,
    by_path: IndexMap<String, Diagnostic>,
}

impl DiagnosticSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the set for one parse result.
    ///
    /// All diagnostics share the result's message. A later location in the
    /// same file replaces the earlier one but keeps the file's position.
    pub fn from_parse_result(result: &ParseResult, config: &DiagnosticsConfig) -> Self {
        let mut by_path = IndexMap::new();
        for location in result.locations() {
            let diagnostic = Diagnostic::from_location(
                location,
                result.message(),
                config.severity,
                config.source.as_str(),
            );
            by_path.insert(location.path().to_string(), diagnostic);
        }

        Self {
            message: result.message().to_string(),
            by_path,
        }
    }

    /// Get the message of the parse result the set was built from.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the diagnostic for a file, if any.
    pub fn get(&self, path: &str) -> Option<&Diagnostic> {
        self.by_path.get(path)
    }

    /// Iterate over diagnostics in first-reported file order.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.by_path.values()
    }

    /// Number of files with a diagnostic.
    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }

    /// Remove every diagnostic and the message.
    pub fn clear(&mut self) {
        self.message.clear();
        self.by_path.clear();
    }
}

impl Serialize for DiagnosticSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let diagnostics: Vec<&Diagnostic> = self.iter().collect();

        let mut state = serializer.serialize_struct("DiagnosticSet", 2)?;
        state.serialize_field("message", &self.message)?;
        state.serialize_field("diagnostics", &diagnostics)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use envd_diag_core::Position;

    use super::*;

    fn result_with(message: &str, locations: &[(&str, u32, u32)]) -> ParseResult {
        ParseResult::new(
            message,
            locations
                .iter()
                .map(|(path, line, column)| SourceLocation::new(*path, *line, *column))
                .collect(),
        )
    }

    #[test]
    fn test_empty_result_gives_empty_set() {
        let set = DiagnosticSet::from_parse_result(&ParseResult::empty(), &DiagnosticsConfig::default());

        assert!(set.is_empty());
        assert_eq!(set.message(), "");
    }

    #[test]
    fn test_positions_are_zero_based() {
        let result = result_with("undefined: dc", &[("/tmp/Tiltfile", 7, 19)]);
        let set = DiagnosticSet::from_parse_result(&result, &DiagnosticsConfig::default());

        let diag = set.get("/tmp/Tiltfile").unwrap();
        assert_eq!(diag.range(), Range::at(Position::new(6, 18)));
        assert!(diag.range().is_empty());
        assert_eq!(diag.message(), "undefined: dc");
        assert!(diag.severity().is_error());
        assert_eq!(diag.source(), "envd");
    }

    #[test]
    fn test_one_diagnostic_per_file() {
        let result = result_with(
            "Error: cannot load Tiltfile.inc",
            &[("Tiltfile", 1, 1), ("Tiltfile.inc", 4, 7)],
        );
        let set = DiagnosticSet::from_parse_result(&result, &DiagnosticsConfig::default());

        assert_eq!(set.len(), 2);
        let paths: Vec<_> = set.iter().map(Diagnostic::path).collect();
        assert_eq!(paths, vec!["Tiltfile", "Tiltfile.inc"]);
    }

    #[test]
    fn test_last_location_in_same_file_wins() {
        let result = result_with(
            "Error: boom",
            &[("Tiltfile", 1, 1), ("lib.star", 2, 2), ("Tiltfile", 9, 3)],
        );
        let set = DiagnosticSet::from_parse_result(&result, &DiagnosticsConfig::default());

        assert_eq!(set.len(), 2);
        assert_eq!(
            set.get("Tiltfile").unwrap().range().start(),
            Position::new(8, 2)
        );
        let paths: Vec<_> = set.iter().map(Diagnostic::path).collect();
        assert_eq!(paths, vec!["Tiltfile", "lib.star"]);
    }

    #[test]
    fn test_config_controls_severity_and_source() {
        let config = DiagnosticsConfig {
            severity: Severity::Warning,
            source: "tilt".to_string(),
        };
        let result = result_with("x", &[("Tiltfile", 1, 1)]);
        let set = DiagnosticSet::from_parse_result(&result, &config);

        let diag = set.get("Tiltfile").unwrap();
        assert!(diag.severity().is_warning());
        assert_eq!(diag.source(), "tilt");
    }

    #[test]
    fn test_clear() {
        let result = result_with("x", &[("Tiltfile", 1, 1)]);
        let mut set = DiagnosticSet::from_parse_result(&result, &DiagnosticsConfig::default());

        set.clear();

        assert!(set.is_empty());
        assert_eq!(set.message(), "");
    }

    #[test]
    fn test_serialize_as_list() {
        let result = result_with("undefined: dc", &[("Tiltfile", 2, 3)]);
        let set = DiagnosticSet::from_parse_result(&result, &DiagnosticsConfig::default());

        let json = serde_json::to_value(&set).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "message": "undefined: dc",
                "diagnostics": [{
                    "path": "Tiltfile",
                    "range": {
                        "start": { "line": 1, "character": 2 },
                        "end": { "line": 1, "character": 2 },
                    },
                    "message": "undefined: dc",
                    "severity": "error",
                    "source": "envd",
                }],
            })
        );
    }
}
