use serde::Deserialize;

use crate::Severity;

/// Application configuration loaded from TOML file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Diagnostics configuration section
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,

    /// Output configuration section
    #[serde(default)]
    pub output: OutputConfig,
}

/// Diagnostics configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct DiagnosticsConfig {
    /// Severity attached to every reported diagnostic
    #[serde(default)]
    pub severity: Severity,

    /// Label identifying the producer of the diagnostics
    #[serde(default = "default_source")]
    pub source: String,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            severity: Severity::default(),
            source: default_source(),
        }
    }
}

fn default_source() -> String {
    "envd".to_string()
}

/// Output configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct OutputConfig {
    /// Default report format
    #[serde(default)]
    pub format: OutputFormat,
}

/// How diagnostic sets are reported
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Rendered terminal reports
    #[default]
    Human,
    /// One JSON document per diagnostic set
    Json,
}
