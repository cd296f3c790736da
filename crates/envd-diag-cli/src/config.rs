//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use envd_diag::{EnvdDiagError, config::AppConfig};

/// Local configuration path, relative to the working directory
const LOCAL_CONFIG: &str = "envd-diag/config.toml";

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for EnvdDiagError {
    fn from(err: ConfigError) -> Self {
        EnvdDiagError::Config(err.to_string())
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (envd-diag/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Arguments
///
/// * `explicit_path` - Optional path given with `--config`
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, EnvdDiagError> {
    // 1. An explicit path must exist, so it is loaded without a fallback
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    // 2. A config next to the envd project wins over the user's config
    let local_config = Path::new(LOCAL_CONFIG);
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    // 3. The user's config directory
    match system_config_path() {
        Some(path) if path.exists() => {
            info!(path = path.display().to_string(); "Loading configuration from system path");
            return load_config_file(path);
        }
        Some(path) => {
            debug!(path = path.display().to_string(); "System configuration file not found");
        }
        None => debug!("Could not determine platform-specific config directory"),
    }

    // 4. Defaults
    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Path of `config.toml` in the platform's config directory for envd-diag.
fn system_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "envd", "envd-diag")
        .map(|proj_dirs| proj_dirs.config_dir().join("config.toml"))
}

/// Load configuration from a TOML file
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Errors
///
/// Returns error if:
/// - File doesn't exist
/// - File cannot be read
/// - TOML parsing fails
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, EnvdDiagError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    debug!(path = path.display().to_string(), bytes = content.len(); "Read configuration file");

    // Unknown keys are accepted; missing sections take their defaults
    toml::from_str::<AppConfig>(&content)
        .map_err(|e| EnvdDiagError::from(ConfigError::Parse(e.to_string())))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use envd_diag::{Severity, config::OutputFormat};

    use super::*;

    #[test]
    fn test_explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[diagnostics]\nseverity = \"warning\"\n\n[output]\nformat = \"json\"\n",
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();

        assert_eq!(config.diagnostics.severity, Severity::Warning);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let err = load_config(Some(&path)).unwrap_err();

        match err {
            EnvdDiagError::Config(message) => {
                assert!(message.starts_with("Missing configuration file"));
            }
            other => panic!("Expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[diagnostics]\nsource = \"envd-lsp\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();

        assert_eq!(config.diagnostics.source, "envd-lsp");
        assert_eq!(config.diagnostics.severity, Severity::Error);
        assert_eq!(config.output.format, OutputFormat::Human);
    }

    #[test]
    fn test_system_config_path_names_config_toml() {
        if let Some(path) = system_config_path() {
            assert!(path.ends_with("config.toml"));
        }
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[output]\nformat = 42\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err();

        match err {
            EnvdDiagError::Config(message) => {
                assert!(message.starts_with("Failed to parse TOML configuration"));
            }
            other => panic!("Expected Config error, got {other:?}"),
        }
    }
}
