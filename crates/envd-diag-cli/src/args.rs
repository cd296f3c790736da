//! Command-line argument definitions for the envd-diag CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the input source, stream mode, report
//! format, configuration file selection, and logging verbosity.

use clap::{Parser, ValueEnum};

use envd_diag::config::OutputFormat;

/// Command-line arguments for the envd-diag tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to a file with envd error output
    #[arg(help = "Path to the input file; reads stdin when omitted or `-`")]
    pub input: Option<String>,

    /// Treat the input as a session stream of JSON documents, one per line
    #[arg(short, long)]
    pub watch: bool,

    /// Report format, overriding the configuration file
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Returns `true` if the input should be read from stdin.
    pub fn reads_stdin(&self) -> bool {
        self.input.as_deref().is_none_or(|input| input == "-")
    }
}

/// Report format as spelled on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Human,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Human => OutputFormat::Human,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["envd-diag"]);

        assert!(args.reads_stdin());
        assert!(!args.watch);
        assert!(args.format.is_none());
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_dash_reads_stdin() {
        let args = Args::parse_from(["envd-diag", "-"]);

        assert!(args.reads_stdin());
    }

    #[test]
    fn test_all_flags() {
        let args = Args::parse_from([
            "envd-diag",
            "errors.txt",
            "--watch",
            "--format",
            "json",
            "--config",
            "envd-diag.toml",
            "--log-level",
            "debug",
        ]);

        assert!(!args.reads_stdin());
        assert!(args.watch);
        assert_eq!(args.format, Some(FormatArg::Json));
        assert_eq!(args.config.as_deref(), Some("envd-diag.toml"));
        assert_eq!(OutputFormat::from(FormatArg::Json), OutputFormat::Json);
    }
}
