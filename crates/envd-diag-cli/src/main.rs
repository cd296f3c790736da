//! envd-diag CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use envd_diag::EnvdDiagError;
use envd_diag_cli::{Args, error_adapter::ErrorAdapter};

fn main() {
    // Install miette's pretty panic hook early for better panic reports
    miette::set_panic_hook();

    // Arguments decide the log level, so they come before the logger
    let args = Args::parse();
    init_logger(&args.log_level);

    info!("Starting envd-diag");
    debug!(args:?; "Parsed arguments");

    if let Err(err) = envd_diag_cli::run(&args) {
        error!("Failed\n{}", render_error(&err));
        process::exit(1);
    }

    info!("Completed successfully");
}

/// Initialize env_logger, falling back to `warn` for an unknown level name.
fn init_logger(level: &str) {
    let log_level = LevelFilter::from_str(level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {level}. Using 'warn' instead.");
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    debug!(log_level:?; "Logger initialized");
}

/// Render a tool error as a miette report.
fn render_error(err: &EnvdDiagError) -> String {
    let reporter = miette::GraphicalReportHandler::new();
    let mut writer = String::new();
    reporter
        .render_report(&mut writer, &ErrorAdapter(err))
        .expect("Writing to String buffer is infallible");
    writer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_includes_code_and_message() {
        let err = EnvdDiagError::Config("Missing configuration file: x.toml".to_string());

        let rendered = render_error(&err);

        assert!(rendered.contains("envd_diag::config"));
        assert!(rendered.contains("Missing configuration file: x.toml"));
    }
}
