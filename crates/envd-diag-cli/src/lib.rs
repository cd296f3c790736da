//! CLI logic for the envd-diag tool.
//!
//! This module reads envd error output, or a session stream of terminated
//! states, and reports the resulting diagnostics as rendered terminal
//! reports or JSON.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, FormatArg};

use std::{
    fs,
    io::{self, BufRead, BufReader, Write},
};

use log::{debug, info};

use envd_diag::{DiagnosticSet, DiagnosticsBuilder, EnvdDiagError, config::OutputFormat};

use error_adapter::DiagnosticAdapter;

/// Run the envd-diag CLI application
///
/// Reads the input named by `args` and writes reports to stdout.
///
/// # Errors
///
/// Returns `EnvdDiagError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Report encoding errors
pub fn run(args: &Args) -> Result<(), EnvdDiagError> {
    info!(
        input = args.input.as_deref().unwrap_or("-"),
        watch = args.watch;
        "Processing envd output"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let format = args
        .format
        .map(OutputFormat::from)
        .unwrap_or(app_config.output.format);
    debug!(format:?; "Selected output format");

    let builder = DiagnosticsBuilder::new(app_config);
    let reader: Box<dyn BufRead> = if args.reads_stdin() {
        Box::new(io::stdin().lock())
    } else {
        let path = args.input.as_deref().unwrap_or_default();
        Box::new(BufReader::new(fs::File::open(path)?))
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    process(&builder, format, args.watch, reader, &mut out)?;
    out.flush()?;

    info!("Processing finished");
    Ok(())
}

/// Process `reader` and write one report per diagnostic set to `out`.
///
/// In watch mode every session document yields a report; otherwise the whole
/// input is a single error text.
///
/// # Errors
///
/// Returns `EnvdDiagError` if reading, writing, or JSON encoding fails.
pub fn process<R, W>(
    builder: &DiagnosticsBuilder,
    format: OutputFormat,
    watch: bool,
    mut reader: R,
    out: &mut W,
) -> Result<(), EnvdDiagError>
where
    R: BufRead,
    W: Write,
{
    if watch {
        let mut watcher = builder.watcher();
        return watcher.watch(reader, |set| write_report(set, format, &mut *out));
    }

    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    let set = builder.diagnose(&text);
    write_report(&set, format, out)
}

/// Write a single diagnostic set in the requested format.
fn write_report<W: Write>(
    set: &DiagnosticSet,
    format: OutputFormat,
    out: &mut W,
) -> Result<(), EnvdDiagError> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, set)?;
            writeln!(out)?;
        }
        OutputFormat::Human => {
            if set.is_empty() {
                info!("No diagnostics found");
                return Ok(());
            }
            write!(out, "{}", render_human(set))?;
        }
    }
    Ok(())
}

/// Render every diagnostic of a set with miette's graphical handler.
///
/// Referenced files are read to show a source snippet; unreadable files are
/// reported without one.
fn render_human(set: &DiagnosticSet) -> String {
    let reporter = miette::GraphicalReportHandler::new();
    let mut rendered = String::new();

    for diag in set.iter() {
        let source = fs::read_to_string(diag.path())
            .inspect_err(|err| debug!(path = diag.path(), err:%; "Source not readable"))
            .ok();
        let adapter = DiagnosticAdapter::new(diag, source);
        reporter
            .render_report(&mut rendered, &adapter)
            .expect("Writing to String buffer is infallible");
    }

    rendered
}
