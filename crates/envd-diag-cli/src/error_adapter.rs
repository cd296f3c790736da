//! Adapters for rendering envd diagnostics and errors with miette.
//!
//! This module provides the bridge between the library's diagnostic and
//! error types and miette's rich report formatting used in the CLI.
//!
//! # Source snippets
//!
//! A [`DiagnosticAdapter`] shows a snippet of the referenced file when its
//! contents are supplied and the diagnostic's position falls inside them.
//! Otherwise the report names the file and position in its help text.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, NamedSource, SourceSpan};

use envd_diag::{Diagnostic, EnvdDiagError, Position, Severity};

/// Adapter for a single envd diagnostic.
pub struct DiagnosticAdapter<'a> {
    /// The wrapped diagnostic
    diag: &'a Diagnostic,
    /// Contents of the referenced file, named after its path
    src: Option<NamedSource<String>>,
    /// Byte offset of the diagnostic's position within `src`
    offset: Option<usize>,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create a new diagnostic adapter.
    ///
    /// `source` is the content of the file at the diagnostic's path, if it
    /// could be read.
    pub fn new(diag: &'a Diagnostic, source: Option<String>) -> Self {
        let offset = source
            .as_deref()
            .and_then(|src| offset_of(src, diag.range().start()));

        let src = match offset {
            Some(_) => source.map(|src| NamedSource::new(diag.path(), src)),
            None => None,
        };

        Self { diag, src, offset }
    }

    /// Returns `true` if the report will include a source snippet.
    pub fn has_snippet(&self) -> bool {
        self.src.is_some()
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .field("offset", &self.offset)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.diag.source()))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(match self.diag.severity() {
            Severity::Error => miette::Severity::Error,
            Severity::Warning => miette::Severity::Warning,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        if self.has_snippet() {
            return None;
        }

        Some(Box::new(format!(
            "reported at {}",
            display_location(self.diag.path(), self.diag.range().start())
        )))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.src.as_ref().map(|src| src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        if self.src.is_none() {
            return None;
        }
        let offset = self.offset?;

        let label = LabeledSpan::new_primary_with_span(
            Some(display_location(self.diag.path(), self.diag.range().start())),
            SourceSpan::new(offset.into(), 0),
        );
        Some(Box::new(std::iter::once(label)))
    }
}

/// Adapter for [`EnvdDiagError`].
///
/// These errors carry no source location; they describe failures of the
/// tool itself, such as unreadable input or invalid configuration.
pub struct ErrorAdapter<'a>(pub &'a EnvdDiagError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            EnvdDiagError::Io(_) => "envd_diag::io",
            EnvdDiagError::Config(_) => "envd_diag::config",
            EnvdDiagError::Session { .. } => "envd_diag::session",
            EnvdDiagError::Json(_) => "envd_diag::json",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            EnvdDiagError::Session { .. } => Some(Box::new(
                "session streams carry one JSON document per line",
            )),
            _ => None,
        }
    }
}

/// Format a zero-based position as a 1-based `path:line:col` string.
fn display_location(path: &str, position: Position) -> String {
    format!(
        "{path}:{}:{}",
        position.line() + 1,
        position.character() + 1
    )
}

/// Byte offset of a zero-based line/character position in `src`.
///
/// Characters are counted as Unicode scalar values. A position one past the
/// end of a line is accepted; anything further is not.
fn offset_of(src: &str, position: Position) -> Option<usize> {
    let mut line_start = 0;
    for _ in 0..position.line() {
        line_start += src[line_start..].find('\n')? + 1;
    }

    let line = src[line_start..].split('\n').next().unwrap_or_default();
    let character = usize::try_from(position.character()).ok()?;
    let in_line = line
        .char_indices()
        .map(|(index, _)| index)
        .chain(std::iter::once(line.len()))
        .nth(character)?;

    Some(line_start + in_line)
}
