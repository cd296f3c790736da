//! Token grammar for envd error locations.
//!
//! A location token is `<path>:<line>:<col>`:
//!
//! - `<path>` is one or more of `[A-Za-z0-9/ ._-]`. Spaces are allowed, a
//!   colon is not, so the path always ends at the first `:`.
//! - `<line>` and `<col>` are positive decimal integers without a leading
//!   zero.
//!
//! Every parser here works on a single line of text and ignores whatever
//! follows the part it recognizes.

use winnow::{
    Parser as _,
    combinator::{preceded, terminated},
    error::ModalResult,
    token::{any, one_of, take_while},
};

use envd_diag_core::{ParseResult, SourceLocation};

type Input<'a> = &'a str;
type IResult<O> = ModalResult<O>;

/// Marker that introduces a failed `load()` inside a traceback.
const LOAD_ERROR_MARKER: &str = "Error: cannot load ";

fn is_path_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '/' | ' ' | '.' | '_' | '-')
}

/// Line terminators that end a message on the first line.
fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Whitespace as matched by the `\s` class of envd's error tooling: the
/// ECMAScript white space and line terminator sets. Unlike
/// [`char::is_whitespace`] this includes U+FEFF and excludes U+0085.
fn is_space(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{000B}'
            | '\u{000C}'
            | '\r'
            | ' '
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Parse a positive integer without a leading zero.
///
/// Values beyond `u32::MAX` are rejected rather than wrapped.
fn positive_number(input: &mut Input<'_>) -> IResult<u32> {
    (
        one_of('1'..='9'),
        take_while(0.., |c: char| c.is_ascii_digit()),
    )
        .take()
        .try_map(str::parse::<u32>)
        .parse_next(input)
}

/// Parse a `path:line:col` token.
fn location(input: &mut Input<'_>) -> IResult<SourceLocation> {
    (
        take_while(1.., is_path_char),
        preceded(':', positive_number),
        preceded(':', positive_number),
    )
        .map(|(path, line, column): (&str, u32, u32)| SourceLocation::new(path, line, column))
        .parse_next(input)
}

/// Parse `path:line:col: message`, where the message runs to the end of the
/// first line and must not be empty.
fn simple_error_line(input: &mut Input<'_>) -> IResult<ParseResult> {
    (
        location,
        preceded(": ", take_while(1.., |c: char| !is_line_terminator(c))),
    )
        .map(|(location, message): (SourceLocation, &str)| {
            ParseResult::new(message, vec![location])
        })
        .parse_next(input)
}

/// Parse a traceback frame: optional leading whitespace, then a location.
fn frame(input: &mut Input<'_>) -> IResult<SourceLocation> {
    preceded(take_while(0.., is_space), location).parse_next(input)
}

/// The file named after `cannot load`, including its trailing colon, and
/// the single space that follows it.
fn load_target<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    terminated(
        take_while(2.., |c: char| !is_space(c)).verify(|token: &str| token.ends_with(':')),
        ' ',
    )
    .parse_next(input)
}

/// Everything after [`LOAD_ERROR_MARKER`]: the target, the location inside
/// it, and a non-empty reason.
fn load_error_tail(input: &mut Input<'_>) -> IResult<SourceLocation> {
    preceded(
        load_target,
        terminated(
            location,
            (": ", any.verify(|c: &char| !is_line_terminator(*c))),
        ),
    )
    .parse_next(input)
}

/// Match a simple error at the start of `text`.
pub(crate) fn simple_error(text: &str) -> Option<ParseResult> {
    let mut input = text;
    simple_error_line.parse_next(&mut input).ok()
}

/// Match a traceback frame at the start of `line`.
pub(crate) fn frame_location(line: &str) -> Option<SourceLocation> {
    let mut input = line;
    frame.parse_next(&mut input).ok()
}

/// Find the location of the loaded file in a `cannot load` line.
///
/// The marker may appear anywhere in the line; the first occurrence that is
/// followed by a well-formed tail wins.
pub(crate) fn load_error_location(line: &str) -> Option<SourceLocation> {
    line.match_indices(LOAD_ERROR_MARKER)
        .find_map(|(start, marker)| {
            let mut input = &line[start + marker.len()..];
            load_error_tail.parse_next(&mut input).ok()
        })
}
