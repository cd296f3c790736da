//! Traceback scanning.
//!
//! A traceback is scanned line by line after its header. Leading frame lines
//! contribute locations; the first line that is not a frame starts the
//! message block, which runs to the end of the input. A `cannot load` line
//! in that position also contributes the location inside the loaded file.

use envd_diag_core::ParseResult;

use crate::grammar;

/// First line of every envd traceback.
pub const TRACEBACK_HEADER: &str = "Traceback (most recent call last):";

/// Scan the frames of a traceback.
///
/// Returns `None` when no message block was found, that is when every line
/// after the header is a frame.
pub(crate) fn parse_traceback(text: &str) -> Option<ParseResult> {
    let mut lines = text.split('\n');
    let mut offset = lines.next().map_or(0, |header| header.len() + 1);
    let mut locations = Vec::new();

    for line in lines {
        if let Some(location) = grammar::frame_location(line) {
            locations.push(location);
            offset += line.len() + 1;
            continue;
        }

        if let Some(location) = grammar::load_error_location(line) {
            locations.push(location);
        }

        return Some(ParseResult::new(&text[offset..], locations));
    }

    None
}
