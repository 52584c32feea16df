//! Physical-line primitives
//!
//!     A configuration file is a sequence of physical lines. A logical
//!     statement may span several physical lines when each line but the last
//!     ends in a backslash continuation marker. These helpers are the single
//!     place where continuation markers, embedded newlines and closing-tag
//!     shapes are recognized; every node type builds on them.
//!
//!     Line splitting itself is the caller's responsibility. `split_source`
//!     is provided for callers that hold a whole configuration as one
//!     string; it strips the per-line terminators the way the input contract
//!     requires.

use crate::aconf::error::{ParseResult, ParserError};

/// The continuation marker: a trailing backslash means the logical line
/// continues on the next physical line.
pub const CONTINUATION: char = '\\';

/// Check whether a line ends in a continuation marker.
pub fn has_continuation(line: &str) -> bool {
    line.ends_with(CONTINUATION)
}

/// Strip a single trailing continuation marker if present.
///
/// Returns the remaining text and whether the line was stable, i.e. carried
/// no continuation marker.
pub fn split_continuation(line: &str) -> (&str, bool) {
    match line.strip_suffix(CONTINUATION) {
        Some(stripped) => (stripped, false),
        None => (line, true),
    }
}

/// Reject a line that contains an embedded line break.
///
/// Every node type refuses such input: the caller owns line splitting.
pub fn ensure_single_line(line: &str) -> ParseResult<()> {
    if line.contains('\n') {
        return Err(ParserError::InvalidLine(
            "Lines cannot contain newlines.".to_string(),
        ));
    }
    Ok(())
}

/// Check whether a line is the closing tag for a named block directive.
///
/// Accepts `</Name>` with optional surrounding whitespace, nothing else on
/// the line. Directive names are plain identifiers, so a string comparison
/// against the bracketed text is exact.
pub fn is_closing_tag(line: &str, name: &str) -> bool {
    line.trim()
        .strip_prefix("</")
        .and_then(|rest| rest.strip_suffix('>'))
        .is_some_and(|inner| inner == name)
}

/// Split a configuration source into its physical lines, stripping the
/// per-line terminator (`\n` or `\r\n`).
pub fn split_source(source: &str) -> std::str::Lines<'_> {
    source.lines()
}
