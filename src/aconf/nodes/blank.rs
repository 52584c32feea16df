//! Blank line node

use once_cell::sync::Lazy;
use regex::Regex;

use crate::aconf::error::{ParseResult, ParserError};
use crate::aconf::lines;

static MATCH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*$").unwrap());

/// A blank line.
///
/// Matches a line holding only whitespace (or nothing at all). Blank lines
/// cannot carry a continuation marker and complete after exactly one line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlankNode {
    lines: Vec<String>,
    complete: bool,
    changed: bool,
}

impl BlankNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Test a line without mutating state.
    pub fn matches(line: &str) -> bool {
        MATCH_RE.is_match(line)
    }

    pub fn add_line(&mut self, line: &str) -> ParseResult<()> {
        if lines::has_continuation(line) {
            return Err(ParserError::InvalidLine(
                "Blank lines cannot have line continuations.".to_string(),
            ));
        }
        lines::ensure_single_line(line)?;
        if self.complete {
            return Err(ParserError::NodeComplete(format!(
                "Can't add lines to a complete node: {}",
                line
            )));
        }
        self.lines.push(line.to_string());
        self.complete = true;
        Ok(())
    }

    pub fn complete(&self) -> bool {
        self.complete
    }

    pub fn changed(&self) -> bool {
        self.changed
    }

    pub fn set_changed(&mut self) {
        self.changed = true;
    }

    /// The raw physical lines consumed so far.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn render(&self) -> ParseResult<String> {
        if self.lines.is_empty() {
            return Err(ParserError::NodeComplete(
                "Can't render an uninitialized blank node.".to_string(),
            ));
        }
        if self.changed {
            // the structured content of a blank line is the empty string
            return Ok(String::new());
        }
        Ok(self.lines.join("\n"))
    }
}
