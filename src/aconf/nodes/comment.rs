//! Comment node

use once_cell::sync::Lazy;
use regex::Regex;

use crate::aconf::error::{ParseResult, ParserError};
use crate::aconf::lines;

// The capture excludes comments whose text ends in a backslash: a comment
// cannot be continued, so such a line matches no candidate at all.
static MATCH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*#(?P<comment>.*[^\\])?$").unwrap());

/// A `#` comment line.
///
/// Comments cannot carry a continuation marker and complete after exactly
/// one line. The text after the `#` is captured so it can be edited; an
/// edited comment renders as `#` followed by the new text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommentNode {
    lines: Vec<String>,
    text: Option<String>,
    complete: bool,
    changed: bool,
}

impl CommentNode {
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
                "Comments cannot have line continuations.".to_string(),
            ));
        }
        lines::ensure_single_line(line)?;
        if self.complete {
            return Err(ParserError::NodeComplete(format!(
                "Can't add lines to a complete node: {}",
                line
            )));
        }
        if let Some(caps) = MATCH_RE.captures(line) {
            self.text = caps.name("comment").map(|m| m.as_str().to_string());
        }
        self.lines.push(line.to_string());
        self.complete = true;
        Ok(())
    }

    /// The captured comment text, without the leading `#`.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Replace the comment text. The node renders from the new text.
    pub fn set_text(&mut self, text: &str) {
        self.text = Some(text.to_string());
        self.changed = true;
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
                "Can't render an uninitialized comment node.".to_string(),
            ));
        }
        if self.changed {
            return Ok(format!("#{}", self.text.as_deref().unwrap_or("")));
        }
        Ok(self.lines.join("\n"))
    }
}
