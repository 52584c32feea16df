//! Simple directive node
//!
//! A single configuration statement: a name and its arguments, possibly
//! spread over several physical lines via trailing-backslash continuations.
//! Specialized kinds (Redirect, RewriteRule, ...) share these semantics and
//! add capture extraction on top.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::aconf::directives::captures::{DirectiveCaptures, DirectiveKind};
use crate::aconf::directives::header::{ArgumentList, DirectiveHeader};
use crate::aconf::error::{ParseResult, ParserError};
use crate::aconf::lines;

static MATCH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[a-zA-Z]\w*(\s+.*)*\s*\\?$").unwrap());

/// A single directive statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleDirective {
    kind: DirectiveKind,
    lines: Vec<String>,
    header: DirectiveHeader,
    captures: Option<DirectiveCaptures>,
    complete: bool,
    changed: bool,
}

impl SimpleDirective {
    pub fn new() -> Self {
        Self::with_kind(DirectiveKind::Generic)
    }

    /// A directive classified under a specialized grammar.
    pub fn with_kind(kind: DirectiveKind) -> Self {
        Self {
            kind,
            lines: Vec::new(),
            header: DirectiveHeader::new(),
            captures: None,
            complete: false,
            changed: false,
        }
    }

    /// Test a line without mutating state: any identifier followed by
    /// arbitrary arguments, with an optional trailing continuation marker.
    pub fn matches(line: &str) -> bool {
        MATCH_RE.is_match(line)
    }

    pub fn add_line(&mut self, line: &str) -> ParseResult<()> {
        lines::ensure_single_line(line)?;
        if self.complete {
            return Err(ParserError::NodeComplete(format!(
                "Can't add lines to a complete directive: {}",
                line
            )));
        }
        self.header
            .parse(line)
            .map_err(ParserError::into_line_error)?;
        // captures are best-effort metadata; a non-matching line (such as a
        // continuation tail) leaves the previous captures in place
        if let Some(caps) = self.kind.extract(line) {
            self.captures = Some(caps);
        }
        self.lines.push(line.to_string());
        if !lines::has_continuation(line) {
            self.set_complete(true)?;
        }
        Ok(())
    }

    pub fn kind(&self) -> DirectiveKind {
        self.kind
    }

    pub fn name(&self) -> Option<&str> {
        self.header.name()
    }

    pub fn arguments(&self) -> &ArgumentList {
        self.header.arguments()
    }

    pub fn captures(&self) -> Option<&DirectiveCaptures> {
        self.captures.as_ref()
    }

    pub fn header(&self) -> &DirectiveHeader {
        &self.header
    }

    /// True once the name has been assigned and no continuation is pending.
    pub fn stable(&self) -> bool {
        self.header.stable()
    }

    pub fn complete(&self) -> bool {
        self.complete
    }

    pub fn set_complete(&mut self, value: bool) -> ParseResult<()> {
        if value && !self.stable() {
            return Err(ParserError::NodeComplete(
                "Can't set an unstable directive to complete.".to_string(),
            ));
        }
        self.complete = value;
        Ok(())
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

    /// Append an argument programmatically; the node renders from its
    /// structured content afterwards.
    pub fn push_argument(&mut self, value: &str) -> ParseResult<()> {
        self.header.arguments_mut().push(value)?;
        self.changed = true;
        Ok(())
    }

    /// Replace an argument programmatically.
    pub fn replace_argument(&mut self, index: usize, value: &str) -> ParseResult<()> {
        self.header.arguments_mut().replace(index, value)?;
        self.changed = true;
        Ok(())
    }

    /// Remove an argument programmatically.
    pub fn remove_argument(&mut self, index: usize) -> String {
        self.changed = true;
        self.header.arguments_mut().remove(index)
    }

    pub fn render(&self) -> ParseResult<String> {
        if self.lines.is_empty() {
            return Err(ParserError::NodeComplete(
                "Can't render an uninitialized simple directive.".to_string(),
            ));
        }
        if self.changed {
            return self.header.content();
        }
        Ok(self.lines.join("\n"))
    }
}

impl Default for SimpleDirective {
    fn default() -> Self {
        Self::new()
    }
}
