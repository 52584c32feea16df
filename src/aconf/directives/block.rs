//! Block directive node
//!
//! A block directive is a three-part aggregate:
//!
//! ```text
//! <Directory /var/www>     header (opening tag, may span lines via \)
//!     Options Indexes      body (a nested container, parsed recursively)
//! </Directory>             tail (closing tag)
//! ```
//!
//! The parts drive a small state machine: lines feed the header until its
//! closing `>` arrives, then the body until the matching closing tag is
//! seen, which finalizes the node. Completeness is derived from the parts;
//! observing an impossible combination (tail matched but body open, body
//! complete but header open) is an internal consistency error, not `false`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::aconf::directives::header::{ArgumentList, DirectiveHeader};
use crate::aconf::error::{ParseResult, ParserError};
use crate::aconf::lines;
use crate::aconf::nodes::container::ComplexNode;
use crate::aconf::registry::CONF_CANDIDATES;

static MATCH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*<\s*[a-zA-Z]\w*(\s+[^>]*)*\s*(>\s*|\\)$").unwrap());

/// A block directive: header, nested body, closing tail.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexDirective {
    /// Raw physical lines of the opening tag.
    lines: Vec<String>,
    header: DirectiveHeader,
    body: ComplexNode,
    tail: String,
    tailmatch: bool,
    changed: bool,
}

impl ComplexDirective {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            header: DirectiveHeader::new(),
            body: ComplexNode::new(CONF_CANDIDATES),
            tail: String::new(),
            tailmatch: false,
            changed: false,
        }
    }

    /// Test a line without mutating state: an opening tag, closed by `>` or
    /// continued with a trailing backslash.
    pub fn matches(line: &str) -> bool {
        MATCH_RE.is_match(line)
    }

    pub fn name(&self) -> Option<&str> {
        self.header.name()
    }

    pub fn arguments(&self) -> &ArgumentList {
        self.header.arguments()
    }

    pub fn header(&self) -> &DirectiveHeader {
        &self.header
    }

    pub fn body(&self) -> &ComplexNode {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut ComplexNode {
        &mut self.body
    }

    /// The raw closing-tag line, once matched.
    pub fn tail(&self) -> &str {
        &self.tail
    }

    pub fn tailmatch(&self) -> bool {
        self.tailmatch
    }

    /// The raw physical lines of the opening tag.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn changed(&self) -> bool {
        self.changed
    }

    pub fn set_changed(&mut self) {
        self.changed = true;
    }

    /// Completeness derived from the three parts.
    ///
    /// An impossible part combination is reported as a consistency error
    /// instead of a boolean.
    pub fn complete(&self) -> ParseResult<bool> {
        if self.body.complete() && !self.header.complete() {
            return Err(ParserError::NodeComplete(
                "Body is complete but header isn't.".to_string(),
            ));
        }
        if self.tailmatch && !self.body.complete() {
            return Err(ParserError::NodeComplete(
                "Tail is matched but body is not complete.".to_string(),
            ));
        }
        Ok(self.header.complete() && self.body.complete() && self.tailmatch)
    }

    /// A block is stable only when it is complete: an open block is always
    /// waiting for more lines.
    pub fn stable(&self) -> ParseResult<bool> {
        self.complete()
    }

    /// Validate an explicit completeness assignment against the part
    /// states. Completeness itself stays derived from the parts.
    pub fn set_complete(&mut self, value: bool) -> ParseResult<()> {
        let parts_complete = self.header.complete() && self.body.complete() && self.tailmatch;
        if value && !parts_complete {
            return Err(ParserError::NodeComplete(
                "Cannot set a complex directive to complete if its parts aren't complete."
                    .to_string(),
            ));
        }
        if !value && parts_complete {
            return Err(ParserError::NodeComplete(
                "Cannot set a complex directive to not complete if its parts are all complete."
                    .to_string(),
            ));
        }
        Ok(())
    }

    fn parse_header(&mut self, line: &str) -> ParseResult<()> {
        lines::ensure_single_line(line)?;
        self.lines.push(line.to_string());
        let header_str = match line.find('>') {
            Some(index) => {
                let remainder = &line[index + 1..];
                if !remainder.trim().is_empty() {
                    return Err(ParserError::InvalidLine(format!(
                        "Directive header has an extraneous tail: {}",
                        line
                    )));
                }
                &line[..index]
            }
            None => line,
        };
        let mut header_str = header_str.trim_start();
        // the leading bracket is stripped the first time only
        if header_str.starts_with('<') && self.header.name().is_none() {
            header_str = &header_str[1..];
        }
        if header_str.contains('<') {
            return Err(ParserError::InvalidLine(format!(
                "Angle brackets not allowed in complex directive header. Received: {}",
                line
            )));
        }
        if !header_str.is_empty() {
            self.header
                .parse(header_str)
                .map_err(ParserError::into_line_error)?;
        }
        if line.contains('>') {
            self.header.set_complete(true)?;
        }
        Ok(())
    }

    pub fn add_line(&mut self, line: &str, depth: usize) -> ParseResult<()> {
        if self.complete()? {
            return Err(ParserError::NodeComplete(format!(
                "Can't add lines to a complete node: {}",
                line
            )));
        }
        // first we need a header
        if !self.header.complete() {
            return self.parse_header(line);
        }
        let tail_hit = self
            .header
            .name()
            .is_some_and(|name| lines::is_closing_tag(line, name));
        // then the body, which keeps the line while a child statement is
        // still open
        if !self.body.stable()? && !tail_hit {
            return self.body.add_line(line, depth + 1);
        }
        // the closing tag finalizes the body
        if tail_hit {
            self.body.set_complete(true)?;
            self.tail = line.to_string();
            self.tailmatch = true;
            return Ok(());
        }
        if !self.body.complete() {
            return self.body.add_line(line, depth + 1);
        }
        Err(ParserError::InvalidLine(format!(
            "Expecting closing tag. Got: {}",
            line
        )))
    }

    pub fn render(&self) -> ParseResult<String> {
        if self.lines.is_empty() {
            return Err(ParserError::NodeComplete(
                "Can't render an uninitialized complex directive.".to_string(),
            ));
        }
        if !self.complete()? {
            return Err(ParserError::NodeComplete(
                "Can't render an incomplete complex directive.".to_string(),
            ));
        }
        let mut out = self.lines.join("\n");
        out.push('\n');
        out.push_str(&self.body.render()?);
        if !self.body.is_empty() {
            out.push('\n');
        }
        out.push_str(&self.tail);
        Ok(out)
    }
}

impl Default for ComplexDirective {
    fn default() -> Self {
        Self::new()
    }
}
