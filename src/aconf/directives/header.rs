//! Directive header grammar
//!
//!     A directive statement is a name followed by whitespace-separated
//!     arguments. The statement may span several physical lines via
//!     trailing-backslash continuations; the name comes from the first
//!     token of the first line, and arguments accumulate additively across
//!     all lines of the statement.
//!
//!     The header is a value object: both simple directives and the opening
//!     tag of block directives own one and feed it header text, keeping
//!     continuation and completeness bookkeeping in a single place.

use std::ops::Deref;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::aconf::error::{ParseResult, ParserError};
use crate::aconf::lines;

/// Directive names start with a letter and continue with word characters.
/// The check anchors at the start only, like the original grammar.
static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z]\w*").unwrap());

/// An argument wholly wrapped in single or double quotes may contain
/// anything; an unquoted argument must not contain angle brackets.
static QUOTED_ARG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^'.*'$|^".*"$"#).unwrap());

/// An ordered directive argument collection that validates every insertion
/// and replacement.
///
/// Read access goes through `Deref` to the backing vector; mutation goes
/// through the validating methods only.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArgumentList {
    items: Vec<String>,
}

impl ArgumentList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject unquoted angle brackets.
    pub fn validate_argument(value: &str) -> ParseResult<()> {
        if !QUOTED_ARG_RE.is_match(value) && (value.contains('<') || value.contains('>')) {
            return Err(ParserError::Directive(format!(
                "Angle brackets not allowed in directive args. Received: {}",
                value
            )));
        }
        Ok(())
    }

    pub fn push(&mut self, value: &str) -> ParseResult<()> {
        Self::validate_argument(value)?;
        self.items.push(value.to_string());
        Ok(())
    }

    pub fn insert(&mut self, index: usize, value: &str) -> ParseResult<()> {
        Self::validate_argument(value)?;
        self.items.insert(index, value.to_string());
        Ok(())
    }

    pub fn replace(&mut self, index: usize, value: &str) -> ParseResult<()> {
        Self::validate_argument(value)?;
        self.items[index] = value.to_string();
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> String {
        self.items.remove(index)
    }
}

impl Deref for ArgumentList {
    type Target = Vec<String>;

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl<'a> IntoIterator for &'a ArgumentList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// The name/argument state of one directive statement.
///
/// `stable` is true once the most recent header line carried no
/// continuation marker; a container uses it to decide whether the statement
/// is still expecting lines. `complete` is set by the owner once the whole
/// header has been seen (for block directives, when the closing `>` of the
/// opening tag arrives).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DirectiveHeader {
    name: Option<String>,
    arguments: ArgumentList,
    stable: bool,
    complete: bool,
}

impl DirectiveHeader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Assign the directive name. The name is set exactly once for the life
    /// of the directive; a second assignment is an error regardless of
    /// value.
    pub fn set_name(&mut self, value: &str) -> ParseResult<()> {
        if self.name.is_some() {
            return Err(ParserError::Directive(format!(
                "Name is already set. Cannot set to {}",
                value
            )));
        }
        if !NAME_RE.is_match(value) {
            return Err(ParserError::Directive(format!("Invalid name: {}", value)));
        }
        self.name = Some(value.to_string());
        // name is the first token of a header line
        self.stable = true;
        Ok(())
    }

    pub fn arguments(&self) -> &ArgumentList {
        &self.arguments
    }

    pub fn arguments_mut(&mut self) -> &mut ArgumentList {
        &mut self.arguments
    }

    pub fn stable(&self) -> bool {
        self.stable
    }

    pub fn complete(&self) -> bool {
        self.complete
    }

    pub fn set_complete(&mut self, value: bool) -> ParseResult<()> {
        if value && !self.stable {
            return Err(ParserError::NodeComplete(
                "Can't set an unstable directive to complete.".to_string(),
            ));
        }
        self.complete = value;
        Ok(())
    }

    /// Consume one physical header line.
    ///
    /// Strips a single trailing continuation marker, splits the rest on
    /// whitespace, takes the first token as the name when none is set yet,
    /// and appends every further token to the argument list. Stability
    /// follows the continuation marker of this line.
    pub fn parse(&mut self, line: &str) -> ParseResult<()> {
        if self.complete {
            return Err(ParserError::NodeComplete(
                "Cannot add to the header of a complete directive.".to_string(),
            ));
        }
        if line.is_empty() {
            return Err(ParserError::Directive(
                "An empty line is not a valid header line.".to_string(),
            ));
        }
        let (text, stable) = lines::split_continuation(line);
        let mut parts = text.split_whitespace();
        if self.name.is_none() {
            match parts.next() {
                Some(token) => self.set_name(token)?,
                None => {
                    return Err(ParserError::Directive(format!(
                        "No directive name in header line: {}",
                        line
                    )))
                }
            }
        }
        for part in parts {
            self.arguments.push(part)?;
        }
        self.stable = stable;
        Ok(())
    }

    /// Render the header from structured content: the name followed by the
    /// space-joined arguments. Whitespace between tokens is normalized.
    pub fn content(&self) -> ParseResult<String> {
        let name = match &self.name {
            Some(name) => name,
            None => {
                return Err(ParserError::NodeComplete(
                    "Name has not been set yet.".to_string(),
                ))
            }
        };
        if self.arguments.is_empty() {
            Ok(name.clone())
        } else {
            Ok(format!("{} {}", name, self.arguments.join(" ")))
        }
    }
}
