//! Node container
//!
//! `ComplexNode` is the recursive-descent engine of the parser: an ordered,
//! type-heterogeneous sequence of child nodes plus the candidate table it
//! is allowed to instantiate. For each incoming line it decides whether to
//! keep feeding the last child (which is still waiting for continuation or
//! block content) or to classify the line and start a new child.
//!
//! A container is *stable* when every child is stable; an empty container
//! is vacuously stable. It becomes *complete* only when stable and
//! explicitly marked so by its owner: a block directive marks its body
//! complete upon seeing the closing tag, the top-level parser marks its
//! root complete upon exhausting input.

use std::ops::{Deref, DerefMut};

use crate::aconf::error::{ParseResult, ParserError};
use crate::aconf::nodes::ConfNode;
use crate::aconf::registry::{self, CandidateKind};

/// Hard ceiling on block nesting depth. Deeper input is rejected with
/// `NestingLimit` instead of exhausting the stack.
pub const NESTING_LIMIT: usize = 10;

/// An ordered list of heterogeneous child nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexNode {
    candidates: &'static [CandidateKind],
    nodes: Vec<ConfNode>,
    complete: bool,
}

impl ComplexNode {
    pub fn new(candidates: &'static [CandidateKind]) -> Self {
        Self {
            candidates,
            nodes: Vec::new(),
            complete: false,
        }
    }

    /// The candidate types this container may instantiate, in priority
    /// order.
    pub fn candidates(&self) -> &'static [CandidateKind] {
        self.candidates
    }

    /// True when no child is waiting for additional lines.
    pub fn stable(&self) -> ParseResult<bool> {
        for node in &self.nodes {
            if !node.stable()? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    pub fn complete(&self) -> bool {
        self.complete
    }

    pub fn set_complete(&mut self, value: bool) -> ParseResult<()> {
        if value && !self.stable()? {
            return Err(ParserError::NodeComplete(
                "The node list is not stable. Likely the last node is still waiting for \
                 additional lines."
                    .to_string(),
            ));
        }
        self.complete = value;
        Ok(())
    }

    pub fn add_line(&mut self, line: &str, depth: usize) -> ParseResult<()> {
        if self.complete {
            return Err(ParserError::NodeComplete(
                "Can't add lines to a complete node.".to_string(),
            ));
        }
        if depth > NESTING_LIMIT {
            return Err(ParserError::NestingLimit(NESTING_LIMIT));
        }
        if !self.stable()? {
            // the last child is still open; the line belongs to it
            if let Some(node) = self.nodes.last_mut() {
                node.add_line(line, depth + 1)?;
            }
        } else {
            let kind = registry::classify(self.candidates, line)?;
            let mut node = kind.instantiate();
            node.add_line(line, depth)?;
            self.nodes.push(node);
        }
        // new content may have destabilized a previously-completed list
        if !self.stable()? {
            self.complete = false;
        }
        Ok(())
    }

    pub fn nodes(&self) -> &[ConfNode] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut Vec<ConfNode> {
        &mut self.nodes
    }

    pub fn render(&self) -> ParseResult<String> {
        if !self.complete {
            return Err(ParserError::NodeComplete(
                "Can't render an incomplete complex node.".to_string(),
            ));
        }
        let mut parts = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            parts.push(node.render()?);
        }
        Ok(parts.join("\n"))
    }
}

impl Deref for ComplexNode {
    type Target = Vec<ConfNode>;

    fn deref(&self) -> &Self::Target {
        &self.nodes
    }
}

impl DerefMut for ComplexNode {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.nodes
    }
}

impl<'a> IntoIterator for &'a ComplexNode {
    type Item = &'a ConfNode;
    type IntoIter = std::slice::Iter<'a, ConfNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
