//! Candidate registry
//!
//! The registry is the statically-declared, ordered set of node types
//! eligible to claim an unclassified line. Classification tries candidates
//! in declaration order and the first matcher wins, so order matters:
//! comments and blanks go first, specialized directive grammars come
//! before the generic directive fallback, and the generic simple directive
//! goes last. A line that no candidate recognizes is a hard error; the
//! configuration is rejected, not skipped.

use crate::aconf::directives::block::ComplexDirective;
use crate::aconf::directives::captures::DirectiveKind;
use crate::aconf::directives::simple::SimpleDirective;
use crate::aconf::error::{ParseResult, ParserError};
use crate::aconf::nodes::{BlankNode, CommentNode, ConfNode};

/// A concrete node type eligible to claim an incoming line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    Comment,
    Blank,
    RewriteRule,
    RewriteCond,
    RewriteEngine,
    RewriteBase,
    RedirectMatch,
    RedirectPermanent,
    Redirect,
    Block,
    Directive,
}

/// The full candidate table, in priority order.
pub const CONF_CANDIDATES: &[CandidateKind] = &[
    CandidateKind::Comment,
    CandidateKind::Blank,
    CandidateKind::RewriteRule,
    CandidateKind::RewriteCond,
    CandidateKind::RewriteEngine,
    CandidateKind::RewriteBase,
    CandidateKind::RedirectMatch,
    CandidateKind::RedirectPermanent,
    CandidateKind::Redirect,
    CandidateKind::Block,
    CandidateKind::Directive,
];

impl CandidateKind {
    /// The specialized directive grammar behind this candidate, if any.
    fn directive_kind(self) -> Option<DirectiveKind> {
        match self {
            CandidateKind::RewriteRule => Some(DirectiveKind::RewriteRule),
            CandidateKind::RewriteCond => Some(DirectiveKind::RewriteCond),
            CandidateKind::RewriteEngine => Some(DirectiveKind::RewriteEngine),
            CandidateKind::RewriteBase => Some(DirectiveKind::RewriteBase),
            CandidateKind::RedirectMatch => Some(DirectiveKind::RedirectMatch),
            CandidateKind::RedirectPermanent => Some(DirectiveKind::RedirectPermanent),
            CandidateKind::Redirect => Some(DirectiveKind::Redirect),
            _ => None,
        }
    }

    /// Test a line against this candidate's grammar without mutating state.
    pub fn matches(self, line: &str) -> bool {
        match self {
            CandidateKind::Comment => CommentNode::matches(line),
            CandidateKind::Blank => BlankNode::matches(line),
            CandidateKind::Block => ComplexDirective::matches(line),
            CandidateKind::Directive => SimpleDirective::matches(line),
            specialized => specialized
                .directive_kind()
                .is_some_and(|kind| kind.matches(line)),
        }
    }

    /// Create an empty node of this candidate's type.
    pub fn instantiate(self) -> ConfNode {
        match self {
            CandidateKind::Comment => ConfNode::Comment(CommentNode::new()),
            CandidateKind::Blank => ConfNode::Blank(BlankNode::new()),
            CandidateKind::Block => ConfNode::Block(Box::new(ComplexDirective::new())),
            CandidateKind::Directive => ConfNode::Directive(SimpleDirective::new()),
            specialized => match specialized.directive_kind() {
                Some(kind) => ConfNode::Directive(SimpleDirective::with_kind(kind)),
                None => ConfNode::Directive(SimpleDirective::new()),
            },
        }
    }
}

/// Find the first candidate that claims the line.
pub fn classify(candidates: &[CandidateKind], line: &str) -> ParseResult<CandidateKind> {
    candidates
        .iter()
        .copied()
        .find(|kind| kind.matches(line))
        .ok_or_else(|| ParserError::NodeMatch(format!("No matching node: {}", line)))
}
