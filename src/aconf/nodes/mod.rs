//! Parse tree nodes
//!
//! `ConfNode` is the common wrapper for everything that can appear in a
//! configuration: blank lines, comments, simple directives and block
//! directives. Carrying an explicit variant tag lets the container's
//! recursive dispatch switch on what a node *is* instead of probing
//! capabilities at runtime, and lets tooling operate uniformly on mixed
//! child lists.

pub mod blank;
pub mod comment;
pub mod container;

use crate::aconf::directives::block::ComplexDirective;
use crate::aconf::directives::simple::SimpleDirective;
use crate::aconf::error::ParseResult;

pub use blank::BlankNode;
pub use comment::CommentNode;
pub use container::{ComplexNode, NESTING_LIMIT};

/// Any node that can appear in a container's child list.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfNode {
    Blank(BlankNode),
    Comment(CommentNode),
    Directive(SimpleDirective),
    Block(Box<ComplexDirective>),
}

impl ConfNode {
    /// Feed one physical line to the node. `depth` tracks block nesting for
    /// the recursive variants; leaf variants ignore it.
    pub fn add_line(&mut self, line: &str, depth: usize) -> ParseResult<()> {
        match self {
            ConfNode::Blank(node) => node.add_line(line),
            ConfNode::Comment(node) => node.add_line(line),
            ConfNode::Directive(node) => node.add_line(line),
            ConfNode::Block(node) => node.add_line(line, depth),
        }
    }

    /// Whether the node is waiting for more lines. Blocks report a
    /// consistency error when their parts are in an impossible state.
    pub fn stable(&self) -> ParseResult<bool> {
        match self {
            ConfNode::Blank(_) | ConfNode::Comment(_) => Ok(true),
            ConfNode::Directive(node) => Ok(node.stable()),
            ConfNode::Block(node) => node.stable(),
        }
    }

    pub fn complete(&self) -> ParseResult<bool> {
        match self {
            ConfNode::Blank(node) => Ok(node.complete()),
            ConfNode::Comment(node) => Ok(node.complete()),
            ConfNode::Directive(node) => Ok(node.complete()),
            ConfNode::Block(node) => node.complete(),
        }
    }

    pub fn changed(&self) -> bool {
        match self {
            ConfNode::Blank(node) => node.changed(),
            ConfNode::Comment(node) => node.changed(),
            ConfNode::Directive(node) => node.changed(),
            ConfNode::Block(node) => node.changed(),
        }
    }

    pub fn render(&self) -> ParseResult<String> {
        match self {
            ConfNode::Blank(node) => node.render(),
            ConfNode::Comment(node) => node.render(),
            ConfNode::Directive(node) => node.render(),
            ConfNode::Block(node) => node.render(),
        }
    }

    pub fn node_type(&self) -> &'static str {
        match self {
            ConfNode::Blank(_) => "Blank",
            ConfNode::Comment(_) => "Comment",
            ConfNode::Directive(_) => "Directive",
            ConfNode::Block(_) => "Block",
        }
    }

    /// The directive name, for the variants that carry one.
    pub fn name(&self) -> Option<&str> {
        match self {
            ConfNode::Directive(node) => node.name(),
            ConfNode::Block(node) => node.name(),
            _ => None,
        }
    }

    /// Nested children, for block directives.
    pub fn children(&self) -> Option<&[ConfNode]> {
        match self {
            ConfNode::Block(node) => Some(node.body().nodes()),
            _ => None,
        }
    }

    pub fn as_blank(&self) -> Option<&BlankNode> {
        match self {
            ConfNode::Blank(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_comment(&self) -> Option<&CommentNode> {
        match self {
            ConfNode::Comment(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_comment_mut(&mut self) -> Option<&mut CommentNode> {
        match self {
            ConfNode::Comment(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_directive(&self) -> Option<&SimpleDirective> {
        match self {
            ConfNode::Directive(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_directive_mut(&mut self) -> Option<&mut SimpleDirective> {
        match self {
            ConfNode::Directive(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_block(&self) -> Option<&ComplexDirective> {
        match self {
            ConfNode::Block(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_block_mut(&mut self) -> Option<&mut ComplexDirective> {
        match self {
            ConfNode::Block(node) => Some(node),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_through_variants() {
        let mut node = ConfNode::Directive(SimpleDirective::new());
        node.add_line("Listen 80", 0).unwrap();
        assert!(node.stable().unwrap());
        assert!(node.complete().unwrap());
        assert_eq!(node.name(), Some("Listen"));
        assert_eq!(node.node_type(), "Directive");
        assert_eq!(node.render().unwrap(), "Listen 80");
    }

    #[test]
    fn test_leaves_are_always_stable() {
        let node = ConfNode::Blank(BlankNode::new());
        assert!(node.stable().unwrap());
        assert!(!node.complete().unwrap());
        let node = ConfNode::Comment(CommentNode::new());
        assert!(node.stable().unwrap());
    }

    #[test]
    fn test_block_children() {
        let mut node = ConfNode::Block(Box::new(ComplexDirective::new()));
        node.add_line("<Dir>", 0).unwrap();
        node.add_line("inner one", 0).unwrap();
        node.add_line("</Dir>", 0).unwrap();
        let children = node.children().unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].name(), Some("inner"));
        assert!(node.as_block().is_some());
        assert!(node.as_directive().is_none());
    }
}
