//! Top-level configuration parser
//!
//! `ConfParser` wraps the root container over the full candidate table and
//! drives line-by-line ingestion. It accepts a whole source string, a
//! pre-split line sequence, or incremental `add_line` calls for callers
//! that stream lines in themselves; `finish` marks the end of input and
//! fails when a statement or block is still open.

use crate::aconf::error::ParseResult;
use crate::aconf::lines;
use crate::aconf::nodes::{ComplexNode, ConfNode};
use crate::aconf::registry::CONF_CANDIDATES;

/// Parser and in-memory model for one configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfParser {
    root: ComplexNode,
}

impl ConfParser {
    /// An empty parser awaiting lines.
    pub fn new() -> Self {
        Self {
            root: ComplexNode::new(CONF_CANDIDATES),
        }
    }

    /// Parse a whole configuration source. Per-line terminators are
    /// stripped; rendering joins lines with `\n`.
    pub fn parse(source: &str) -> ParseResult<Self> {
        let mut parser = Self::new();
        for line in lines::split_source(source) {
            parser.add_line(line)?;
        }
        parser.finish()?;
        Ok(parser)
    }

    /// Parse a pre-split sequence of lines.
    pub fn parse_lines<'a, I>(source: I) -> ParseResult<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut parser = Self::new();
        for line in source {
            parser.add_line(line)?;
        }
        parser.finish()?;
        Ok(parser)
    }

    /// Feed one physical line.
    pub fn add_line(&mut self, line: &str) -> ParseResult<()> {
        self.root.add_line(line, 0)
    }

    /// Mark the end of input. Fails when the last statement or block is
    /// still waiting for lines.
    pub fn finish(&mut self) -> ParseResult<()> {
        self.root.set_complete(true)
    }

    pub fn complete(&self) -> bool {
        self.root.complete()
    }

    pub fn root(&self) -> &ComplexNode {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut ComplexNode {
        &mut self.root
    }

    /// The top-level child nodes.
    pub fn nodes(&self) -> &[ConfNode] {
        self.root.nodes()
    }

    pub fn nodes_mut(&mut self) -> &mut Vec<ConfNode> {
        self.root.nodes_mut()
    }

    /// Render the whole tree. Unedited nodes reproduce their raw source
    /// lines; edited nodes serialize from structured content.
    pub fn render(&self) -> ParseResult<String> {
        self.root.render()
    }
}

impl Default for ConfParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aconf::error::ParserError;

    #[test]
    fn test_parse_empty_source() {
        let parser = ConfParser::parse("").unwrap();
        assert!(parser.complete());
        assert_eq!(parser.nodes().len(), 0);
        assert_eq!(parser.render().unwrap(), "");
    }

    #[test]
    fn test_parse_and_render() {
        let source = "# comment\n\nServerName example.com";
        let parser = ConfParser::parse(source).unwrap();
        assert_eq!(parser.nodes().len(), 3);
        assert_eq!(parser.render().unwrap(), source);
    }

    #[test]
    fn test_parse_lines() {
        let parser = ConfParser::parse_lines(vec!["<Dir arg>", "</Dir>"]).unwrap();
        assert_eq!(parser.nodes().len(), 1);
        assert_eq!(parser.nodes()[0].name(), Some("Dir"));
    }

    #[test]
    fn test_incremental_parsing() {
        let mut parser = ConfParser::new();
        parser.add_line("Listen 80 \\").unwrap();
        assert!(!parser.complete());
        parser.add_line("443").unwrap();
        parser.finish().unwrap();
        assert!(parser.complete());
        assert_eq!(parser.render().unwrap(), "Listen 80 \\\n443");
    }

    #[test]
    fn test_finish_with_open_statement_fails() {
        let mut parser = ConfParser::new();
        parser.add_line("Listen 80 \\").unwrap();
        let err = parser.finish().unwrap_err();
        assert!(matches!(err, ParserError::NodeComplete(_)));
    }

    #[test]
    fn test_finish_with_open_block_fails() {
        let mut parser = ConfParser::new();
        parser.add_line("<Dir>").unwrap();
        let err = parser.finish().unwrap_err();
        assert!(matches!(err, ParserError::NodeComplete(_)));
    }

    #[test]
    fn test_trailing_newline_is_not_significant() {
        let parser = ConfParser::parse("KeepAlive on\n").unwrap();
        assert_eq!(parser.render().unwrap(), "KeepAlive on");
    }
}
