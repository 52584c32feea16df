//! Behavior tests for block directives and nesting

use aconf_parser::aconf::error::ParserError;
use aconf_parser::aconf::parser::ConfParser;
use aconf_parser::aconf::testing::parse_ok;
use rstest::rstest;

#[test]
fn test_empty_block() {
    let parser = parse_ok("<Dir arg>\n</Dir>");
    let nodes = parser.nodes();
    assert_eq!(nodes.len(), 1);
    let block = nodes[0].as_block().unwrap();
    assert_eq!(block.name(), Some("Dir"));
    assert_eq!(**block.arguments(), vec!["arg"]);
    assert!(block.complete().unwrap());
    assert!(block.body().is_empty());
    assert_eq!(parser.render().unwrap(), "<Dir arg>\n</Dir>");
}

#[test]
fn test_block_with_one_child() {
    let parser = parse_ok("<Dir arg>\ninner thing\n</Dir>");
    let block = parser.nodes()[0].as_block().unwrap();
    assert_eq!(block.body().len(), 1);
    assert_eq!(block.body().nodes()[0].name(), Some("inner"));
    assert_eq!(parser.render().unwrap(), "<Dir arg>\ninner thing\n</Dir>");
}

#[test]
fn test_block_with_mixed_children() {
    let source = "<VirtualHost *:80>\n# site config\n\nServerName example.com\nRewriteEngine on\n</VirtualHost>";
    let parser = parse_ok(source);
    let block = parser.nodes()[0].as_block().unwrap();
    assert_eq!(block.body().len(), 4);
    assert_eq!(parser.render().unwrap(), source);
}

#[test]
fn test_nested_blocks() {
    let source = "<Outer one>\n<Inner two>\nKeepAlive on\n</Inner>\n</Outer>";
    let parser = parse_ok(source);
    let outer = parser.nodes()[0].as_block().unwrap();
    assert_eq!(outer.body().len(), 1);
    let inner = outer.body().nodes()[0].as_block().unwrap();
    assert_eq!(inner.name(), Some("Inner"));
    assert_eq!(inner.body().len(), 1);
    assert_eq!(parser.render().unwrap(), source);
}

#[test]
fn test_block_header_continuation() {
    let source = "<Dir one \\\ntwo three>\nKeepAlive on\n</Dir>";
    let parser = parse_ok(source);
    let block = parser.nodes()[0].as_block().unwrap();
    assert_eq!(**block.arguments(), vec!["one", "two", "three"]);
    assert_eq!(parser.render().unwrap(), source);
}

#[test]
fn test_closing_tag_whitespace_tolerant() {
    let parser = parse_ok("<Dir>\n  </Dir>  ");
    let block = parser.nodes()[0].as_block().unwrap();
    assert!(block.tailmatch());
    assert_eq!(block.tail(), "  </Dir>  ");
    assert_eq!(parser.render().unwrap(), "<Dir>\n  </Dir>  ");
}

#[test]
fn test_statement_continues_across_nested_content() {
    // a continuation inside a block body is fed to the open child, never
    // reclassified
    let source = "<Dir>\nOptions one \\\ntwo\n</Dir>";
    let parser = parse_ok(source);
    let block = parser.nodes()[0].as_block().unwrap();
    assert_eq!(block.body().len(), 1);
    let child = block.body().nodes()[0].as_directive().unwrap();
    assert_eq!(**child.arguments(), vec!["one", "two"]);
    assert_eq!(parser.render().unwrap(), source);
}

#[rstest]
#[case("<Dir arg1 <arg2>")]
#[case("<Dir arg> trailing")]
fn test_bad_headers_rejected(#[case] line: &str) {
    let mut parser = ConfParser::new();
    let err = parser.add_line(line).unwrap_err();
    assert!(matches!(err, ParserError::InvalidLine(_)), "got {:?}", err);
}

#[test]
fn test_unclosed_block_fails_at_finish() {
    let mut parser = ConfParser::new();
    parser.add_line("<Dir>").unwrap();
    parser.add_line("KeepAlive on").unwrap();
    let err = parser.finish().unwrap_err();
    assert!(matches!(err, ParserError::NodeComplete(_)));
}

#[test]
fn test_mismatched_closing_tag_is_rejected() {
    let mut parser = ConfParser::new();
    parser.add_line("<Dir>").unwrap();
    let err = parser.add_line("</Other>").unwrap_err();
    assert!(matches!(err, ParserError::NodeMatch(_)));
}

#[test]
fn test_five_levels_parse() {
    let mut source = String::new();
    for i in 1..=5 {
        source.push_str(&format!("<B{}>\n", i));
    }
    source.push_str("KeepAlive on\n");
    for i in (1..=5).rev() {
        source.push_str(&format!("</B{}>\n", i));
    }
    let parser = parse_ok(source.trim_end());
    assert_eq!(parser.render().unwrap(), source.trim_end());
}

#[test]
fn test_nesting_ceiling_is_enforced() {
    let mut parser = ConfParser::new();
    for i in 1..=6 {
        parser.add_line(&format!("<B{}>", i)).unwrap();
    }
    // content six blocks deep exceeds the recursion ceiling
    let err = parser.add_line("KeepAlive on").unwrap_err();
    assert!(matches!(err, ParserError::NestingLimit(_)), "got {:?}", err);
}

#[test]
fn test_depth_parameter_ceiling() {
    use aconf_parser::aconf::nodes::container::{ComplexNode, NESTING_LIMIT};
    use aconf_parser::aconf::registry::CONF_CANDIDATES;

    let mut node = ComplexNode::new(CONF_CANDIDATES);
    let err = node.add_line("KeepAlive on", NESTING_LIMIT + 1).unwrap_err();
    assert_eq!(err, ParserError::NestingLimit(NESTING_LIMIT));
    let err = node.add_line("", NESTING_LIMIT + 1).unwrap_err();
    assert_eq!(err, ParserError::NestingLimit(NESTING_LIMIT));
}

#[test]
fn test_lowercase_and_mixed_names() {
    let parser = parse_ok("<ifModule mod_ssl.c>\n</ifModule>");
    assert_eq!(parser.nodes()[0].name(), Some("ifModule"));
}
