//! Behavior tests for simple and specialized directives

use aconf_parser::aconf::directives::captures::{DirectiveCaptures, DirectiveKind};
use aconf_parser::aconf::nodes::ConfNode;
use aconf_parser::aconf::testing::parse_ok;
use rstest::rstest;

fn single_directive(source: &str) -> ConfNode {
    let parser = parse_ok(source);
    let nodes = parser.nodes();
    assert_eq!(nodes.len(), 1, "expected one node for:\n{}", source);
    nodes[0].clone()
}

#[test]
fn test_redirect_node() {
    let node = single_directive("Redirect /from-here /to-here");
    let directive = node.as_directive().unwrap();
    assert_eq!(directive.name(), Some("Redirect"));
    assert_eq!(**directive.arguments(), vec!["/from-here", "/to-here"]);
    assert_eq!(directive.kind(), DirectiveKind::Redirect);
    assert_eq!(node.render().unwrap(), "Redirect /from-here /to-here");

    match directive.captures().unwrap() {
        DirectiveCaptures::Redirect(caps) => {
            assert_eq!(caps.status, None);
            assert_eq!(caps.url_path, "/from-here");
            assert_eq!(caps.url, "/to-here");
        }
        other => panic!("wrong captures: {:?}", other),
    }
}

#[test]
fn test_redirect_with_status() {
    let node = single_directive("Redirect permanent /old http://example.com/new");
    match node.as_directive().unwrap().captures().unwrap() {
        DirectiveCaptures::Redirect(caps) => {
            assert_eq!(caps.status.as_deref(), Some("permanent"));
            assert_eq!(caps.url_path, "/old");
            assert_eq!(caps.url, "http://example.com/new");
        }
        other => panic!("wrong captures: {:?}", other),
    }
}

#[test]
fn test_rewrite_rule_captures() {
    let node = single_directive("RewriteRule /a /b [L]");
    let directive = node.as_directive().unwrap();
    assert_eq!(directive.kind(), DirectiveKind::RewriteRule);
    match directive.captures().unwrap() {
        DirectiveCaptures::RewriteRule(caps) => {
            assert_eq!(caps.regexp, "/a");
            assert_eq!(caps.substitution, "/b");
            assert_eq!(caps.flags, vec!["L"]);
        }
        other => panic!("wrong captures: {:?}", other),
    }
}

#[rstest]
#[case("RewriteRule ^/old$ /new [R=301,L]", vec!["R=301", "L"])]
#[case("RewriteRule ^/old$ /new [R=301, L]", vec!["R=301", "L"])]
#[case("RewriteRule ^/old$ /new", vec![])]
fn test_rewrite_rule_flags(#[case] source: &str, #[case] expected: Vec<&str>) {
    let node = single_directive(source);
    let directive = node.as_directive().unwrap();
    assert_eq!(directive.captures().unwrap().flags(), expected.as_slice());
}

#[test]
fn test_rewrite_cond_captures() {
    let node = single_directive("RewriteCond %{HTTP_HOST} ^www\\.example\\.com$ [NC,OR]");
    match node.as_directive().unwrap().captures().unwrap() {
        DirectiveCaptures::RewriteCond(caps) => {
            assert_eq!(caps.teststring, "%{HTTP_HOST}");
            assert_eq!(caps.condpattern, "^www\\.example\\.com$");
            assert_eq!(caps.flags, vec!["NC", "OR"]);
        }
        other => panic!("wrong captures: {:?}", other),
    }
}

#[rstest]
#[case("RewriteEngine on", "on")]
#[case("RewriteEngine off", "off")]
fn test_rewrite_engine_status(#[case] source: &str, #[case] expected: &str) {
    let node = single_directive(source);
    match node.as_directive().unwrap().captures().unwrap() {
        DirectiveCaptures::RewriteEngine(caps) => assert_eq!(caps.status, expected),
        other => panic!("wrong captures: {:?}", other),
    }
}

#[test]
fn test_unrecognized_rewrite_engine_value_is_generic() {
    // the specialized grammar only accepts lowercase on/off; anything else
    // parses as a plain directive with no captures
    let node = single_directive("RewriteEngine On");
    let directive = node.as_directive().unwrap();
    assert_eq!(directive.kind(), DirectiveKind::Generic);
    assert!(directive.captures().is_none());
    assert_eq!(directive.name(), Some("RewriteEngine"));
}

#[test]
fn test_redirect_permanent_captures() {
    let node = single_directive("RedirectPermanent /one /two");
    let directive = node.as_directive().unwrap();
    assert_eq!(directive.kind(), DirectiveKind::RedirectPermanent);
    match directive.captures().unwrap() {
        DirectiveCaptures::RedirectPermanent(caps) => {
            assert_eq!(caps.url_path, "/one");
            assert_eq!(caps.url, "/two");
        }
        other => panic!("wrong captures: {:?}", other),
    }
}

#[test]
fn test_rewrite_base_captures() {
    let node = single_directive("RewriteBase /blog/");
    match node.as_directive().unwrap().captures().unwrap() {
        DirectiveCaptures::RewriteBase(caps) => assert_eq!(caps.url_path, "/blog/"),
        other => panic!("wrong captures: {:?}", other),
    }
}

#[test]
fn test_continuation_accumulates_across_lines() {
    let node = single_directive("name arg1\\\narg2");
    let directive = node.as_directive().unwrap();
    assert_eq!(directive.name(), Some("name"));
    assert_eq!(**directive.arguments(), vec!["arg1", "arg2"]);
    assert!(directive.complete());
}

#[test]
fn test_long_continuation_chain() {
    let source = "Options first \\\nsecond \\\nthird \\\nfourth";
    let node = single_directive(source);
    let directive = node.as_directive().unwrap();
    assert_eq!(
        **directive.arguments(),
        vec!["first", "second", "third", "fourth"]
    );
    assert_eq!(node.render().unwrap(), source);
}

#[test]
fn test_quoted_arguments_keep_their_quotes() {
    let node = single_directive("ErrorDocument 404 \"/not found.html\"");
    let directive = node.as_directive().unwrap();
    assert_eq!(directive.arguments()[0], "404");
    // tokens split on whitespace; quoting does not group tokens
    assert_eq!(directive.arguments()[1], "\"/not");
}

#[test]
fn test_directive_metadata_accessible() {
    let node = single_directive("Redirect /a /b");
    let kind = node.as_directive().unwrap().kind();
    assert_eq!(kind.module(), Some("mod_alias"));
    assert!(kind.contexts().contains(&"virtual_host"));
}
