//! Test support
//!
//! Helpers shared by the integration test suite. They panic with the parse
//! error and the offending source on failure, keeping the tests themselves
//! focused on assertions.

use crate::aconf::parser::ConfParser;

/// Parse a source that the test expects to be valid.
pub fn parse_ok(source: &str) -> ConfParser {
    match ConfParser::parse(source) {
        Ok(parser) => parser,
        Err(err) => panic!("failed to parse configuration: {}\nsource:\n{}", err, source),
    }
}

/// Parse and render a source that the test expects to be valid.
pub fn rendered(source: &str) -> String {
    match parse_ok(source).render() {
        Ok(text) => text,
        Err(err) => panic!("failed to render configuration: {}\nsource:\n{}", err, source),
    }
}

/// Assert that an unedited parse reproduces its source exactly.
pub fn assert_round_trip(source: &str) {
    assert_eq!(rendered(source), source, "round trip failed for:\n{}", source);
}
