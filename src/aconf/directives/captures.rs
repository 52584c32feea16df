//! Specialized directive grammars
//!
//! Some directives carry a richer argument grammar than "name plus tokens":
//! a Redirect has a status and a pair of URLs, a RewriteRule has a pattern,
//! a substitution and a bracketed flag list. Each specialized kind supplies
//! one or more regex patterns with named capture groups; patterns are tried
//! in declaration order and the first match wins. Order matters: the
//! three-argument Redirect form is tried before the two-argument form.
//!
//! Specialization changes line classification and capture extraction only.
//! Continuation and completion semantics are those of any simple directive,
//! and captures are best-effort metadata: a continuation line that matches
//! no pattern leaves the previous captures in place.

use once_cell::sync::Lazy;
use regex::Regex;

static REDIRECT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^\s*Redirect\s+(?P<status>.*)\s+(?P<url_path>[^ ]*)\s+(?P<url>.*?)\s*$")
            .unwrap(),
        Regex::new(r"^\s*Redirect\s+(?P<url_path>[^ ]*)\s+(?P<url>.*?)\s*$").unwrap(),
    ]
});

static REDIRECT_MATCH_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^\s*RedirectMatch\s*(?P<status>[^ ]*)?\s+(?P<regex>[^ ]*)\s+(?P<url>.*)$")
            .unwrap(),
    ]
});

static REDIRECT_PERMANENT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![Regex::new(r"^\s*RedirectPermanent\s+(?P<url_path>[^ ]*)\s+(?P<url>.*?)\s*$").unwrap()]
});

static REWRITE_RULE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![Regex::new(
        r"^\s*RewriteRule\s+(?P<regexp>[^ ]*)\s+(?P<substitution>[^ ]*)\s*\[?(?P<flags>[^\] ]*)?\]?$",
    )
    .unwrap()]
});

static REWRITE_COND_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![Regex::new(
        r"^\s*RewriteCond\s+(?P<teststring>[^ ]*)\s+(?P<condpattern>[^ ]*)\s*\[?(?P<flags>[^\] ]*)?\]?$",
    )
    .unwrap()]
});

static REWRITE_ENGINE_PATTERNS: Lazy<Vec<Regex>> =
    Lazy::new(|| vec![Regex::new(r"^\s*RewriteEngine\s+(?P<status>(on|off))\s*$").unwrap()]);

static REWRITE_BASE_PATTERNS: Lazy<Vec<Regex>> =
    Lazy::new(|| vec![Regex::new(r"^\s*RewriteBase\s+(?P<url_path>[^ ]+)\s*$").unwrap()]);

const ALIAS_CONTEXTS: &[&str] = &["server_config", "virtual_host", "directory", ".htaccess"];
const REWRITE_SERVER_CONTEXTS: &[&str] =
    &["server_config", "virtual_host", "directory", ".htaccess"];
const REWRITE_DIR_CONTEXTS: &[&str] = &["directory", ".htaccess"];

/// The grammar a simple directive was classified under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    /// Any directive with no specialized grammar.
    Generic,
    Redirect,
    RedirectMatch,
    RedirectPermanent,
    RewriteRule,
    RewriteCond,
    RewriteEngine,
    RewriteBase,
}

impl DirectiveKind {
    fn patterns(self) -> &'static [Regex] {
        match self {
            DirectiveKind::Generic => &[],
            DirectiveKind::Redirect => REDIRECT_PATTERNS.as_slice(),
            DirectiveKind::RedirectMatch => REDIRECT_MATCH_PATTERNS.as_slice(),
            DirectiveKind::RedirectPermanent => REDIRECT_PERMANENT_PATTERNS.as_slice(),
            DirectiveKind::RewriteRule => REWRITE_RULE_PATTERNS.as_slice(),
            DirectiveKind::RewriteCond => REWRITE_COND_PATTERNS.as_slice(),
            DirectiveKind::RewriteEngine => REWRITE_ENGINE_PATTERNS.as_slice(),
            DirectiveKind::RewriteBase => REWRITE_BASE_PATTERNS.as_slice(),
        }
    }

    /// Test whether any of this kind's patterns claims the line.
    pub fn matches(self, line: &str) -> bool {
        self.patterns().iter().any(|re| re.is_match(line))
    }

    /// The configuration contexts the directive is valid in.
    pub fn contexts(self) -> &'static [&'static str] {
        match self {
            DirectiveKind::Generic => &[],
            DirectiveKind::Redirect
            | DirectiveKind::RedirectMatch
            | DirectiveKind::RedirectPermanent => ALIAS_CONTEXTS,
            DirectiveKind::RewriteRule
            | DirectiveKind::RewriteCond
            | DirectiveKind::RewriteEngine => REWRITE_SERVER_CONTEXTS,
            DirectiveKind::RewriteBase => REWRITE_DIR_CONTEXTS,
        }
    }

    /// The Apache module that provides the directive.
    pub fn module(self) -> Option<&'static str> {
        match self {
            DirectiveKind::Generic => None,
            DirectiveKind::Redirect
            | DirectiveKind::RedirectMatch
            | DirectiveKind::RedirectPermanent => Some("mod_alias"),
            DirectiveKind::RewriteRule
            | DirectiveKind::RewriteCond
            | DirectiveKind::RewriteEngine
            | DirectiveKind::RewriteBase => Some("mod_rewrite"),
        }
    }

    pub fn description(self) -> Option<&'static str> {
        match self {
            DirectiveKind::Generic => None,
            DirectiveKind::Redirect => {
                Some("Sends an external redirect asking the client to fetch a different URL")
            }
            DirectiveKind::RedirectMatch => Some(
                "Sends an external redirect based on a regular expression match of the current URL",
            ),
            DirectiveKind::RedirectPermanent => Some(
                "Sends an external permanent redirect asking the client to fetch a different URL",
            ),
            DirectiveKind::RewriteRule => Some("Defines rules for the rewriting engine"),
            DirectiveKind::RewriteCond => {
                Some("Defines a condition under which rewriting will take place")
            }
            DirectiveKind::RewriteEngine => Some("Enables or disables runtime rewriting engine"),
            DirectiveKind::RewriteBase => Some("Sets the base URL for per-directory rewrites"),
        }
    }

    /// Extract the structured captures this kind's first matching pattern
    /// produces for the line, if any.
    pub fn extract(self, line: &str) -> Option<DirectiveCaptures> {
        let caps = self.patterns().iter().find_map(|re| re.captures(line))?;
        let group = |name: &str| caps.name(name).map(|m| m.as_str().to_string());
        let required = |name: &str| group(name).unwrap_or_default();
        match self {
            DirectiveKind::Generic => None,
            DirectiveKind::Redirect => Some(DirectiveCaptures::Redirect(RedirectCaptures {
                status: group("status"),
                url_path: required("url_path"),
                url: required("url"),
            })),
            DirectiveKind::RedirectMatch => {
                Some(DirectiveCaptures::RedirectMatch(RedirectMatchCaptures {
                    status: group("status"),
                    regex: required("regex"),
                    url: required("url"),
                }))
            }
            DirectiveKind::RedirectPermanent => Some(DirectiveCaptures::RedirectPermanent(
                RedirectPermanentCaptures {
                    url_path: required("url_path"),
                    url: required("url"),
                },
            )),
            DirectiveKind::RewriteRule => {
                Some(DirectiveCaptures::RewriteRule(RewriteRuleCaptures {
                    regexp: required("regexp"),
                    substitution: required("substitution"),
                    flags: split_flags(caps.name("flags").map(|m| m.as_str())),
                }))
            }
            DirectiveKind::RewriteCond => {
                Some(DirectiveCaptures::RewriteCond(RewriteCondCaptures {
                    teststring: required("teststring"),
                    condpattern: required("condpattern"),
                    flags: split_flags(caps.name("flags").map(|m| m.as_str())),
                }))
            }
            DirectiveKind::RewriteEngine => {
                Some(DirectiveCaptures::RewriteEngine(RewriteEngineCaptures {
                    status: required("status"),
                }))
            }
            DirectiveKind::RewriteBase => {
                Some(DirectiveCaptures::RewriteBase(RewriteBaseCaptures {
                    url_path: required("url_path"),
                }))
            }
        }
    }
}

/// Split bracketed flag text on commas, trimming whitespace. Absent or
/// empty flag text yields no flags.
fn split_flags(group: Option<&str>) -> Vec<String> {
    match group {
        None | Some("") => Vec::new(),
        Some(text) => text.split(',').map(|flag| flag.trim().to_string()).collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectCaptures {
    pub status: Option<String>,
    pub url_path: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectMatchCaptures {
    pub status: Option<String>,
    pub regex: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectPermanentCaptures {
    pub url_path: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRuleCaptures {
    pub regexp: String,
    pub substitution: String,
    pub flags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteCondCaptures {
    pub teststring: String,
    pub condpattern: String,
    pub flags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteEngineCaptures {
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteBaseCaptures {
    pub url_path: String,
}

/// Structured captures for one specialized directive line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveCaptures {
    Redirect(RedirectCaptures),
    RedirectMatch(RedirectMatchCaptures),
    RedirectPermanent(RedirectPermanentCaptures),
    RewriteRule(RewriteRuleCaptures),
    RewriteCond(RewriteCondCaptures),
    RewriteEngine(RewriteEngineCaptures),
    RewriteBase(RewriteBaseCaptures),
}

impl DirectiveCaptures {
    /// The rewrite flags, for the kinds that carry them.
    pub fn flags(&self) -> &[String] {
        match self {
            DirectiveCaptures::RewriteRule(caps) => &caps.flags,
            DirectiveCaptures::RewriteCond(caps) => &caps.flags,
            _ => &[],
        }
    }
}
