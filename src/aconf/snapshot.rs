//! Tree snapshots - a normalized representation of a parse tree
//!
//! A snapshot captures the tree structure with node types, labels,
//! attributes and children in a serializable form, so external tooling can
//! inspect a parse without walking the concrete node types. Serializers
//! consume the snapshot rather than reimplementing traversal.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::aconf::directives::captures::DirectiveCaptures;
use crate::aconf::directives::simple::SimpleDirective;
use crate::aconf::nodes::ConfNode;
use crate::aconf::parser::ConfParser;

/// A snapshot of one node in a normalized, serializable form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    /// The type of node ("Blank", "Comment", "Directive", "Block", "Config")
    pub node_type: String,

    /// The primary label: directive name or comment text
    pub label: String,

    /// Additional attributes specific to the node type
    pub attributes: HashMap<String, String>,

    /// Child nodes in the tree
    pub children: Vec<NodeSnapshot>,
}

impl NodeSnapshot {
    pub fn new(node_type: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            label: label.into(),
            attributes: HashMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_children(mut self, children: Vec<NodeSnapshot>) -> Self {
        self.children.extend(children);
        self
    }

    /// Serialize the snapshot to pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Create a snapshot of a single node and all its children.
pub fn snapshot_node(node: &ConfNode) -> NodeSnapshot {
    match node {
        ConfNode::Blank(_) => NodeSnapshot::new("Blank", ""),
        ConfNode::Comment(comment) => {
            NodeSnapshot::new("Comment", comment.text().unwrap_or_default())
        }
        ConfNode::Directive(directive) => directive_snapshot(directive),
        ConfNode::Block(block) => {
            let mut snapshot = NodeSnapshot::new("Block", block.name().unwrap_or_default())
                .with_attribute("arguments", block.arguments().join(" "));
            snapshot = snapshot.with_children(
                block.body().nodes().iter().map(snapshot_node).collect(),
            );
            snapshot
        }
    }
}

fn directive_snapshot(directive: &SimpleDirective) -> NodeSnapshot {
    let mut snapshot = NodeSnapshot::new("Directive", directive.name().unwrap_or_default())
        .with_attribute("arguments", directive.arguments().join(" "));
    if let Some(module) = directive.kind().module() {
        snapshot = snapshot.with_attribute("module", module);
    }
    if let Some(captures) = directive.captures() {
        snapshot = capture_attributes(snapshot, captures);
    }
    snapshot
}

fn capture_attributes(snapshot: NodeSnapshot, captures: &DirectiveCaptures) -> NodeSnapshot {
    match captures {
        DirectiveCaptures::Redirect(caps) => {
            let snapshot = match &caps.status {
                Some(status) => snapshot.with_attribute("status", status.as_str()),
                None => snapshot,
            };
            snapshot
                .with_attribute("url_path", caps.url_path.as_str())
                .with_attribute("url", caps.url.as_str())
        }
        DirectiveCaptures::RedirectMatch(caps) => {
            let snapshot = match &caps.status {
                Some(status) => snapshot.with_attribute("status", status.as_str()),
                None => snapshot,
            };
            snapshot
                .with_attribute("regex", caps.regex.as_str())
                .with_attribute("url", caps.url.as_str())
        }
        DirectiveCaptures::RedirectPermanent(caps) => snapshot
            .with_attribute("url_path", caps.url_path.as_str())
            .with_attribute("url", caps.url.as_str()),
        DirectiveCaptures::RewriteRule(caps) => snapshot
            .with_attribute("regexp", caps.regexp.as_str())
            .with_attribute("substitution", caps.substitution.as_str())
            .with_attribute("flags", caps.flags.join(",")),
        DirectiveCaptures::RewriteCond(caps) => snapshot
            .with_attribute("teststring", caps.teststring.as_str())
            .with_attribute("condpattern", caps.condpattern.as_str())
            .with_attribute("flags", caps.flags.join(",")),
        DirectiveCaptures::RewriteEngine(caps) => {
            snapshot.with_attribute("status", caps.status.as_str())
        }
        DirectiveCaptures::RewriteBase(caps) => {
            snapshot.with_attribute("url_path", caps.url_path.as_str())
        }
    }
}

/// Create a snapshot of a whole parse.
pub fn snapshot_parser(parser: &ConfParser) -> NodeSnapshot {
    NodeSnapshot::new("Config", "")
        .with_children(parser.nodes().iter().map(snapshot_node).collect())
}
