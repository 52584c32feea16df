//! # aconf-parser
//!
//! An incremental, line-oriented parser and round-trippable in-memory model
//! for the Apache HTTPD configuration syntax.
//!
//! The parser consumes configuration text one physical line at a time. It
//! understands directives, block directives (`<Name ...> ... </Name>`),
//! comments, blank lines and backslash line continuations, and it keeps the
//! raw source lines around so that an unedited parse renders back
//! byte-for-byte. Nodes that are edited programmatically switch to rendering
//! from their structured content instead.
//!
//! This crate is a syntactic model only: it does not interpret directive
//! semantics, resolve includes, or evaluate conditions. File reading and
//! line splitting are the caller's job; the core accepts a line sequence.

#![allow(rustdoc::invalid_html_tags)]

pub mod aconf;
