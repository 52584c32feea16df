//! Directive nodes
//!
//! A directive is a single configuration statement: a name followed by
//! arguments, possibly spanning physical lines via continuations. Block
//! directives wrap a nested body between an opening tag and a closing tag.
//! Both forms compose a shared header value object rather than layering
//! inheritance: the header owns the name/argument grammar, the variants
//! own line bookkeeping and, for blocks, the body and tail.

pub mod block;
pub mod captures;
pub mod header;
pub mod simple;

pub use block::ComplexDirective;
pub use captures::{DirectiveCaptures, DirectiveKind};
pub use header::{ArgumentList, DirectiveHeader};
pub use simple::SimpleDirective;
