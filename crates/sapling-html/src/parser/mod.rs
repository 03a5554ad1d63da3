//! HTML tree construction.
//!
//! [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
//!
//! [`TreeBuilder`] is a [`TokenHandler`](crate::tokenizer::TokenHandler): the
//! tokenizer hands it tokens, it runs the insertion modes and reports every
//! mutation to a [`TreeSink`].

/// The adoption agency algorithm and "any other end tag".
mod adoption;
/// Rules for parsing tokens in foreign content.
mod foreign_content;
/// The "in body" insertion mode.
mod in_body;
/// The insertion mode enum.
mod insertion_mode;
/// Document-level insertion modes: everything outside body, tables and select.
mod modes;
/// DOCTYPE to quirks mode mapping.
mod quirks;
/// The tree sink interface.
mod sink;
/// Tree builder snapshots.
mod snapshot;
/// Stack of open elements and list of active formatting elements.
mod stack;
/// Table, select and template insertion modes.
mod tables;
/// Dispatch and the shared insertion algorithms.
mod tree_builder;

pub use insertion_mode::InsertionMode;
pub use quirks::{document_mode_for, is_legacy_doctype};
pub use sink::TreeSink;
pub use snapshot::TreeBuilderSnapshot;
pub use tree_builder::{FragmentContext, TreeBuilder};
