//! WHATWG HTML tokenizer and tree builder.
//!
//! # Scope
//!
//! This crate implements:
//! - **Tokenizer** ([WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization))
//!   - Every tokenizer state, including script data escapes and CDATA sections
//!   - Named and numeric character references against the full entity table
//!   - Chunked input with CR/LF normalization across chunk boundaries
//!
//! - **Tree Builder** ([WHATWG § 13.2.6](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction))
//!   - All 23 insertion modes
//!   - Adoption agency, foster parenting, quirks mode, foreign content
//!   - Fragment parsing and snapshot/restore between tokens
//!
//! The document itself is built through a [`TreeSink`]; [`DomSink`] builds a
//! [`sapling_dom::DomTree`].
//!
//! ```
//! let tree = sapling_html::parse_document("<p>One<p>Two");
//! let body = tree.body().unwrap();
//! assert_eq!(tree.text_content(body), "OneTwo");
//! ```

/// Parser options.
pub mod config;
/// Pluggable reporting of parse issues.
pub mod diagnostics;
/// [`TreeSink`] over [`sapling_dom::DomTree`].
pub mod dom_sink;
/// Parsing entry points.
pub mod driver;
/// Parse errors.
pub mod error;
/// Element and attribute name classification.
pub mod names;
/// Tree construction.
pub mod parser;
/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;

pub use config::{ParserOptions, XmlViolationPolicy};
pub use diagnostics::{CollectingSink, DiagnosticSink, WarnOnceSink};
pub use dom_sink::DomSink;
pub use driver::{
    FeedStatus, Parser, ParserSnapshot, parse_document, parse_document_with_issues,
    parse_document_with_options, parse_fragment,
};
pub use error::{ErrorCode, IssueCode, ParseError, ParseIssue, TreeErrorCode, XmlViolation};
pub use names::{AttributeName, DocumentMode, ElementName, Namespace};
pub use parser::{FragmentContext, InsertionMode, TreeBuilder, TreeBuilderSnapshot, TreeSink};
pub use tokenizer::{Tokenizer, TokenizerState};
