//! Parsing entry points: the streaming [`Parser`] and one-shot helpers.
//!
//! [§ 13.2.1 Overview of the parsing model](https://html.spec.whatwg.org/multipage/parsing.html#overview-of-the-parsing-model)
//!
//! "The input to the HTML parsing process consists of a stream of code
//! points, which is passed through a tokenization stage followed by a tree
//! construction stage."

use sapling_dom::DomTree;

use crate::config::ParserOptions;
use crate::diagnostics::{CollectingSink, DiagnosticSink};
use crate::dom_sink::DomSink;
use crate::error::{ParseError, ParseIssue};
use crate::names::Namespace;
use crate::parser::{FragmentContext, TreeBuilder, TreeBuilderSnapshot, TreeSink};
use crate::tokenizer::{InputBuffer, Tokenizer, TokenizerSnapshot};

/// How a call to [`Parser::feed`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedStatus {
    /// The whole chunk was consumed.
    Done,
    /// The sink asked to stop (see
    /// [`TreeSink::internal_encoding_declaration`]). The first `consumed`
    /// bytes of the chunk were processed; feed the rest to continue.
    Suspended {
        /// Bytes of the chunk consumed.
        consumed: usize,
    },
}

/// Everything needed to resume a parse from a token boundary.
#[derive(Debug)]
pub struct ParserSnapshot<H> {
    tokenizer: TokenizerSnapshot,
    tree: TreeBuilderSnapshot<H>,
}

impl<H> Clone for ParserSnapshot<H> {
    fn clone(&self) -> Self {
        Self {
            tokenizer: self.tokenizer.clone(),
            tree: self.tree.clone(),
        }
    }
}

impl<H> ParserSnapshot<H> {
    /// The lexical half.
    #[must_use]
    pub const fn tokenizer(&self) -> &TokenizerSnapshot {
        &self.tokenizer
    }

    /// The tree-construction half.
    #[must_use]
    pub const fn tree(&self) -> &TreeBuilderSnapshot<H> {
        &self.tree
    }
}

/// A tokenizer feeding a tree builder.
///
/// Input arrives in chunks through [`feed`](Self::feed); a CR at the end of
/// one chunk and an LF at the start of the next are one line break.
pub struct Parser<S: TreeSink> {
    tokenizer: Tokenizer<TreeBuilder<S>>,
}

impl<S: TreeSink> Parser<S> {
    /// A parser for a whole document.
    #[must_use]
    pub fn new(sink: S, options: ParserOptions) -> Self {
        let mut tokenizer = Tokenizer::new(TreeBuilder::new(sink, options), &options);
        tokenizer.start();
        Self { tokenizer }
    }

    /// [§ 13.4 Parsing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#parsing-html-fragments)
    ///
    /// A parser for the children of `context`.
    #[must_use]
    pub fn new_fragment(sink: S, options: ParserOptions, context: &FragmentContext) -> Self {
        let builder = TreeBuilder::new_fragment(sink, options, context);
        let mut tokenizer = Tokenizer::new(builder, &options);
        let state = context.tokenizer_state(options.scripting_enabled);
        let end_tag = (context.namespace == Namespace::Html).then(|| context.name.clone());
        tokenizer.set_state_and_end_tag_expectation(state, end_tag);
        tokenizer.start();
        Self { tokenizer }
    }

    /// Report parse errors and warnings to `diagnostics`.
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: Box<dyn DiagnosticSink>) -> Self {
        self.tokenizer
            .handler_mut()
            .set_diagnostics(Some(diagnostics));
        self
    }

    /// Consume `chunk`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::XmlViolation`] when an XML policy is fatal and the
    /// chunk violates it.
    pub fn feed(&mut self, chunk: &str) -> Result<FeedStatus, ParseError> {
        let mut buffer = InputBuffer::new(chunk);
        let outcome = self.tokenizer.tokenize_buffer(&mut buffer)?;
        if outcome.suspended {
            log::debug!("parser: suspended after {} of {} bytes", buffer.start, chunk.len());
            return Ok(FeedStatus::Suspended {
                consumed: buffer.start,
            });
        }
        Ok(FeedStatus::Done)
    }

    /// Consume `chunk`, resuming after every suspension.
    ///
    /// # Errors
    ///
    /// As [`feed`](Self::feed).
    pub fn feed_all(&mut self, chunk: &str) -> Result<(), ParseError> {
        let mut rest = chunk;
        while let FeedStatus::Suspended { consumed } = self.feed(rest)? {
            rest = rest.get(consumed..).unwrap_or_default();
        }
        Ok(())
    }

    fn end_of_input(&mut self) -> Result<(), ParseError> {
        self.tokenizer.eof()?;
        self.tokenizer.end();
        Ok(())
    }

    /// Signal the end of the input and give back the sink.
    ///
    /// # Errors
    ///
    /// As [`feed`](Self::feed), for the end-of-file transitions.
    pub fn finish(mut self) -> Result<S, ParseError> {
        self.end_of_input()?;
        Ok(self.into_sink())
    }

    /// Give back the sink without signalling the end of the input.
    #[must_use]
    pub fn into_sink(self) -> S {
        self.tokenizer.into_handler().into_sink()
    }

    /// The sink.
    #[must_use]
    pub const fn sink(&self) -> &S {
        self.tokenizer.handler().sink()
    }

    /// The tree builder.
    #[must_use]
    pub const fn tree_builder(&self) -> &TreeBuilder<S> {
        self.tokenizer.handler()
    }

    /// Capture the parser's state between two chunks.
    #[must_use]
    pub fn snapshot(&self) -> ParserSnapshot<S::Handle> {
        ParserSnapshot {
            tokenizer: self.tokenizer.snapshot(),
            tree: self.tokenizer.handler().snapshot(),
        }
    }

    /// Return to the state captured by `snapshot`. Nodes the sink created
    /// since then are left where they are.
    pub fn restore(&mut self, snapshot: &ParserSnapshot<S::Handle>) {
        self.tokenizer.restore(&snapshot.tokenizer);
        self.tokenizer.handler_mut().restore(&snapshot.tree);
    }
}

fn run<S: TreeSink>(parser: &mut Parser<S>, input: &str) {
    if let Err(error) = parser.feed_all(input).and_then(|()| parser.end_of_input()) {
        log::warn!("parser: aborted: {error}");
    }
}

/// Parse a complete document with the default options.
#[must_use]
pub fn parse_document(input: &str) -> DomTree {
    let mut parser = Parser::new(DomSink::new(), ParserOptions::new());
    run(&mut parser, input);
    parser.into_sink().into_tree()
}

/// Parse a complete document, collecting every parse error along the way.
#[must_use]
pub fn parse_document_with_issues(input: &str) -> (DomTree, Vec<ParseIssue>) {
    parse_document_with_options(input, ParserOptions::new())
}

/// Parse a complete document with `options`, collecting issues.
///
/// Under a fatal XML policy a violation ends the parse early; the tree holds
/// what was built up to that point.
#[must_use]
pub fn parse_document_with_options(input: &str, options: ParserOptions) -> (DomTree, Vec<ParseIssue>) {
    let issues = CollectingSink::new();
    let mut parser =
        Parser::new(DomSink::new(), options).with_diagnostics(Box::new(issues.clone()));
    run(&mut parser, input);
    (parser.into_sink().into_tree(), issues.take())
}

/// [§ 13.4 Parsing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#parsing-html-fragments)
///
/// Parse `input` as the contents of `context`. The returned tree's document
/// node holds the fragment's top-level nodes directly.
#[must_use]
pub fn parse_fragment(input: &str, context: &FragmentContext) -> DomTree {
    let mut parser = Parser::new_fragment(DomSink::new(), ParserOptions::new(), context);
    run(&mut parser, input);
    parser.into_sink().into_fragment()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_children_land_on_the_document() {
        let tree = parse_fragment("<b>x</b>y", &FragmentContext::html("div"));
        assert_eq!(tree.to_test_format(), "| <b>\n|   \"x\"\n| \"y\"\n");
    }

    #[test]
    fn suspension_reports_consumed_bytes() {
        let input = "<meta charset=latin1><p>after";
        let mut parser = Parser::new(
            DomSink::new().with_charset_suspension(),
            ParserOptions::new(),
        );
        let status = parser.feed(input).unwrap();
        let consumed = "<meta charset=latin1>".len();
        assert_eq!(status, FeedStatus::Suspended { consumed });
        assert_eq!(parser.sink().declared_charset(), Some("latin1"));

        assert_eq!(parser.feed(&input[consumed..]).unwrap(), FeedStatus::Done);
        let tree = parser.finish().unwrap().into_tree();
        let body = tree.body().unwrap();
        assert_eq!(tree.text_content(body), "after");
    }
}
