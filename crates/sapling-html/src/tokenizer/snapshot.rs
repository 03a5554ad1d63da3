//! Saving and restoring the lexical state.

use crate::names::{AttributeName, ElementName};

use super::machine::{NamedReference, TagKind, Tokenizer};
use super::state::TokenizerState;
use super::token::{AttributesBuilder, Doctype, Position, TokenHandler};

/// Everything the tokenizer knows between two characters, apart from its
/// handler.
///
/// Restoring a snapshot puts the tokenizer back exactly where it was, partial
/// tokens and character references included.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone)]
pub struct TokenizerSnapshot {
    state: TokenizerState,
    return_state: TokenizerState,
    last_cr: bool,
    name_buf: String,
    long_buf: String,
    temp_buf: String,
    tag_kind: TagKind,
    tag_name: Option<ElementName>,
    self_closing: bool,
    attributes: AttributesBuilder,
    attribute_pending: bool,
    attribute_name: Option<AttributeName>,
    doctype: Doctype,
    end_tag_expectation: Option<ElementName>,
    named: NamedReference,
    char_ref_code: u32,
    keyword_index: usize,
    position: Position,
    eof_delivered: bool,
}

impl TokenizerSnapshot {
    /// The state the tokenizer was in.
    #[must_use]
    pub const fn state(&self) -> TokenizerState {
        self.state
    }

    /// Location of the next character at the time of the snapshot.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }
}

impl<H: TokenHandler> Tokenizer<H> {
    /// Capture the current lexical state.
    #[must_use]
    pub fn snapshot(&self) -> TokenizerSnapshot {
        TokenizerSnapshot {
            state: self.state,
            return_state: self.return_state,
            last_cr: self.last_cr,
            name_buf: self.name_buf.clone(),
            long_buf: self.long_buf.clone(),
            temp_buf: self.temp_buf.clone(),
            tag_kind: self.tag_kind,
            tag_name: self.tag_name.clone(),
            self_closing: self.self_closing,
            attributes: self.attributes.clone(),
            attribute_pending: self.attribute_pending,
            attribute_name: self.attribute_name.clone(),
            doctype: self.doctype.clone(),
            end_tag_expectation: self.end_tag_expectation.clone(),
            named: self.named,
            char_ref_code: self.char_ref_code,
            keyword_index: self.keyword_index,
            position: self.position,
            eof_delivered: self.eof_delivered,
        }
    }

    /// Return to the state captured by `snapshot`. The handler is untouched.
    pub fn restore(&mut self, snapshot: &TokenizerSnapshot) {
        log::debug!(
            "tokenizer: restoring {} at {}",
            snapshot.state,
            snapshot.position
        );
        self.state = snapshot.state;
        self.return_state = snapshot.return_state;
        self.cstart = None;
        self.last_cr = snapshot.last_cr;
        self.name_buf.clone_from(&snapshot.name_buf);
        self.long_buf.clone_from(&snapshot.long_buf);
        self.temp_buf.clone_from(&snapshot.temp_buf);
        self.tag_kind = snapshot.tag_kind;
        self.tag_name.clone_from(&snapshot.tag_name);
        self.self_closing = snapshot.self_closing;
        self.attributes.clone_from(&snapshot.attributes);
        self.attribute_pending = snapshot.attribute_pending;
        self.attribute_name.clone_from(&snapshot.attribute_name);
        self.doctype.clone_from(&snapshot.doctype);
        self.end_tag_expectation
            .clone_from(&snapshot.end_tag_expectation);
        self.named = snapshot.named;
        self.char_ref_code = snapshot.char_ref_code;
        self.keyword_index = snapshot.keyword_index;
        self.position = snapshot.position;
        self.suspend_requested = false;
        self.eof_delivered = snapshot.eof_delivered;
    }
}
