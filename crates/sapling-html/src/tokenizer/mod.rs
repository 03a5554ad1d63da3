//! HTML tokenizer module.
//!
//! Implements [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//! of the WHATWG HTML Living Standard.

/// Character reference states per § 13.2.5.72 - § 13.2.5.80.
mod character_reference;
/// Helper methods for tokenizer state transitions and token emission.
mod helpers;
/// The state machine and its main loop.
mod machine;
/// Named character reference lookup table per § 13.5.
pub mod named_character_references;
/// RCDATA, RAWTEXT and script data states.
mod script;
/// Saving and restoring the lexical state.
mod snapshot;
/// The tokenizer states.
mod state;
/// Data, tag, comment, DOCTYPE and CDATA states.
mod states;
/// Tokens and the handler interface.
mod token;

pub use machine::{InputBuffer, TokenizeOutcome, Tokenizer};
pub use snapshot::TokenizerSnapshot;
pub use state::TokenizerState;
pub use token::{
    Attribute, Attributes, AttributesBuilder, Doctype, HandlerResult, Position, Tag, TokenHandler,
};
