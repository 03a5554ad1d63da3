//! Helper functions for the HTML tokenizer.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! This module contains utility functions used throughout the tokenizer:
//! - State transitions ("Switch to", "Reconsume in")
//! - Lazy character runs and their flushing
//! - Token emission ("Emit the current token")
//! - Attribute bookkeeping, including duplicate detection
//! - The XML-compatibility policies

use crate::config::XmlViolationPolicy;
use crate::error::{ErrorCode, ParseError, ParseIssue, XmlViolation};
use crate::names::{AttributeName, ElementName};

use super::machine::{Step, StepResult, TagKind, Tokenizer};
use super::state::TokenizerState;
use super::token::{HandlerResult, Tag, TokenHandler};

// =============================================================================
// State Transition Helpers
// =============================================================================

impl<H: TokenHandler> Tokenizer<H> {
    /// "Switch to the X state"
    ///
    /// The current character is used up.
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) -> Step {
        self.state = new_state;
        Step::Consume
    }

    /// "Reconsume in the X state"
    ///
    /// The same character will be processed again in the new state.
    pub(super) const fn reconsume_in(&mut self, new_state: TokenizerState) -> Step {
        self.state = new_state;
        Step::Reconsume
    }

    /// "U+0009 CHARACTER TABULATION (tab), U+000A LINE FEED (LF), U+000C FORM
    /// FEED (FF), U+0020 SPACE". CR never reaches a state.
    pub(super) const fn is_whitespace(c: char) -> bool {
        matches!(c, '\t' | '\n' | '\x0C' | ' ')
    }

    /// Report a lexical parse error at the current position.
    pub(super) fn parse_error(&mut self, code: ErrorCode) {
        log::trace!("tokenizer: {code} at {}", self.position);
        self.handler.parse_error(ParseIssue::lexical(code, self.position));
    }
}

// =============================================================================
// Character Runs
// =============================================================================

impl<H: TokenHandler> Tokenizer<H> {
    /// "Emit the current input character as a character token", lazily: the
    /// character joins the run that starts at `cstart`.
    pub(super) const fn text_char(&mut self, pos: usize) {
        if self.cstart.is_none() {
            self.cstart = Some(pos);
        }
    }

    /// Report the pending run `[cstart, pos)` of `text`, if any.
    pub(super) fn flush_chars_until(&mut self, text: &str, pos: usize) -> Result<(), ParseError> {
        if let Some(start) = self.cstart.take()
            && start < pos
            && let Some(run) = text.get(start..pos)
        {
            self.emit_text(run)?;
        }
        Ok(())
    }

    /// Emit characters that are not (or no longer) a slice of the input.
    pub(super) fn emit_text(&mut self, text: &str) -> Result<(), ParseError> {
        if self.content_space_policy == XmlViolationPolicy::Allow || !text.contains('\x0C') {
            self.handler.characters(text);
            return Ok(());
        }
        match self.content_space_policy {
            XmlViolationPolicy::Fatal => Err(ParseError::XmlViolation {
                violation: XmlViolation::FormFeed,
                position: self.position,
            }),
            _ => {
                self.handler.characters(&text.replace('\x0C', " "));
                Ok(())
            }
        }
    }

    /// "This is an unexpected-null-character parse error. Emit a U+FFFD
    /// REPLACEMENT CHARACTER character token."
    pub(super) fn emit_replacement_character(
        &mut self,
        text: &str,
        pos: usize,
    ) -> Result<(), ParseError> {
        self.flush_chars_until(text, pos)?;
        self.parse_error(ErrorCode::UnexpectedNullCharacter);
        self.emit_text("\u{FFFD}")
    }
}

// =============================================================================
// Tag Helpers
// =============================================================================

impl<H: TokenHandler> Tokenizer<H> {
    /// "Create a new start tag token" / "Create a new end tag token": "its
    /// self-closing flag must be unset ... and its attributes list must be
    /// empty."
    pub(super) fn create_tag(&mut self, kind: TagKind) {
        self.tag_kind = kind;
        self.tag_name = None;
        self.self_closing = false;
        self.attributes.clear();
        self.attribute_pending = false;
        self.attribute_name = None;
        self.name_buf.clear();
    }

    /// The tag name is complete once the tag name state is left.
    pub(super) fn finish_tag_name(&mut self) {
        self.tag_name = Some(ElementName::classify(&self.name_buf));
    }

    /// [§ 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#appropriate-end-tag-token)
    ///
    /// "An appropriate end tag token is an end tag token whose tag name matches
    /// the tag name of the last start tag to have been emitted from this
    /// tokenizer"
    pub(super) fn is_appropriate_end_tag(&self) -> bool {
        self.end_tag_expectation
            .as_ref()
            .is_some_and(|expected| expected.name() == self.name_buf)
    }

    /// "Start a new attribute in the current tag token. Set that attribute
    /// name and value to the empty string."
    pub(super) fn start_attribute(&mut self) -> Result<(), ParseError> {
        self.finish_attribute()?;
        self.name_buf.clear();
        self.long_buf.clear();
        self.attribute_pending = true;
        self.attribute_name = None;
        Ok(())
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    ///
    /// "When the user agent leaves the attribute name state (and before
    /// emitting the tag token, if appropriate), the complete attribute's name
    /// must be compared to the other attributes on the same token; if there is
    /// already an attribute on the token with the exact same name, then this is
    /// a duplicate-attribute parse error and the new attribute must be removed
    /// from the token."
    pub(super) fn attribute_name_complete(&mut self) {
        let name = AttributeName::classify(&self.name_buf);
        if self.attributes.contains(&name) {
            self.parse_error(ErrorCode::DuplicateAttribute);
            self.attribute_name = None;
        } else {
            self.attribute_name = Some(name);
        }
    }

    /// Move the pending attribute onto the tag.
    pub(super) fn finish_attribute(&mut self) -> Result<(), ParseError> {
        if !self.attribute_pending {
            return Ok(());
        }
        self.attribute_pending = false;
        let Some(name) = self.attribute_name.take() else {
            return Ok(());
        };
        if name.is_xmlns() {
            match self.xmlns_policy {
                XmlViolationPolicy::Allow => {}
                XmlViolationPolicy::AlterInfoset => return Ok(()),
                XmlViolationPolicy::Fatal => {
                    return Err(ParseError::XmlViolation {
                        violation: XmlViolation::XmlnsAttribute,
                        position: self.position,
                    });
                }
            }
        }
        let _ = self.attributes.push(name, self.long_buf.clone());
        Ok(())
    }

    /// "Emit the current tag token", then continue in whatever state the
    /// handler asked for.
    pub(super) fn emit_tag(&mut self) -> StepResult {
        self.finish_attribute()?;
        let name = match self.tag_name.take() {
            Some(name) => name,
            None => ElementName::classify(&self.name_buf),
        };
        self.handler.set_position(self.position);
        self.state = TokenizerState::Data;
        match self.tag_kind {
            TagKind::Start => {
                let tag = Tag {
                    name,
                    attributes: self.attributes.finish(),
                    self_closing: self.self_closing,
                };
                match self.handler.start_tag(tag) {
                    HandlerResult::Continue => {}
                    HandlerResult::SwitchTo { state, end_tag } => {
                        self.set_state_and_end_tag_expectation(state, end_tag);
                    }
                    HandlerResult::Suspend => self.suspend_requested = true,
                }
            }
            TagKind::End => {
                // "When an end tag token is emitted with attributes, that is an
                // end-tag-with-attributes parse error."
                if !self.attributes.is_empty() {
                    self.parse_error(ErrorCode::EndTagWithAttributes);
                    self.attributes.clear();
                }
                // "When an end tag token is emitted with its self-closing flag
                // set, that is an end-tag-with-trailing-solidus parse error."
                if self.self_closing {
                    self.parse_error(ErrorCode::EndTagWithTrailingSolidus);
                }
                self.handler.end_tag(name);
            }
        }
        Ok(Step::Consume)
    }
}

// =============================================================================
// Comment, DOCTYPE and EOF Emission
// =============================================================================

impl<H: TokenHandler> Tokenizer<H> {
    /// "Emit the comment token." The data is in the long buffer.
    pub(super) fn emit_comment(&mut self) -> Result<(), ParseError> {
        self.handler.set_position(self.position);
        let needs_fix = self.long_buf.contains("--") || self.long_buf.ends_with('-');
        if needs_fix {
            match self.comment_policy {
                XmlViolationPolicy::Allow => {}
                XmlViolationPolicy::Fatal => {
                    return Err(ParseError::XmlViolation {
                        violation: XmlViolation::CommentDoubleHyphen,
                        position: self.position,
                    });
                }
                XmlViolationPolicy::AlterInfoset => {
                    let mut fixed = self.long_buf.replace("--", "- -");
                    while fixed.contains("--") {
                        fixed = fixed.replace("--", "- -");
                    }
                    if fixed.ends_with('-') {
                        fixed.push(' ');
                    }
                    if self.handler.wants_comments() {
                        self.handler.comment(&fixed);
                    }
                    self.long_buf.clear();
                    return Ok(());
                }
            }
        }
        if self.handler.wants_comments() {
            self.handler.comment(&self.long_buf);
        }
        self.long_buf.clear();
        Ok(())
    }

    /// "Emit the current DOCTYPE token."
    pub(super) fn emit_doctype(&mut self) {
        self.handler.set_position(self.position);
        let doctype = std::mem::take(&mut self.doctype);
        self.handler.doctype(doctype);
    }

    /// "Set the current DOCTYPE token's force-quirks flag to on. Emit the
    /// current DOCTYPE token."
    pub(super) fn emit_quirky_doctype(&mut self) {
        self.doctype.force_quirks = true;
        self.emit_doctype();
    }

    /// "Emit an end-of-file token."
    pub(super) fn emit_eof(&mut self) {
        if !self.eof_delivered {
            self.eof_delivered = true;
            self.handler.set_position(self.position);
            self.handler.eof();
        }
    }
}
