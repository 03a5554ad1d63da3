//! Data, tag, attribute, comment, DOCTYPE and CDATA states.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! Every state handler sees exactly one character. Multi-character lookahead
//! from the standard ("If the next few characters are...") is spread over
//! extra states so that a keyword may be split across input buffers.

use crate::error::{ErrorCode, ParseError};

use super::machine::{Step, StepResult, TagKind, Tokenizer};
use super::state::TokenizerState;
use super::token::{Doctype, TokenHandler};

const DOCTYPE_KEYWORD: &str = "DOCTYPE";
const CDATA_KEYWORD: &str = "[CDATA[";

// =============================================================================
// Data and Tag States
// =============================================================================

impl<H: TokenHandler> Tokenizer<H> {
    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    pub(super) fn data_state(&mut self, text: &str, pos: usize, c: char) -> StepResult {
        match c {
            // "U+0026 AMPERSAND (&): Set the return state to the data state.
            // Switch to the character reference state."
            '&' => {
                self.flush_chars_until(text, pos)?;
                Ok(self.begin_character_reference(TokenizerState::Data))
            }
            // "U+003C LESS-THAN SIGN (<): Switch to the tag open state."
            '<' => {
                self.flush_chars_until(text, pos)?;
                Ok(self.switch_to(TokenizerState::TagOpen))
            }
            // "U+0000 NULL: This is an unexpected-null-character parse error.
            // Emit the current input character as a character token."
            '\0' => {
                self.flush_chars_until(text, pos)?;
                self.parse_error(ErrorCode::UnexpectedNullCharacter);
                self.handler.zero_originating_replacement_character();
                Ok(Step::Consume)
            }
            _ => {
                self.text_char(pos);
                Ok(Step::Consume)
            }
        }
    }

    /// [§ 13.2.5.5 PLAINTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#plaintext-state)
    pub(super) fn plaintext_state(&mut self, text: &str, pos: usize, c: char) -> StepResult {
        if c == '\0' {
            self.emit_replacement_character(text, pos)?;
        } else {
            self.text_char(pos);
        }
        Ok(Step::Consume)
    }

    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    pub(super) fn tag_open_state(&mut self, c: char) -> StepResult {
        match c {
            // "U+0021 EXCLAMATION MARK (!): Switch to the markup declaration
            // open state."
            '!' => Ok(self.switch_to(TokenizerState::MarkupDeclarationOpen)),
            // "U+002F SOLIDUS (/): Switch to the end tag open state."
            '/' => Ok(self.switch_to(TokenizerState::EndTagOpen)),
            // "ASCII alpha: Create a new start tag token, set its tag name to
            // the empty string. Reconsume in the tag name state."
            c if c.is_ascii_alphabetic() => {
                self.create_tag(TagKind::Start);
                Ok(self.reconsume_in(TokenizerState::TagName))
            }
            // "U+003F QUESTION MARK (?): This is an
            // unexpected-question-mark-instead-of-tag-name parse error. Create a
            // comment token whose data is the empty string. Reconsume in the
            // bogus comment state."
            '?' => {
                self.parse_error(ErrorCode::UnexpectedQuestionMarkInsteadOfTagName);
                self.long_buf.clear();
                Ok(self.reconsume_in(TokenizerState::BogusComment))
            }
            // "Anything else: This is an invalid-first-character-of-tag-name
            // parse error. Emit a U+003C LESS-THAN SIGN character token.
            // Reconsume in the data state."
            _ => {
                self.parse_error(ErrorCode::InvalidFirstCharacterOfTagName);
                self.emit_text("<")?;
                Ok(self.reconsume_in(TokenizerState::Data))
            }
        }
    }

    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    pub(super) fn end_tag_open_state(&mut self, c: char) -> StepResult {
        match c {
            c if c.is_ascii_alphabetic() => {
                self.create_tag(TagKind::End);
                Ok(self.reconsume_in(TokenizerState::TagName))
            }
            // "This is a missing-end-tag-name parse error. Switch to the data
            // state."
            '>' => {
                self.parse_error(ErrorCode::MissingEndTagName);
                Ok(self.switch_to(TokenizerState::Data))
            }
            _ => {
                self.parse_error(ErrorCode::InvalidFirstCharacterOfTagName);
                self.long_buf.clear();
                Ok(self.reconsume_in(TokenizerState::BogusComment))
            }
        }
    }

    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    pub(super) fn tag_name_state(&mut self, c: char) -> StepResult {
        match c {
            c if Self::is_whitespace(c) => {
                self.finish_tag_name();
                Ok(self.switch_to(TokenizerState::BeforeAttributeName))
            }
            '/' => {
                self.finish_tag_name();
                Ok(self.switch_to(TokenizerState::SelfClosingStartTag))
            }
            '>' => {
                self.finish_tag_name();
                self.emit_tag()
            }
            '\0' => {
                self.parse_error(ErrorCode::UnexpectedNullCharacter);
                self.name_buf.push('\u{FFFD}');
                Ok(Step::Consume)
            }
            // "ASCII upper alpha: Append the lowercase version of the current
            // input character to the current tag token's tag name."
            c => {
                self.name_buf.push(c.to_ascii_lowercase());
                Ok(Step::Consume)
            }
        }
    }
}

// =============================================================================
// Attribute States
// =============================================================================

impl<H: TokenHandler> Tokenizer<H> {
    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    pub(super) fn before_attribute_name_state(&mut self, c: char) -> StepResult {
        match c {
            c if Self::is_whitespace(c) => Ok(Step::Consume),
            '/' | '>' => Ok(self.reconsume_in(TokenizerState::AfterAttributeName)),
            // "This is an unexpected-equals-sign-before-attribute-name parse
            // error. Start a new attribute in the current tag token. Set that
            // attribute's name to the current input character, and its value to
            // the empty string."
            '=' => {
                self.parse_error(ErrorCode::UnexpectedEqualsSignBeforeAttributeName);
                self.start_attribute()?;
                self.name_buf.push('=');
                Ok(self.switch_to(TokenizerState::AttributeName))
            }
            _ => {
                self.start_attribute()?;
                Ok(self.reconsume_in(TokenizerState::AttributeName))
            }
        }
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    pub(super) fn attribute_name_state(&mut self, c: char) -> StepResult {
        match c {
            c if Self::is_whitespace(c) || c == '/' || c == '>' => {
                self.attribute_name_complete();
                Ok(self.reconsume_in(TokenizerState::AfterAttributeName))
            }
            '=' => {
                self.attribute_name_complete();
                Ok(self.switch_to(TokenizerState::BeforeAttributeValue))
            }
            '\0' => {
                self.parse_error(ErrorCode::UnexpectedNullCharacter);
                self.name_buf.push('\u{FFFD}');
                Ok(Step::Consume)
            }
            // "This is an unexpected-character-in-attribute-name parse error.
            // Treat it as per the "anything else" entry below."
            '"' | '\'' | '<' => {
                self.parse_error(ErrorCode::UnexpectedCharacterInAttributeName);
                self.name_buf.push(c);
                Ok(Step::Consume)
            }
            c => {
                self.name_buf.push(c.to_ascii_lowercase());
                Ok(Step::Consume)
            }
        }
    }

    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    pub(super) fn after_attribute_name_state(&mut self, c: char) -> StepResult {
        match c {
            c if Self::is_whitespace(c) => Ok(Step::Consume),
            '/' => Ok(self.switch_to(TokenizerState::SelfClosingStartTag)),
            '=' => Ok(self.switch_to(TokenizerState::BeforeAttributeValue)),
            '>' => self.emit_tag(),
            _ => {
                self.start_attribute()?;
                Ok(self.reconsume_in(TokenizerState::AttributeName))
            }
        }
    }

    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    pub(super) fn before_attribute_value_state(&mut self, c: char) -> StepResult {
        match c {
            c if Self::is_whitespace(c) => Ok(Step::Consume),
            '"' => Ok(self.switch_to(TokenizerState::AttributeValueDoubleQuoted)),
            '\'' => Ok(self.switch_to(TokenizerState::AttributeValueSingleQuoted)),
            // "This is a missing-attribute-value parse error. Switch to the data
            // state. Emit the current tag token."
            '>' => {
                self.parse_error(ErrorCode::MissingAttributeValue);
                self.emit_tag()
            }
            _ => Ok(self.reconsume_in(TokenizerState::AttributeValueUnquoted)),
        }
    }

    /// [§ 13.2.5.36 Attribute value (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    /// and [§ 13.2.5.37 Attribute value (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state)
    pub(super) fn attribute_value_quoted_state(&mut self, c: char, quote: char) -> StepResult {
        match c {
            c if c == quote => Ok(self.switch_to(TokenizerState::AfterAttributeValueQuoted)),
            // "Set the return state to the attribute value (double-quoted)
            // state. Switch to the character reference state."
            '&' => Ok(self.begin_character_reference(self.state)),
            '\0' => {
                self.parse_error(ErrorCode::UnexpectedNullCharacter);
                self.long_buf.push('\u{FFFD}');
                Ok(Step::Consume)
            }
            c => {
                self.long_buf.push(c);
                Ok(Step::Consume)
            }
        }
    }

    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    pub(super) fn attribute_value_unquoted_state(&mut self, c: char) -> StepResult {
        match c {
            c if Self::is_whitespace(c) => Ok(self.switch_to(TokenizerState::BeforeAttributeName)),
            '&' => Ok(self.begin_character_reference(TokenizerState::AttributeValueUnquoted)),
            '>' => self.emit_tag(),
            '\0' => {
                self.parse_error(ErrorCode::UnexpectedNullCharacter);
                self.long_buf.push('\u{FFFD}');
                Ok(Step::Consume)
            }
            '"' | '\'' | '<' | '=' | '`' => {
                self.parse_error(ErrorCode::UnexpectedCharacterInUnquotedAttributeValue);
                self.long_buf.push(c);
                Ok(Step::Consume)
            }
            c => {
                self.long_buf.push(c);
                Ok(Step::Consume)
            }
        }
    }

    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    pub(super) fn after_attribute_value_quoted_state(&mut self, c: char) -> StepResult {
        match c {
            c if Self::is_whitespace(c) => Ok(self.switch_to(TokenizerState::BeforeAttributeName)),
            '/' => Ok(self.switch_to(TokenizerState::SelfClosingStartTag)),
            '>' => self.emit_tag(),
            _ => {
                self.parse_error(ErrorCode::MissingWhitespaceBetweenAttributes);
                Ok(self.reconsume_in(TokenizerState::BeforeAttributeName))
            }
        }
    }

    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    pub(super) fn self_closing_start_tag_state(&mut self, c: char) -> StepResult {
        if c == '>' {
            // "Set the self-closing flag of the current tag token. Switch to
            // the data state. Emit the current tag token."
            self.self_closing = true;
            return self.emit_tag();
        }
        self.parse_error(ErrorCode::UnexpectedSolidusInTag);
        Ok(self.reconsume_in(TokenizerState::BeforeAttributeName))
    }
}

// =============================================================================
// Markup Declarations and Comments
// =============================================================================

impl<H: TokenHandler> Tokenizer<H> {
    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    pub(super) fn bogus_comment_state(&mut self, c: char) -> StepResult {
        match c {
            '>' => {
                self.emit_comment()?;
                Ok(self.switch_to(TokenizerState::Data))
            }
            '\0' => {
                self.parse_error(ErrorCode::UnexpectedNullCharacter);
                self.long_buf.push('\u{FFFD}');
                Ok(Step::Consume)
            }
            c => {
                self.long_buf.push(c);
                Ok(Step::Consume)
            }
        }
    }

    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    ///
    /// "If the next few characters are: Two U+002D HYPHEN-MINUS characters
    /// (-) ... ASCII case-insensitive match for the word "DOCTYPE" ... The
    /// string "[CDATA[" ..."
    ///
    /// Only the first character is looked at here; the rest of each keyword is
    /// matched by the states that follow.
    pub(super) fn markup_declaration_open_state(&mut self, c: char) -> StepResult {
        match c {
            '-' => Ok(self.switch_to(TokenizerState::MarkupDeclarationHyphen)),
            'd' | 'D' => {
                self.temp_buf.clear();
                self.temp_buf.push(c);
                self.keyword_index = 1;
                Ok(self.switch_to(TokenizerState::MarkupDeclarationOctype))
            }
            '[' => {
                self.keyword_index = 1;
                Ok(self.switch_to(TokenizerState::CDATAStart))
            }
            // "Otherwise, this is an incorrectly-opened-comment parse error.
            // Create a comment token whose data is the empty string. Switch to
            // the bogus comment state (don't consume anything in the current
            // state)."
            _ => {
                self.parse_error(ErrorCode::IncorrectlyOpenedComment);
                self.long_buf.clear();
                Ok(self.reconsume_in(TokenizerState::BogusComment))
            }
        }
    }

    /// Second `-` of `<!--`.
    pub(super) fn markup_declaration_hyphen_state(&mut self, c: char) -> StepResult {
        self.long_buf.clear();
        if c == '-' {
            // "Create a comment token whose data is the empty string, and
            // switch to the comment start state."
            return Ok(self.switch_to(TokenizerState::CommentStart));
        }
        self.parse_error(ErrorCode::IncorrectlyOpenedComment);
        self.long_buf.push('-');
        Ok(self.reconsume_in(TokenizerState::BogusComment))
    }

    /// `OCTYPE` of `<!DOCTYPE`, case-insensitively.
    pub(super) fn markup_declaration_octype_state(&mut self, c: char) -> StepResult {
        let expected = DOCTYPE_KEYWORD.as_bytes().get(self.keyword_index).copied();
        if expected.is_some_and(|b| c.eq_ignore_ascii_case(&char::from(b))) {
            self.temp_buf.push(c);
            self.keyword_index += 1;
            if self.keyword_index == DOCTYPE_KEYWORD.len() {
                self.doctype = Doctype::default();
                return Ok(self.switch_to(TokenizerState::DOCTYPE));
            }
            return Ok(Step::Consume);
        }
        self.parse_error(ErrorCode::IncorrectlyOpenedComment);
        self.long_buf.clone_from(&self.temp_buf);
        Ok(self.reconsume_in(TokenizerState::BogusComment))
    }

    /// `CDATA[` of `<![CDATA[`, case-sensitively.
    pub(super) fn cdata_start_state(&mut self, c: char) -> StepResult {
        let expected = CDATA_KEYWORD.as_bytes().get(self.keyword_index).copied();
        if expected.is_some_and(|b| c == char::from(b)) {
            self.keyword_index += 1;
            if self.keyword_index < CDATA_KEYWORD.len() {
                return Ok(Step::Consume);
            }
            // "If there is an adjusted current node and it is not an element in
            // the HTML namespace, then switch to the CDATA section state.
            // Otherwise, this is a cdata-in-html-content parse error. Create a
            // comment token whose data is the "[CDATA[" string. Switch to the
            // bogus comment state."
            if self.handler.cdata_section_allowed() {
                return Ok(self.switch_to(TokenizerState::CDATASection));
            }
            self.parse_error(ErrorCode::CdataInHtmlContent);
            self.long_buf.clear();
            self.long_buf.push_str(CDATA_KEYWORD);
            return Ok(self.switch_to(TokenizerState::BogusComment));
        }
        self.parse_error(ErrorCode::IncorrectlyOpenedComment);
        self.long_buf.clear();
        self.long_buf
            .push_str(CDATA_KEYWORD.get(..self.keyword_index).unwrap_or_default());
        Ok(self.reconsume_in(TokenizerState::BogusComment))
    }

    /// [§ 13.2.5.43 Comment start state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-state)
    pub(super) fn comment_start_state(&mut self, c: char) -> StepResult {
        match c {
            '-' => Ok(self.switch_to(TokenizerState::CommentStartDash)),
            // "This is an abrupt-closing-of-empty-comment parse error. Switch to
            // the data state. Emit the current comment token."
            '>' => {
                self.parse_error(ErrorCode::AbruptClosingOfEmptyComment);
                self.emit_comment()?;
                Ok(self.switch_to(TokenizerState::Data))
            }
            _ => Ok(self.reconsume_in(TokenizerState::Comment)),
        }
    }

    /// [§ 13.2.5.44 Comment start dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-dash-state)
    pub(super) fn comment_start_dash_state(&mut self, c: char) -> StepResult {
        match c {
            '-' => Ok(self.switch_to(TokenizerState::CommentEnd)),
            '>' => {
                self.parse_error(ErrorCode::AbruptClosingOfEmptyComment);
                self.emit_comment()?;
                Ok(self.switch_to(TokenizerState::Data))
            }
            _ => {
                self.long_buf.push('-');
                Ok(self.reconsume_in(TokenizerState::Comment))
            }
        }
    }

    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    pub(super) fn comment_state(&mut self, c: char) -> StepResult {
        match c {
            '<' => {
                self.long_buf.push(c);
                Ok(self.switch_to(TokenizerState::CommentLessThanSign))
            }
            '-' => Ok(self.switch_to(TokenizerState::CommentEndDash)),
            '\0' => {
                self.parse_error(ErrorCode::UnexpectedNullCharacter);
                self.long_buf.push('\u{FFFD}');
                Ok(Step::Consume)
            }
            c => {
                self.long_buf.push(c);
                Ok(Step::Consume)
            }
        }
    }

    /// [§ 13.2.5.46 Comment less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-state)
    pub(super) fn comment_less_than_sign_state(&mut self, c: char) -> StepResult {
        match c {
            '!' => {
                self.long_buf.push(c);
                Ok(self.switch_to(TokenizerState::CommentLessThanSignBang))
            }
            '<' => {
                self.long_buf.push(c);
                Ok(Step::Consume)
            }
            _ => Ok(self.reconsume_in(TokenizerState::Comment)),
        }
    }

    /// [§ 13.2.5.47 Comment less-than sign bang state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-state)
    pub(super) fn comment_less_than_sign_bang_state(&mut self, c: char) -> StepResult {
        if c == '-' {
            return Ok(self.switch_to(TokenizerState::CommentLessThanSignBangDash));
        }
        Ok(self.reconsume_in(TokenizerState::Comment))
    }

    /// [§ 13.2.5.48 Comment less-than sign bang dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-dash-state)
    pub(super) fn comment_less_than_sign_bang_dash_state(&mut self, c: char) -> StepResult {
        if c == '-' {
            return Ok(self.switch_to(TokenizerState::CommentLessThanSignBangDashDash));
        }
        Ok(self.reconsume_in(TokenizerState::CommentEndDash))
    }

    /// [§ 13.2.5.49 Comment less-than sign bang dash dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-dash-dash-state)
    pub(super) fn comment_less_than_sign_bang_dash_dash_state(&mut self, c: char) -> StepResult {
        if c != '>' {
            self.parse_error(ErrorCode::NestedComment);
        }
        Ok(self.reconsume_in(TokenizerState::CommentEnd))
    }

    /// [§ 13.2.5.50 Comment end dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-dash-state)
    pub(super) fn comment_end_dash_state(&mut self, c: char) -> StepResult {
        if c == '-' {
            return Ok(self.switch_to(TokenizerState::CommentEnd));
        }
        self.long_buf.push('-');
        Ok(self.reconsume_in(TokenizerState::Comment))
    }

    /// [§ 13.2.5.51 Comment end state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-state)
    pub(super) fn comment_end_state(&mut self, c: char) -> StepResult {
        match c {
            '>' => {
                self.emit_comment()?;
                Ok(self.switch_to(TokenizerState::Data))
            }
            '!' => Ok(self.switch_to(TokenizerState::CommentEndBang)),
            '-' => {
                self.long_buf.push('-');
                Ok(Step::Consume)
            }
            // "Append two U+002D HYPHEN-MINUS characters (-) to the comment
            // token's data. Reconsume in the comment state."
            _ => {
                self.long_buf.push_str("--");
                Ok(self.reconsume_in(TokenizerState::Comment))
            }
        }
    }

    /// [§ 13.2.5.52 Comment end bang state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-bang-state)
    pub(super) fn comment_end_bang_state(&mut self, c: char) -> StepResult {
        match c {
            '-' => {
                self.long_buf.push_str("--!");
                Ok(self.switch_to(TokenizerState::CommentEndDash))
            }
            '>' => {
                self.parse_error(ErrorCode::IncorrectlyClosedComment);
                self.emit_comment()?;
                Ok(self.switch_to(TokenizerState::Data))
            }
            _ => {
                self.long_buf.push_str("--!");
                Ok(self.reconsume_in(TokenizerState::Comment))
            }
        }
    }
}

// =============================================================================
// DOCTYPE States
// =============================================================================

impl<H: TokenHandler> Tokenizer<H> {
    /// "Set the current DOCTYPE token's force-quirks flag to on. Reconsume in
    /// the bogus DOCTYPE state."
    fn bogus_doctype_after(&mut self, code: ErrorCode) -> Step {
        self.parse_error(code);
        self.doctype.force_quirks = true;
        self.reconsume_in(TokenizerState::BogusDOCTYPE)
    }

    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    pub(super) fn doctype_state(&mut self, c: char) -> StepResult {
        match c {
            c if Self::is_whitespace(c) => Ok(self.switch_to(TokenizerState::BeforeDOCTYPEName)),
            '>' => Ok(self.reconsume_in(TokenizerState::BeforeDOCTYPEName)),
            _ => {
                self.parse_error(ErrorCode::MissingWhitespaceBeforeDoctypeName);
                Ok(self.reconsume_in(TokenizerState::BeforeDOCTYPEName))
            }
        }
    }

    /// [§ 13.2.5.54 Before DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-name-state)
    pub(super) fn before_doctype_name_state(&mut self, c: char) -> StepResult {
        match c {
            c if Self::is_whitespace(c) => Ok(Step::Consume),
            // "This is a missing-doctype-name parse error. Create a new DOCTYPE
            // token. Set its force-quirks flag to on. Switch to the data state.
            // Emit the current token."
            '>' => {
                self.parse_error(ErrorCode::MissingDoctypeName);
                self.emit_quirky_doctype();
                Ok(self.switch_to(TokenizerState::Data))
            }
            '\0' => {
                self.parse_error(ErrorCode::UnexpectedNullCharacter);
                self.doctype.name = Some(String::from('\u{FFFD}'));
                Ok(self.switch_to(TokenizerState::DOCTYPEName))
            }
            c => {
                self.doctype.name = Some(String::from(c.to_ascii_lowercase()));
                Ok(self.switch_to(TokenizerState::DOCTYPEName))
            }
        }
    }

    /// [§ 13.2.5.55 DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-name-state)
    pub(super) fn doctype_name_state(&mut self, c: char) -> StepResult {
        let pushed = match c {
            c if Self::is_whitespace(c) => {
                return Ok(self.switch_to(TokenizerState::AfterDOCTYPEName));
            }
            '>' => {
                self.emit_doctype();
                return Ok(self.switch_to(TokenizerState::Data));
            }
            '\0' => {
                self.parse_error(ErrorCode::UnexpectedNullCharacter);
                '\u{FFFD}'
            }
            c => c.to_ascii_lowercase(),
        };
        self.doctype
            .name
            .get_or_insert_with(String::new)
            .push(pushed);
        Ok(Step::Consume)
    }

    /// [§ 13.2.5.56 After DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-name-state)
    pub(super) fn after_doctype_name_state(&mut self, c: char) -> StepResult {
        match c {
            c if Self::is_whitespace(c) => Ok(Step::Consume),
            '>' => {
                self.emit_doctype();
                Ok(self.switch_to(TokenizerState::Data))
            }
            // "If the six characters starting from the current input character
            // are an ASCII case-insensitive match for the word "PUBLIC"..."
            'p' | 'P' => {
                self.keyword_index = 1;
                Ok(self.switch_to(TokenizerState::AfterDOCTYPENamePublic))
            }
            's' | 'S' => {
                self.keyword_index = 1;
                Ok(self.switch_to(TokenizerState::AfterDOCTYPENameSystem))
            }
            _ => Ok(self.bogus_doctype_after(ErrorCode::InvalidCharacterSequenceAfterDoctypeName)),
        }
    }

    /// The rest of `PUBLIC` or `SYSTEM` after a DOCTYPE name.
    pub(super) fn doctype_keyword_state(
        &mut self,
        c: char,
        keyword: &'static str,
        next: TokenizerState,
    ) -> StepResult {
        let expected = keyword.as_bytes().get(self.keyword_index).copied();
        if expected.is_some_and(|b| c.eq_ignore_ascii_case(&char::from(b))) {
            self.keyword_index += 1;
            if self.keyword_index == keyword.len() {
                return Ok(self.switch_to(next));
            }
            return Ok(Step::Consume);
        }
        Ok(self.bogus_doctype_after(ErrorCode::InvalidCharacterSequenceAfterDoctypeName))
    }

    /// [§ 13.2.5.57 After DOCTYPE public keyword state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-keyword-state)
    pub(super) fn after_doctype_public_keyword_state(&mut self, c: char) -> StepResult {
        match c {
            c if Self::is_whitespace(c) => {
                Ok(self.switch_to(TokenizerState::BeforeDOCTYPEPublicIdentifier))
            }
            '"' | '\'' => {
                self.parse_error(ErrorCode::MissingWhitespaceAfterDoctypePublicKeyword);
                Ok(self.open_public_identifier(c))
            }
            '>' => {
                self.parse_error(ErrorCode::MissingDoctypePublicIdentifier);
                self.emit_quirky_doctype();
                Ok(self.switch_to(TokenizerState::Data))
            }
            _ => Ok(self.bogus_doctype_after(ErrorCode::MissingQuoteBeforeDoctypePublicIdentifier)),
        }
    }

    /// [§ 13.2.5.58 Before DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-public-identifier-state)
    pub(super) fn before_doctype_public_identifier_state(&mut self, c: char) -> StepResult {
        match c {
            c if Self::is_whitespace(c) => Ok(Step::Consume),
            '"' | '\'' => Ok(self.open_public_identifier(c)),
            '>' => {
                self.parse_error(ErrorCode::MissingDoctypePublicIdentifier);
                self.emit_quirky_doctype();
                Ok(self.switch_to(TokenizerState::Data))
            }
            _ => Ok(self.bogus_doctype_after(ErrorCode::MissingQuoteBeforeDoctypePublicIdentifier)),
        }
    }

    /// "Set the current DOCTYPE token's public identifier to the empty string
    /// (not missing), then switch to the DOCTYPE public identifier
    /// (double-quoted) state."
    fn open_public_identifier(&mut self, quote: char) -> Step {
        self.doctype.public_id = Some(String::new());
        if quote == '"' {
            self.switch_to(TokenizerState::DOCTYPEPublicIdentifierDoubleQuoted)
        } else {
            self.switch_to(TokenizerState::DOCTYPEPublicIdentifierSingleQuoted)
        }
    }

    /// The system identifier counterpart of
    /// [`open_public_identifier`](Self::open_public_identifier).
    fn open_system_identifier(&mut self, quote: char) -> Step {
        self.doctype.system_id = Some(String::new());
        if quote == '"' {
            self.switch_to(TokenizerState::DOCTYPESystemIdentifierDoubleQuoted)
        } else {
            self.switch_to(TokenizerState::DOCTYPESystemIdentifierSingleQuoted)
        }
    }

    /// [§ 13.2.5.59 DOCTYPE public identifier (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-public-identifier-(double-quoted)-state)
    /// and its single-quoted twin.
    pub(super) fn doctype_public_identifier_state(&mut self, c: char, quote: char) -> StepResult {
        let pushed = match c {
            c if c == quote => {
                return Ok(self.switch_to(TokenizerState::AfterDOCTYPEPublicIdentifier));
            }
            '>' => {
                self.parse_error(ErrorCode::AbruptDoctypePublicIdentifier);
                self.emit_quirky_doctype();
                return Ok(self.switch_to(TokenizerState::Data));
            }
            '\0' => {
                self.parse_error(ErrorCode::UnexpectedNullCharacter);
                '\u{FFFD}'
            }
            c => c,
        };
        self.doctype
            .public_id
            .get_or_insert_with(String::new)
            .push(pushed);
        Ok(Step::Consume)
    }

    /// [§ 13.2.5.61 After DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-identifier-state)
    pub(super) fn after_doctype_public_identifier_state(&mut self, c: char) -> StepResult {
        match c {
            c if Self::is_whitespace(c) => {
                Ok(self.switch_to(TokenizerState::BetweenDOCTYPEPublicAndSystemIdentifiers))
            }
            '>' => {
                self.emit_doctype();
                Ok(self.switch_to(TokenizerState::Data))
            }
            '"' | '\'' => {
                self.parse_error(
                    ErrorCode::MissingWhitespaceBetweenDoctypePublicAndSystemIdentifiers,
                );
                Ok(self.open_system_identifier(c))
            }
            _ => Ok(self.bogus_doctype_after(ErrorCode::MissingQuoteBeforeDoctypeSystemIdentifier)),
        }
    }

    /// [§ 13.2.5.62 Between DOCTYPE public and system identifiers state](https://html.spec.whatwg.org/multipage/parsing.html#between-doctype-public-and-system-identifiers-state)
    pub(super) fn between_doctype_public_and_system_identifiers_state(
        &mut self,
        c: char,
    ) -> StepResult {
        match c {
            c if Self::is_whitespace(c) => Ok(Step::Consume),
            '>' => {
                self.emit_doctype();
                Ok(self.switch_to(TokenizerState::Data))
            }
            '"' | '\'' => Ok(self.open_system_identifier(c)),
            _ => Ok(self.bogus_doctype_after(ErrorCode::MissingQuoteBeforeDoctypeSystemIdentifier)),
        }
    }

    /// [§ 13.2.5.63 After DOCTYPE system keyword state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-keyword-state)
    pub(super) fn after_doctype_system_keyword_state(&mut self, c: char) -> StepResult {
        match c {
            c if Self::is_whitespace(c) => {
                Ok(self.switch_to(TokenizerState::BeforeDOCTYPESystemIdentifier))
            }
            '"' | '\'' => {
                self.parse_error(ErrorCode::MissingWhitespaceAfterDoctypeSystemKeyword);
                Ok(self.open_system_identifier(c))
            }
            '>' => {
                self.parse_error(ErrorCode::MissingDoctypeSystemIdentifier);
                self.emit_quirky_doctype();
                Ok(self.switch_to(TokenizerState::Data))
            }
            _ => Ok(self.bogus_doctype_after(ErrorCode::MissingQuoteBeforeDoctypeSystemIdentifier)),
        }
    }

    /// [§ 13.2.5.64 Before DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-system-identifier-state)
    pub(super) fn before_doctype_system_identifier_state(&mut self, c: char) -> StepResult {
        match c {
            c if Self::is_whitespace(c) => Ok(Step::Consume),
            '"' | '\'' => Ok(self.open_system_identifier(c)),
            '>' => {
                self.parse_error(ErrorCode::MissingDoctypeSystemIdentifier);
                self.emit_quirky_doctype();
                Ok(self.switch_to(TokenizerState::Data))
            }
            _ => Ok(self.bogus_doctype_after(ErrorCode::MissingQuoteBeforeDoctypeSystemIdentifier)),
        }
    }

    /// [§ 13.2.5.65 DOCTYPE system identifier (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-system-identifier-(double-quoted)-state)
    /// and its single-quoted twin.
    pub(super) fn doctype_system_identifier_state(&mut self, c: char, quote: char) -> StepResult {
        let pushed = match c {
            c if c == quote => {
                return Ok(self.switch_to(TokenizerState::AfterDOCTYPESystemIdentifier));
            }
            '>' => {
                self.parse_error(ErrorCode::AbruptDoctypeSystemIdentifier);
                self.emit_quirky_doctype();
                return Ok(self.switch_to(TokenizerState::Data));
            }
            '\0' => {
                self.parse_error(ErrorCode::UnexpectedNullCharacter);
                '\u{FFFD}'
            }
            c => c,
        };
        self.doctype
            .system_id
            .get_or_insert_with(String::new)
            .push(pushed);
        Ok(Step::Consume)
    }

    /// [§ 13.2.5.67 After DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-identifier-state)
    pub(super) fn after_doctype_system_identifier_state(&mut self, c: char) -> StepResult {
        match c {
            c if Self::is_whitespace(c) => Ok(Step::Consume),
            '>' => {
                self.emit_doctype();
                Ok(self.switch_to(TokenizerState::Data))
            }
            // "This is an unexpected-character-after-doctype-system-identifier
            // parse error. Reconsume in the bogus DOCTYPE state. (This does not
            // set the current DOCTYPE token's force-quirks flag to on.)"
            _ => {
                self.parse_error(ErrorCode::UnexpectedCharacterAfterDoctypeSystemIdentifier);
                Ok(self.reconsume_in(TokenizerState::BogusDOCTYPE))
            }
        }
    }

    /// [§ 13.2.5.68 Bogus DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-doctype-state)
    pub(super) fn bogus_doctype_state(&mut self, c: char) -> StepResult {
        match c {
            '>' => {
                self.emit_doctype();
                Ok(self.switch_to(TokenizerState::Data))
            }
            '\0' => {
                self.parse_error(ErrorCode::UnexpectedNullCharacter);
                Ok(Step::Consume)
            }
            _ => Ok(Step::Consume),
        }
    }
}

// =============================================================================
// CDATA States
// =============================================================================

impl<H: TokenHandler> Tokenizer<H> {
    /// [§ 13.2.5.69 CDATA section state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-state)
    ///
    /// "U+0000 NULL characters are handled in the tree construction stage, as
    /// part of the in foreign content insertion mode"
    pub(super) fn cdata_section_state(&mut self, text: &str, pos: usize, c: char) -> StepResult {
        if c == ']' {
            self.flush_chars_until(text, pos)?;
            return Ok(self.switch_to(TokenizerState::CDATASectionBracket));
        }
        self.text_char(pos);
        Ok(Step::Consume)
    }

    /// [§ 13.2.5.70 CDATA section bracket state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-bracket-state)
    pub(super) fn cdata_section_bracket_state(&mut self, c: char) -> StepResult {
        if c == ']' {
            return Ok(self.switch_to(TokenizerState::CDATASectionEnd));
        }
        self.emit_text("]")?;
        Ok(self.reconsume_in(TokenizerState::CDATASection))
    }

    /// [§ 13.2.5.71 CDATA section end state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-end-state)
    pub(super) fn cdata_section_end_state(&mut self, c: char) -> StepResult {
        match c {
            ']' => {
                self.emit_text("]")?;
                Ok(Step::Consume)
            }
            '>' => Ok(self.switch_to(TokenizerState::Data)),
            _ => {
                self.emit_text("]]")?;
                Ok(self.reconsume_in(TokenizerState::CDATASection))
            }
        }
    }
}

// =============================================================================
// End of File
// =============================================================================

impl<H: TokenHandler> Tokenizer<H> {
    /// The "EOF" entry of the current state. Either delivers the end-of-file
    /// token or moves to a state that will.
    pub(super) fn eof_step(&mut self) -> Result<(), ParseError> {
        use TokenizerState as S;
        match self.state {
            S::Data | S::RCDATA | S::RAWTEXT | S::ScriptData | S::PLAINTEXT => self.emit_eof(),

            // "This is an eof-before-tag-name parse error. Emit a U+003C
            // LESS-THAN SIGN character token and an end-of-file token."
            S::TagOpen => {
                self.parse_error(ErrorCode::EofBeforeTagName);
                self.emit_text("<")?;
                self.emit_eof();
            }
            S::EndTagOpen => {
                self.parse_error(ErrorCode::EofBeforeTagName);
                self.emit_text("</")?;
                self.emit_eof();
            }
            S::TagName
            | S::BeforeAttributeName
            | S::AttributeName
            | S::AfterAttributeName
            | S::BeforeAttributeValue
            | S::AttributeValueDoubleQuoted
            | S::AttributeValueSingleQuoted
            | S::AttributeValueUnquoted
            | S::AfterAttributeValueQuoted
            | S::SelfClosingStartTag => {
                self.parse_error(ErrorCode::EofInTag);
                self.emit_eof();
            }

            S::RCDATALessThanSign => self.eof_emit_and_return("<", S::RCDATA)?,
            S::RAWTEXTLessThanSign => self.eof_emit_and_return("<", S::RAWTEXT)?,
            S::ScriptDataLessThanSign => self.eof_emit_and_return("<", S::ScriptData)?,
            S::ScriptDataEscapedLessThanSign => {
                self.eof_emit_and_return("<", S::ScriptDataEscaped)?;
            }
            S::RCDATAEndTagOpen => self.eof_emit_and_return("</", S::RCDATA)?,
            S::RAWTEXTEndTagOpen => self.eof_emit_and_return("</", S::RAWTEXT)?,
            S::ScriptDataEndTagOpen => self.eof_emit_and_return("</", S::ScriptData)?,
            S::ScriptDataEscapedEndTagOpen => {
                self.eof_emit_and_return("</", S::ScriptDataEscaped)?;
            }
            S::RCDATAEndTagName => self.abandon_end_tag_name(S::RCDATA)?,
            S::RAWTEXTEndTagName => self.abandon_end_tag_name(S::RAWTEXT)?,
            S::ScriptDataEndTagName => self.abandon_end_tag_name(S::ScriptData)?,
            S::ScriptDataEscapedEndTagName => self.abandon_end_tag_name(S::ScriptDataEscaped)?,
            S::ScriptDataEscapeStart | S::ScriptDataEscapeStartDash => {
                self.state = S::ScriptData;
            }
            S::ScriptDataDoubleEscapeStart => self.state = S::ScriptDataEscaped,
            S::ScriptDataDoubleEscapedLessThanSign | S::ScriptDataDoubleEscapeEnd => {
                self.state = S::ScriptDataDoubleEscaped;
            }
            // "This is an eof-in-script-html-comment-like-text parse error. Emit
            // an end-of-file token."
            S::ScriptDataEscaped
            | S::ScriptDataEscapedDash
            | S::ScriptDataEscapedDashDash
            | S::ScriptDataDoubleEscaped
            | S::ScriptDataDoubleEscapedDash
            | S::ScriptDataDoubleEscapedDashDash => {
                self.parse_error(ErrorCode::EofInScriptHtmlCommentLikeText);
                self.emit_eof();
            }

            // "Emit the comment. Emit an end-of-file token."
            S::BogusComment => {
                self.emit_comment()?;
                self.emit_eof();
            }
            S::MarkupDeclarationOpen => {
                self.parse_error(ErrorCode::IncorrectlyOpenedComment);
                self.long_buf.clear();
                self.state = S::BogusComment;
            }
            S::MarkupDeclarationHyphen => {
                self.parse_error(ErrorCode::IncorrectlyOpenedComment);
                self.long_buf.clear();
                self.long_buf.push('-');
                self.state = S::BogusComment;
            }
            S::MarkupDeclarationOctype => {
                self.parse_error(ErrorCode::IncorrectlyOpenedComment);
                self.long_buf.clone_from(&self.temp_buf);
                self.state = S::BogusComment;
            }
            S::CDATAStart => {
                self.parse_error(ErrorCode::IncorrectlyOpenedComment);
                self.long_buf.clear();
                self.long_buf
                    .push_str(CDATA_KEYWORD.get(..self.keyword_index).unwrap_or_default());
                self.state = S::BogusComment;
            }
            // "This is an eof-in-comment parse error. Emit the current comment
            // token. Emit an end-of-file token."
            S::CommentStart
            | S::CommentStartDash
            | S::Comment
            | S::CommentLessThanSign
            | S::CommentLessThanSignBang
            | S::CommentLessThanSignBangDash
            | S::CommentLessThanSignBangDashDash
            | S::CommentEndDash
            | S::CommentEnd
            | S::CommentEndBang => {
                self.parse_error(ErrorCode::EofInComment);
                self.emit_comment()?;
                self.emit_eof();
            }

            // "This is an eof-in-doctype parse error. Set the current DOCTYPE
            // token's force-quirks flag to on. Emit the current DOCTYPE token.
            // Emit an end-of-file token."
            S::DOCTYPE
            | S::BeforeDOCTYPEName
            | S::DOCTYPEName
            | S::AfterDOCTYPEName
            | S::AfterDOCTYPEPublicKeyword
            | S::BeforeDOCTYPEPublicIdentifier
            | S::DOCTYPEPublicIdentifierDoubleQuoted
            | S::DOCTYPEPublicIdentifierSingleQuoted
            | S::AfterDOCTYPEPublicIdentifier
            | S::BetweenDOCTYPEPublicAndSystemIdentifiers
            | S::AfterDOCTYPESystemKeyword
            | S::BeforeDOCTYPESystemIdentifier
            | S::DOCTYPESystemIdentifierDoubleQuoted
            | S::DOCTYPESystemIdentifierSingleQuoted
            | S::AfterDOCTYPESystemIdentifier => {
                self.parse_error(ErrorCode::EofInDoctype);
                self.emit_quirky_doctype();
                self.emit_eof();
            }
            S::AfterDOCTYPENamePublic | S::AfterDOCTYPENameSystem => {
                let _ =
                    self.bogus_doctype_after(ErrorCode::InvalidCharacterSequenceAfterDoctypeName);
            }
            S::BogusDOCTYPE => {
                self.emit_doctype();
                self.emit_eof();
            }

            S::CDATASection => {
                self.parse_error(ErrorCode::EofInCdata);
                self.emit_eof();
            }
            S::CDATASectionBracket => self.eof_emit_and_return("]", S::CDATASection)?,
            S::CDATASectionEnd => self.eof_emit_and_return("]]", S::CDATASection)?,

            S::CharacterReference => {
                self.flush_code_points_consumed_as_character_reference()?;
                self.state = self.return_state;
            }
            S::AmbiguousAmpersand => self.state = self.return_state,
            S::NamedCharacterReference => {
                let _ = self.named_character_reference_state(None)?;
            }
            S::NumericCharacterReference
            | S::HexadecimalCharacterReferenceStart
            | S::DecimalCharacterReferenceStart => {
                self.parse_error(ErrorCode::AbsenceOfDigitsInNumericCharacterReference);
                self.flush_code_points_consumed_as_character_reference()?;
                self.state = self.return_state;
            }
            S::HexadecimalCharacterReference | S::DecimalCharacterReference => {
                self.parse_error(ErrorCode::MissingSemicolonAfterCharacterReference);
                self.state = S::NumericCharacterReferenceEnd;
            }
            S::NumericCharacterReferenceEnd => {
                let _ = self.numeric_character_reference_end_state()?;
            }
        }
        Ok(())
    }

    fn eof_emit_and_return(&mut self, text: &str, state: TokenizerState) -> Result<(), ParseError> {
        self.emit_text(text)?;
        self.state = state;
        Ok(())
    }
}
