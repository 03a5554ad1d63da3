//! The tokenizer state machine and its buffer-driven main loop.

use crate::config::{ParserOptions, XmlViolationPolicy};
use crate::error::ParseError;
use crate::names::{AttributeName, ElementName};

use super::state::TokenizerState;
use super::token::{AttributesBuilder, Doctype, Position, TokenHandler};

/// A chunk of input and how far into it the tokenizer has got.
///
/// `start` is advanced by [`Tokenizer::tokenize_buffer`]; after a suspension
/// it points at the first character not yet consumed.
#[derive(Debug, Clone, Copy)]
pub struct InputBuffer<'a> {
    /// The chunk.
    pub text: &'a str,
    /// Byte offset of the next character to consume.
    pub start: usize,
}

impl<'a> InputBuffer<'a> {
    /// A buffer positioned at the start of `text`.
    #[must_use]
    pub const fn new(text: &'a str) -> Self {
        Self { text, start: 0 }
    }

    /// Whether everything has been consumed.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.start >= self.text.len()
    }
}

/// What a call to [`Tokenizer::tokenize_buffer`] ended with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenizeOutcome {
    /// The last character consumed was a CR, so an LF at the start of the
    /// next buffer belongs to the same line break.
    pub last_char_was_cr: bool,
    /// The handler asked to stop; `start` is at the next character.
    pub suspended: bool,
}

/// Start or end tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum TagKind {
    Start,
    End,
}

/// Narrowing state of the named character reference matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(super) struct NamedReference {
    /// Inclusive window of candidate entries.
    pub(super) lo: usize,
    pub(super) hi: usize,
    /// Longest full match so far: entry index and length of the matched text
    /// in the temporary buffer (including the `&`).
    pub(super) matched: Option<(usize, usize)>,
}

/// The outcome of one state step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Step {
    /// The current character was used up.
    Consume,
    /// "Reconsume in the X state": feed the same character again.
    Reconsume,
}

pub(super) type StepResult = Result<Step, ParseError>;

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// "Implementations must act as if they used the following state machine to
/// tokenize HTML."
///
/// The tokenizer consumes input one buffer at a time and keeps every piece of
/// lexical state between calls, so a document can arrive in arbitrary chunks.
/// Tokens go to the owned [`TokenHandler`] as soon as they are complete.
#[allow(clippy::struct_excessive_bools)]
pub struct Tokenizer<H: TokenHandler> {
    pub(super) handler: H,
    pub(super) state: TokenizerState,
    /// [§ 13.2.5.72](https://html.spec.whatwg.org/multipage/parsing.html#return-state)
    pub(super) return_state: TokenizerState,

    /// Start of the pending character run in the current buffer. Characters
    /// are reported as one slice when a transition needs it.
    pub(super) cstart: Option<usize>,
    pub(super) last_cr: bool,

    /// Tag, attribute and DOCTYPE names.
    pub(super) name_buf: String,
    /// Attribute values and comments.
    pub(super) long_buf: String,
    /// [§ 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#temporary-buffer)
    /// "The temporary buffer"
    pub(super) temp_buf: String,

    pub(super) tag_kind: TagKind,
    pub(super) tag_name: Option<ElementName>,
    pub(super) self_closing: bool,
    pub(super) attributes: AttributesBuilder,
    /// Between starting an attribute and adding it to the tag.
    pub(super) attribute_pending: bool,
    /// The pending attribute's name, `None` once it turned out a duplicate.
    pub(super) attribute_name: Option<AttributeName>,
    pub(super) doctype: Doctype,

    /// The element whose end tag leaves RCDATA, RAWTEXT or script data.
    pub(super) end_tag_expectation: Option<ElementName>,

    pub(super) named: NamedReference,
    /// [§ 13.2.5.75](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-code)
    /// "character reference code"
    pub(super) char_ref_code: u32,
    /// How much of a keyword (`DOCTYPE`, `[CDATA[`, `PUBLIC`, `SYSTEM`) has matched.
    pub(super) keyword_index: usize,

    pub(super) position: Position,
    pub(super) suspend_requested: bool,
    pub(super) eof_delivered: bool,

    pub(super) comment_policy: XmlViolationPolicy,
    pub(super) content_space_policy: XmlViolationPolicy,
    pub(super) xmlns_policy: XmlViolationPolicy,
}

impl<H: TokenHandler> Tokenizer<H> {
    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization):
    /// "The initial state is the data state."
    #[must_use]
    pub fn new(handler: H, options: &ParserOptions) -> Self {
        Self {
            handler,
            state: TokenizerState::Data,
            return_state: TokenizerState::Data,
            cstart: None,
            last_cr: false,
            name_buf: String::new(),
            long_buf: String::new(),
            temp_buf: String::new(),
            tag_kind: TagKind::Start,
            tag_name: None,
            self_closing: false,
            attributes: AttributesBuilder::default(),
            attribute_pending: false,
            attribute_name: None,
            doctype: Doctype::default(),
            end_tag_expectation: None,
            named: NamedReference::default(),
            char_ref_code: 0,
            keyword_index: 0,
            position: Position::START,
            suspend_requested: false,
            eof_delivered: false,
            comment_policy: options.comment_policy,
            content_space_policy: options.content_space_policy,
            xmlns_policy: options.xmlns_policy,
        }
    }

    /// Notify the handler that tokenization starts.
    pub fn start(&mut self) {
        self.handler.start_tokenization();
    }

    /// The handler.
    #[must_use]
    pub const fn handler(&self) -> &H {
        &self.handler
    }

    /// The handler, mutably.
    pub const fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Give back the handler.
    #[must_use]
    pub fn into_handler(self) -> H {
        self.handler
    }

    /// The current state.
    #[must_use]
    pub const fn state(&self) -> TokenizerState {
        self.state
    }

    /// Location of the next character.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// [§ 13.2.6.2](https://html.spec.whatwg.org/multipage/parsing.html#parsing-elements-that-contain-only-text)
    ///
    /// Switch content model from outside, e.g. "switch the tokenizer to the
    /// RCDATA state" after a `<title>` start tag. `end_tag` is the element whose
    /// end tag is "an appropriate end tag token".
    pub fn set_state_and_end_tag_expectation(
        &mut self,
        state: TokenizerState,
        end_tag: Option<ElementName>,
    ) {
        log::trace!("tokenizer: switching to {state} expecting {end_tag:?}");
        self.state = state;
        self.end_tag_expectation = end_tag;
    }

    /// Consume `buffer` from `buffer.start` until it is exhausted or the
    /// handler asks to suspend.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::XmlViolation`] when an XML policy is fatal and the
    /// input violates it.
    pub fn tokenize_buffer(
        &mut self,
        buffer: &mut InputBuffer<'_>,
    ) -> Result<TokenizeOutcome, ParseError> {
        let text = buffer.text;
        let mut pos = buffer.start;
        self.cstart = None;
        self.suspend_requested = false;

        while let Some(raw) = text.get(pos..).and_then(|rest| rest.chars().next()) {
            // [§ 13.2.3.5](https://html.spec.whatwg.org/multipage/parsing.html#preprocessing-the-input-stream)
            // "normalize newlines": a CR LF pair's LF was already delivered as
            // the CR's replacement.
            if raw == '\n' && self.last_cr {
                self.last_cr = false;
                if self.cstart == Some(pos) {
                    self.cstart = Some(pos + 1);
                }
                pos += 1;
                continue;
            }
            let c = if raw == '\r' { '\n' } else { raw };

            if self.step(text, pos, c)? == Step::Reconsume {
                continue;
            }

            if raw == '\r' && self.cstart.is_some() {
                // The span cannot carry the CR itself.
                self.flush_chars_until(text, pos)?;
                self.emit_text("\n")?;
                self.cstart = Some(pos + 1);
            }
            self.last_cr = raw == '\r';
            self.position.advance(c);
            pos += raw.len_utf8();

            if self.suspend_requested {
                self.suspend_requested = false;
                buffer.start = pos;
                log::debug!("tokenizer: suspended at byte {pos} ({})", self.position);
                return Ok(TokenizeOutcome {
                    last_char_was_cr: self.last_cr,
                    suspended: true,
                });
            }
        }

        self.flush_chars_until(text, pos)?;
        buffer.start = pos;
        Ok(TokenizeOutcome {
            last_char_was_cr: self.last_cr,
            suspended: false,
        })
    }

    /// [§ 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    ///
    /// Run the end-of-file transitions of the current state and deliver the
    /// end-of-file token. Later calls do nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::XmlViolation`] under a fatal XML policy.
    pub fn eof(&mut self) -> Result<(), ParseError> {
        self.cstart = None;
        while !self.eof_delivered {
            self.eof_step()?;
        }
        Ok(())
    }

    /// Notify the handler that tokenization is over.
    pub fn end(&mut self) {
        self.handler.end_tokenization();
    }

    fn step(&mut self, text: &str, pos: usize, c: char) -> StepResult {
        use TokenizerState as S;
        match self.state {
            S::Data => self.data_state(text, pos, c),
            S::RCDATA => self.rcdata_state(text, pos, c),
            S::RAWTEXT => self.rawtext_state(text, pos, c),
            S::ScriptData => self.script_data_state(text, pos, c),
            S::PLAINTEXT => self.plaintext_state(text, pos, c),
            S::TagOpen => self.tag_open_state(c),
            S::EndTagOpen => self.end_tag_open_state(c),
            S::TagName => self.tag_name_state(c),
            S::RCDATALessThanSign => self.raw_less_than_sign_state(c, S::RCDATA, S::RCDATAEndTagOpen),
            S::RCDATAEndTagOpen => self.raw_end_tag_open_state(c, S::RCDATA, S::RCDATAEndTagName),
            S::RCDATAEndTagName => self.raw_end_tag_name_state(c, S::RCDATA),
            S::RAWTEXTLessThanSign => {
                self.raw_less_than_sign_state(c, S::RAWTEXT, S::RAWTEXTEndTagOpen)
            }
            S::RAWTEXTEndTagOpen => {
                self.raw_end_tag_open_state(c, S::RAWTEXT, S::RAWTEXTEndTagName)
            }
            S::RAWTEXTEndTagName => self.raw_end_tag_name_state(c, S::RAWTEXT),
            S::ScriptDataLessThanSign => self.script_data_less_than_sign_state(pos, c),
            S::ScriptDataEndTagOpen => {
                self.raw_end_tag_open_state(c, S::ScriptData, S::ScriptDataEndTagName)
            }
            S::ScriptDataEndTagName => self.raw_end_tag_name_state(c, S::ScriptData),
            S::ScriptDataEscapeStart => self.script_data_escape_start_state(pos, c),
            S::ScriptDataEscapeStartDash => self.script_data_escape_start_dash_state(pos, c),
            S::ScriptDataEscaped => self.script_data_escaped_state(text, pos, c),
            S::ScriptDataEscapedDash => self.script_data_escaped_dash_state(text, pos, c),
            S::ScriptDataEscapedDashDash => self.script_data_escaped_dash_dash_state(text, pos, c),
            S::ScriptDataEscapedLessThanSign => self.script_data_escaped_less_than_sign_state(c),
            S::ScriptDataEscapedEndTagOpen => self.raw_end_tag_open_state(
                c,
                S::ScriptDataEscaped,
                S::ScriptDataEscapedEndTagName,
            ),
            S::ScriptDataEscapedEndTagName => self.raw_end_tag_name_state(c, S::ScriptDataEscaped),
            S::ScriptDataDoubleEscapeStart => self.script_data_double_escape_start_state(pos, c),
            S::ScriptDataDoubleEscaped => self.script_data_double_escaped_state(text, pos, c),
            S::ScriptDataDoubleEscapedDash => {
                self.script_data_double_escaped_dash_state(text, pos, c)
            }
            S::ScriptDataDoubleEscapedDashDash => {
                self.script_data_double_escaped_dash_dash_state(text, pos, c)
            }
            S::ScriptDataDoubleEscapedLessThanSign => {
                self.script_data_double_escaped_less_than_sign_state(pos, c)
            }
            S::ScriptDataDoubleEscapeEnd => self.script_data_double_escape_end_state(pos, c),
            S::BeforeAttributeName => self.before_attribute_name_state(c),
            S::AttributeName => self.attribute_name_state(c),
            S::AfterAttributeName => self.after_attribute_name_state(c),
            S::BeforeAttributeValue => self.before_attribute_value_state(c),
            S::AttributeValueDoubleQuoted => self.attribute_value_quoted_state(c, '"'),
            S::AttributeValueSingleQuoted => self.attribute_value_quoted_state(c, '\''),
            S::AttributeValueUnquoted => self.attribute_value_unquoted_state(c),
            S::AfterAttributeValueQuoted => self.after_attribute_value_quoted_state(c),
            S::SelfClosingStartTag => self.self_closing_start_tag_state(c),
            S::BogusComment => self.bogus_comment_state(c),
            S::MarkupDeclarationOpen => self.markup_declaration_open_state(c),
            S::MarkupDeclarationHyphen => self.markup_declaration_hyphen_state(c),
            S::MarkupDeclarationOctype => self.markup_declaration_octype_state(c),
            S::CDATAStart => self.cdata_start_state(c),
            S::CommentStart => self.comment_start_state(c),
            S::CommentStartDash => self.comment_start_dash_state(c),
            S::Comment => self.comment_state(c),
            S::CommentLessThanSign => self.comment_less_than_sign_state(c),
            S::CommentLessThanSignBang => self.comment_less_than_sign_bang_state(c),
            S::CommentLessThanSignBangDash => self.comment_less_than_sign_bang_dash_state(c),
            S::CommentLessThanSignBangDashDash => {
                self.comment_less_than_sign_bang_dash_dash_state(c)
            }
            S::CommentEndDash => self.comment_end_dash_state(c),
            S::CommentEnd => self.comment_end_state(c),
            S::CommentEndBang => self.comment_end_bang_state(c),
            S::DOCTYPE => self.doctype_state(c),
            S::BeforeDOCTYPEName => self.before_doctype_name_state(c),
            S::DOCTYPEName => self.doctype_name_state(c),
            S::AfterDOCTYPEName => self.after_doctype_name_state(c),
            S::AfterDOCTYPENamePublic => {
                self.doctype_keyword_state(c, "PUBLIC", S::AfterDOCTYPEPublicKeyword)
            }
            S::AfterDOCTYPENameSystem => {
                self.doctype_keyword_state(c, "SYSTEM", S::AfterDOCTYPESystemKeyword)
            }
            S::AfterDOCTYPEPublicKeyword => self.after_doctype_public_keyword_state(c),
            S::BeforeDOCTYPEPublicIdentifier => self.before_doctype_public_identifier_state(c),
            S::DOCTYPEPublicIdentifierDoubleQuoted => self.doctype_public_identifier_state(c, '"'),
            S::DOCTYPEPublicIdentifierSingleQuoted => {
                self.doctype_public_identifier_state(c, '\'')
            }
            S::AfterDOCTYPEPublicIdentifier => self.after_doctype_public_identifier_state(c),
            S::BetweenDOCTYPEPublicAndSystemIdentifiers => {
                self.between_doctype_public_and_system_identifiers_state(c)
            }
            S::AfterDOCTYPESystemKeyword => self.after_doctype_system_keyword_state(c),
            S::BeforeDOCTYPESystemIdentifier => self.before_doctype_system_identifier_state(c),
            S::DOCTYPESystemIdentifierDoubleQuoted => self.doctype_system_identifier_state(c, '"'),
            S::DOCTYPESystemIdentifierSingleQuoted => {
                self.doctype_system_identifier_state(c, '\'')
            }
            S::AfterDOCTYPESystemIdentifier => self.after_doctype_system_identifier_state(c),
            S::BogusDOCTYPE => self.bogus_doctype_state(c),
            S::CDATASection => self.cdata_section_state(text, pos, c),
            S::CDATASectionBracket => self.cdata_section_bracket_state(c),
            S::CDATASectionEnd => self.cdata_section_end_state(c),
            S::CharacterReference => self.character_reference_state(c),
            S::NamedCharacterReference => self.named_character_reference_state(Some(c)),
            S::AmbiguousAmpersand => self.ambiguous_ampersand_state(pos, c),
            S::NumericCharacterReference => self.numeric_character_reference_state(c),
            S::HexadecimalCharacterReferenceStart => {
                self.hexadecimal_character_reference_start_state(c)
            }
            S::DecimalCharacterReferenceStart => self.decimal_character_reference_start_state(c),
            S::HexadecimalCharacterReference => self.hexadecimal_character_reference_state(c),
            S::DecimalCharacterReference => self.decimal_character_reference_state(c),
            S::NumericCharacterReferenceEnd => self.numeric_character_reference_end_state(),
        }
    }
}
