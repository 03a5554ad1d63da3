//! RCDATA, RAWTEXT and script data states.
//!
//! [§ 13.2.5.2 RCDATA state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-state)
//! through [§ 13.2.5.31 Script data double escape end state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escape-end-state)
//!
//! The three "less-than sign / end tag open / end tag name" families differ
//! only in the text state they fall back to, so each family shares one
//! handler parameterized by that state.

use crate::error::ParseError;

use super::machine::{Step, StepResult, TagKind, Tokenizer};
use super::state::TokenizerState;
use super::token::TokenHandler;

impl<H: TokenHandler> Tokenizer<H> {
    /// [§ 13.2.5.2 RCDATA state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-state)
    pub(super) fn rcdata_state(&mut self, text: &str, pos: usize, c: char) -> StepResult {
        match c {
            '&' => {
                self.flush_chars_until(text, pos)?;
                Ok(self.begin_character_reference(TokenizerState::RCDATA))
            }
            '<' => {
                self.flush_chars_until(text, pos)?;
                Ok(self.switch_to(TokenizerState::RCDATALessThanSign))
            }
            '\0' => {
                self.emit_replacement_character(text, pos)?;
                Ok(Step::Consume)
            }
            _ => {
                self.text_char(pos);
                Ok(Step::Consume)
            }
        }
    }

    /// [§ 13.2.5.3 RAWTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state)
    pub(super) fn rawtext_state(&mut self, text: &str, pos: usize, c: char) -> StepResult {
        self.raw_text_char(text, pos, c, TokenizerState::RAWTEXTLessThanSign)
    }

    /// [§ 13.2.5.4 Script data state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-state)
    pub(super) fn script_data_state(&mut self, text: &str, pos: usize, c: char) -> StepResult {
        self.raw_text_char(text, pos, c, TokenizerState::ScriptDataLessThanSign)
    }

    fn raw_text_char(
        &mut self,
        text: &str,
        pos: usize,
        c: char,
        less_than_sign: TokenizerState,
    ) -> StepResult {
        match c {
            '<' => {
                self.flush_chars_until(text, pos)?;
                Ok(self.switch_to(less_than_sign))
            }
            '\0' => {
                self.emit_replacement_character(text, pos)?;
                Ok(Step::Consume)
            }
            _ => {
                self.text_char(pos);
                Ok(Step::Consume)
            }
        }
    }

    /// [§ 13.2.5.9 RCDATA less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-less-than-sign-state)
    /// and its RAWTEXT twin.
    pub(super) fn raw_less_than_sign_state(
        &mut self,
        c: char,
        text_state: TokenizerState,
        end_tag_open: TokenizerState,
    ) -> StepResult {
        // "U+002F SOLIDUS (/): Set the temporary buffer to the empty string.
        // Switch to the RCDATA end tag open state."
        if c == '/' {
            self.temp_buf.clear();
            return Ok(self.switch_to(end_tag_open));
        }
        self.emit_text("<")?;
        Ok(self.reconsume_in(text_state))
    }

    /// [§ 13.2.5.10 RCDATA end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-open-state)
    /// and its RAWTEXT, script data and escaped script data twins.
    pub(super) fn raw_end_tag_open_state(
        &mut self,
        c: char,
        text_state: TokenizerState,
        name_state: TokenizerState,
    ) -> StepResult {
        if c.is_ascii_alphabetic() {
            self.create_tag(TagKind::End);
            return Ok(self.reconsume_in(name_state));
        }
        self.emit_text("</")?;
        Ok(self.reconsume_in(text_state))
    }

    /// [§ 13.2.5.11 RCDATA end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-name-state)
    /// and its RAWTEXT, script data and escaped script data twins.
    pub(super) fn raw_end_tag_name_state(&mut self, c: char, text_state: TokenizerState) -> StepResult {
        match c {
            // "If the current end tag token is an appropriate end tag token, then
            // switch to the before attribute name state. Otherwise, treat it as
            // per the "anything else" entry below."
            c if Self::is_whitespace(c) && self.is_appropriate_end_tag() => {
                self.finish_tag_name();
                Ok(self.switch_to(TokenizerState::BeforeAttributeName))
            }
            '/' if self.is_appropriate_end_tag() => {
                self.finish_tag_name();
                Ok(self.switch_to(TokenizerState::SelfClosingStartTag))
            }
            '>' if self.is_appropriate_end_tag() => {
                self.finish_tag_name();
                self.emit_tag()
            }
            c if c.is_ascii_alphabetic() => {
                self.name_buf.push(c.to_ascii_lowercase());
                self.temp_buf.push(c);
                Ok(Step::Consume)
            }
            // "Emit a U+003C LESS-THAN SIGN character token, a U+002F SOLIDUS
            // character token, and a character token for each of the characters
            // in the temporary buffer (in the order they were added to the
            // buffer). Reconsume in the RCDATA state."
            _ => {
                self.abandon_end_tag_name(text_state)?;
                Ok(Step::Reconsume)
            }
        }
    }

    /// Give back `</` and the partial end tag name as text.
    pub(super) fn abandon_end_tag_name(
        &mut self,
        text_state: TokenizerState,
    ) -> Result<(), ParseError> {
        self.emit_text("</")?;
        let pending = std::mem::take(&mut self.temp_buf);
        if !pending.is_empty() {
            self.emit_text(&pending)?;
        }
        self.temp_buf = pending;
        self.state = text_state;
        Ok(())
    }
}

// =============================================================================
// Script Data Escapes
// =============================================================================

impl<H: TokenHandler> Tokenizer<H> {
    /// [§ 13.2.5.15 Script data less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-less-than-sign-state)
    pub(super) fn script_data_less_than_sign_state(&mut self, pos: usize, c: char) -> StepResult {
        match c {
            '/' => {
                self.temp_buf.clear();
                Ok(self.switch_to(TokenizerState::ScriptDataEndTagOpen))
            }
            // "Switch to the script data escape start state. Emit a U+003C
            // LESS-THAN SIGN character token and a U+0021 EXCLAMATION MARK
            // character token."
            '!' => {
                self.emit_text("<")?;
                self.text_char(pos);
                Ok(self.switch_to(TokenizerState::ScriptDataEscapeStart))
            }
            _ => {
                self.emit_text("<")?;
                Ok(self.reconsume_in(TokenizerState::ScriptData))
            }
        }
    }

    /// [§ 13.2.5.18 Script data escape start state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escape-start-state)
    pub(super) fn script_data_escape_start_state(&mut self, pos: usize, c: char) -> StepResult {
        if c == '-' {
            self.text_char(pos);
            return Ok(self.switch_to(TokenizerState::ScriptDataEscapeStartDash));
        }
        Ok(self.reconsume_in(TokenizerState::ScriptData))
    }

    /// [§ 13.2.5.19 Script data escape start dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escape-start-dash-state)
    pub(super) fn script_data_escape_start_dash_state(&mut self, pos: usize, c: char) -> StepResult {
        if c == '-' {
            self.text_char(pos);
            return Ok(self.switch_to(TokenizerState::ScriptDataEscapedDashDash));
        }
        Ok(self.reconsume_in(TokenizerState::ScriptData))
    }

    /// [§ 13.2.5.20 Script data escaped state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-state)
    pub(super) fn script_data_escaped_state(&mut self, text: &str, pos: usize, c: char) -> StepResult {
        match c {
            '-' => {
                self.text_char(pos);
                Ok(self.switch_to(TokenizerState::ScriptDataEscapedDash))
            }
            '<' => {
                self.flush_chars_until(text, pos)?;
                Ok(self.switch_to(TokenizerState::ScriptDataEscapedLessThanSign))
            }
            '\0' => {
                self.emit_replacement_character(text, pos)?;
                Ok(Step::Consume)
            }
            _ => {
                self.text_char(pos);
                Ok(Step::Consume)
            }
        }
    }

    /// [§ 13.2.5.21 Script data escaped dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-dash-state)
    pub(super) fn script_data_escaped_dash_state(
        &mut self,
        text: &str,
        pos: usize,
        c: char,
    ) -> StepResult {
        match c {
            '-' => {
                self.text_char(pos);
                Ok(self.switch_to(TokenizerState::ScriptDataEscapedDashDash))
            }
            '<' => {
                self.flush_chars_until(text, pos)?;
                Ok(self.switch_to(TokenizerState::ScriptDataEscapedLessThanSign))
            }
            '\0' => {
                self.emit_replacement_character(text, pos)?;
                Ok(self.switch_to(TokenizerState::ScriptDataEscaped))
            }
            _ => {
                self.text_char(pos);
                Ok(self.switch_to(TokenizerState::ScriptDataEscaped))
            }
        }
    }

    /// [§ 13.2.5.22 Script data escaped dash dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-dash-dash-state)
    pub(super) fn script_data_escaped_dash_dash_state(
        &mut self,
        text: &str,
        pos: usize,
        c: char,
    ) -> StepResult {
        match c {
            '-' => {
                self.text_char(pos);
                Ok(Step::Consume)
            }
            '<' => {
                self.flush_chars_until(text, pos)?;
                Ok(self.switch_to(TokenizerState::ScriptDataEscapedLessThanSign))
            }
            // "Switch to the script data state. Emit a U+003E GREATER-THAN SIGN
            // character token."
            '>' => {
                self.text_char(pos);
                Ok(self.switch_to(TokenizerState::ScriptData))
            }
            '\0' => {
                self.emit_replacement_character(text, pos)?;
                Ok(self.switch_to(TokenizerState::ScriptDataEscaped))
            }
            _ => {
                self.text_char(pos);
                Ok(self.switch_to(TokenizerState::ScriptDataEscaped))
            }
        }
    }

    /// [§ 13.2.5.23 Script data escaped less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-less-than-sign-state)
    pub(super) fn script_data_escaped_less_than_sign_state(&mut self, c: char) -> StepResult {
        match c {
            '/' => {
                self.temp_buf.clear();
                Ok(self.switch_to(TokenizerState::ScriptDataEscapedEndTagOpen))
            }
            // "Set the temporary buffer to the empty string. Emit a U+003C
            // LESS-THAN SIGN character token. Reconsume in the script data
            // double escape start state."
            c if c.is_ascii_alphabetic() => {
                self.temp_buf.clear();
                self.emit_text("<")?;
                Ok(self.reconsume_in(TokenizerState::ScriptDataDoubleEscapeStart))
            }
            _ => {
                self.emit_text("<")?;
                Ok(self.reconsume_in(TokenizerState::ScriptDataEscaped))
            }
        }
    }

    /// [§ 13.2.5.26 Script data double escape start state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escape-start-state)
    pub(super) fn script_data_double_escape_start_state(&mut self, pos: usize, c: char) -> StepResult {
        self.double_escape_boundary(
            pos,
            c,
            TokenizerState::ScriptDataDoubleEscaped,
            TokenizerState::ScriptDataEscaped,
        )
    }

    /// [§ 13.2.5.31 Script data double escape end state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escape-end-state)
    pub(super) fn script_data_double_escape_end_state(&mut self, pos: usize, c: char) -> StepResult {
        self.double_escape_boundary(
            pos,
            c,
            TokenizerState::ScriptDataEscaped,
            TokenizerState::ScriptDataDoubleEscaped,
        )
    }

    /// "If the temporary buffer is the string "script", then switch to the
    /// script data double escaped state. Otherwise, switch to the script data
    /// escaped state. Emit the current input character as a character token."
    fn double_escape_boundary(
        &mut self,
        pos: usize,
        c: char,
        on_script: TokenizerState,
        otherwise: TokenizerState,
    ) -> StepResult {
        match c {
            c if Self::is_whitespace(c) || c == '/' || c == '>' => {
                self.text_char(pos);
                if self.temp_buf == "script" {
                    Ok(self.switch_to(on_script))
                } else {
                    Ok(self.switch_to(otherwise))
                }
            }
            c if c.is_ascii_alphabetic() => {
                self.temp_buf.push(c.to_ascii_lowercase());
                self.text_char(pos);
                Ok(Step::Consume)
            }
            _ => Ok(self.reconsume_in(otherwise)),
        }
    }

    /// [§ 13.2.5.27 Script data double escaped state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-state)
    pub(super) fn script_data_double_escaped_state(
        &mut self,
        text: &str,
        pos: usize,
        c: char,
    ) -> StepResult {
        match c {
            '-' => {
                self.text_char(pos);
                Ok(self.switch_to(TokenizerState::ScriptDataDoubleEscapedDash))
            }
            '<' => {
                self.text_char(pos);
                Ok(self.switch_to(TokenizerState::ScriptDataDoubleEscapedLessThanSign))
            }
            '\0' => {
                self.emit_replacement_character(text, pos)?;
                Ok(Step::Consume)
            }
            _ => {
                self.text_char(pos);
                Ok(Step::Consume)
            }
        }
    }

    /// [§ 13.2.5.28 Script data double escaped dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-dash-state)
    pub(super) fn script_data_double_escaped_dash_state(
        &mut self,
        text: &str,
        pos: usize,
        c: char,
    ) -> StepResult {
        match c {
            '-' => {
                self.text_char(pos);
                Ok(self.switch_to(TokenizerState::ScriptDataDoubleEscapedDashDash))
            }
            '<' => {
                self.text_char(pos);
                Ok(self.switch_to(TokenizerState::ScriptDataDoubleEscapedLessThanSign))
            }
            '\0' => {
                self.emit_replacement_character(text, pos)?;
                Ok(self.switch_to(TokenizerState::ScriptDataDoubleEscaped))
            }
            _ => {
                self.text_char(pos);
                Ok(self.switch_to(TokenizerState::ScriptDataDoubleEscaped))
            }
        }
    }

    /// [§ 13.2.5.29 Script data double escaped dash dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-dash-dash-state)
    pub(super) fn script_data_double_escaped_dash_dash_state(
        &mut self,
        text: &str,
        pos: usize,
        c: char,
    ) -> StepResult {
        match c {
            '-' => {
                self.text_char(pos);
                Ok(Step::Consume)
            }
            '<' => {
                self.text_char(pos);
                Ok(self.switch_to(TokenizerState::ScriptDataDoubleEscapedLessThanSign))
            }
            '>' => {
                self.text_char(pos);
                Ok(self.switch_to(TokenizerState::ScriptData))
            }
            '\0' => {
                self.emit_replacement_character(text, pos)?;
                Ok(self.switch_to(TokenizerState::ScriptDataDoubleEscaped))
            }
            _ => {
                self.text_char(pos);
                Ok(self.switch_to(TokenizerState::ScriptDataDoubleEscaped))
            }
        }
    }

    /// [§ 13.2.5.30 Script data double escaped less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-less-than-sign-state)
    pub(super) fn script_data_double_escaped_less_than_sign_state(
        &mut self,
        pos: usize,
        c: char,
    ) -> StepResult {
        if c == '/' {
            self.temp_buf.clear();
            self.text_char(pos);
            return Ok(self.switch_to(TokenizerState::ScriptDataDoubleEscapeEnd));
        }
        Ok(self.reconsume_in(TokenizerState::ScriptDataDoubleEscaped))
    }
}
