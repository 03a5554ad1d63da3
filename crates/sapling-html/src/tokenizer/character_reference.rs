//! Character reference states.
//!
//! [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
//! through [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
//!
//! Named references are matched one character at a time against the sorted
//! [`NAMES`] table: the candidates always form one contiguous window, and
//! each character narrows it with two binary searches. A full match is
//! remembered and the longest one wins, so `&notit;` decodes as `¬it;`.

use crate::error::{ErrorCode, ParseError};

use super::machine::{NamedReference, Step, StepResult, Tokenizer};
use super::named_character_references::{FIRST_LETTER_WINDOWS, NAMES, VALUES};
use super::state::TokenizerState;
use super::token::TokenHandler;

impl<H: TokenHandler> Tokenizer<H> {
    /// "Set the return state to the X state. Switch to the character reference
    /// state."
    ///
    /// "Set the temporary buffer to the empty string. Append a U+0026
    /// AMPERSAND (&) character to the temporary buffer."
    pub(super) fn begin_character_reference(&mut self, return_state: TokenizerState) -> Step {
        self.return_state = return_state;
        self.temp_buf.clear();
        self.temp_buf.push('&');
        self.switch_to(TokenizerState::CharacterReference)
    }

    /// "consumed as part of an attribute"
    const fn in_attribute(&self) -> bool {
        self.return_state.is_attribute_value()
    }

    /// [§ 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#flush-code-points-consumed-as-a-character-reference)
    ///
    /// "When a state says to flush code points consumed as a character
    /// reference, it means that for each code point in the temporary buffer (in
    /// the order they were added to the buffer) user agent must append the code
    /// point from the buffer to the current attribute's value if the character
    /// reference was consumed as part of an attribute, or emit the code point as
    /// a character token otherwise."
    pub(super) fn flush_code_points_consumed_as_character_reference(
        &mut self,
    ) -> Result<(), ParseError> {
        if self.in_attribute() {
            self.long_buf.push_str(&self.temp_buf);
            return Ok(());
        }
        let consumed = std::mem::take(&mut self.temp_buf);
        let result = self.emit_text(&consumed);
        self.temp_buf = consumed;
        result
    }

    /// Append decoded text to the attribute value or emit it.
    fn emit_reference_text(&mut self, text: &str) -> Result<(), ParseError> {
        if text.is_empty() {
            return Ok(());
        }
        if self.in_attribute() {
            self.long_buf.push_str(text);
            Ok(())
        } else {
            self.emit_text(text)
        }
    }

    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    pub(super) fn character_reference_state(&mut self, c: char) -> StepResult {
        match c {
            // "ASCII alphanumeric: Reconsume in the named character reference
            // state."
            c if c.is_ascii_alphanumeric() => {
                self.named = NamedReference::default();
                Ok(self.reconsume_in(TokenizerState::NamedCharacterReference))
            }
            // "U+0023 NUMBER SIGN (#): Append the current input character to the
            // temporary buffer. Switch to the numeric character reference state."
            '#' => {
                self.temp_buf.push(c);
                Ok(self.switch_to(TokenizerState::NumericCharacterReference))
            }
            // "Anything else: Flush code points consumed as a character
            // reference. Reconsume in the return state."
            _ => {
                self.flush_code_points_consumed_as_character_reference()?;
                Ok(self.reconsume_in(self.return_state))
            }
        }
    }

    /// [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
    ///
    /// "Consume the maximum number of characters possible, where the consumed
    /// characters are one of the identifiers in the first column of the named
    /// character references table. Append each character to the temporary
    /// buffer when it's consumed."
    ///
    /// `None` is end of file.
    pub(super) fn named_character_reference_state(&mut self, c: Option<char>) -> StepResult {
        let Some(c) = c else {
            return self.finish_named_reference(None);
        };
        // Index of `c` within the reference name (the buffer starts with `&`).
        let i = self.temp_buf.len() - 1;
        let window = if i == 0 {
            first_letter_window(c)
        } else {
            self.narrow(i, c)
        };
        let Some((lo, hi)) = window else {
            return self.finish_named_reference(Some(c));
        };
        self.named.lo = lo;
        self.named.hi = hi;
        self.temp_buf.push(c);
        // The exact match, if any, sorts first in the window.
        if NAMES.get(lo).is_some_and(|name| name.len() == i + 1) {
            self.named.matched = Some((lo, self.temp_buf.len()));
        }
        Ok(Step::Consume)
    }

    /// The candidates whose name continues with `c` at index `i`.
    fn narrow(&self, i: usize, c: char) -> Option<(usize, usize)> {
        let b = u8::try_from(c).ok()?;
        let (lo, hi) = (self.named.lo, self.named.hi);
        let window = NAMES.get(lo..=hi)?;
        let start = window.partition_point(|n| n.as_bytes().get(i).is_none_or(|&x| x < b));
        let end = window.partition_point(|n| n.as_bytes().get(i).is_none_or(|&x| x <= b));
        (start < end).then(|| (lo + start, lo + end - 1))
    }

    /// Nothing longer can match: decide what the consumed characters mean and
    /// go back to the return state. `next` is the character that stopped the
    /// match, still to be reconsumed.
    fn finish_named_reference(&mut self, next: Option<char>) -> StepResult {
        let Some((index, len)) = self.named.matched else {
            // "Otherwise: Flush code points consumed as a character reference.
            // Switch to the ambiguous ampersand state."
            self.flush_code_points_consumed_as_character_reference()?;
            return Ok(self.reconsume_in(TokenizerState::AmbiguousAmpersand));
        };
        let name = NAMES.get(index).copied().unwrap_or_default();
        let value = VALUES.get(index).copied().unwrap_or_default();
        let leftover = self.temp_buf.split_off(len.min(self.temp_buf.len()));
        let ends_with_semicolon = name.ends_with(';');

        // "If the character reference was consumed as part of an attribute, and
        // the last character matched is not a U+003B SEMICOLON character (;),
        // and the next input character is either a U+003D EQUALS SIGN character
        // (=) or an ASCII alphanumeric, then, for historical reasons, flush code
        // points consumed as a character reference and switch to the return
        // state."
        let following = leftover.chars().next().or(next);
        if self.in_attribute()
            && !ends_with_semicolon
            && following.is_some_and(|f| f == '=' || f.is_ascii_alphanumeric())
        {
            self.temp_buf.push_str(&leftover);
            self.flush_code_points_consumed_as_character_reference()?;
            return Ok(self.reconsume_in(self.return_state));
        }

        // "If the last character matched is not a U+003B SEMICOLON character
        // (;), then this is a missing-semicolon-after-character-reference parse
        // error."
        if !ends_with_semicolon {
            self.parse_error(ErrorCode::MissingSemicolonAfterCharacterReference);
        }
        // "Set the temporary buffer to the empty string. Append one or two
        // characters corresponding to the character reference name (as given by
        // the second column of the named character references table) to the
        // temporary buffer. Flush code points consumed as a character
        // reference."
        self.emit_reference_text(value)?;
        self.emit_reference_text(&leftover)?;
        self.temp_buf.clear();
        Ok(self.reconsume_in(self.return_state))
    }

    /// [§ 13.2.5.74 Ambiguous ampersand state](https://html.spec.whatwg.org/multipage/parsing.html#ambiguous-ampersand-state)
    pub(super) fn ambiguous_ampersand_state(&mut self, pos: usize, c: char) -> StepResult {
        match c {
            // "If the character reference was consumed as part of an attribute,
            // then append the current input character to the current attribute's
            // value. Otherwise, emit the current input character as a character
            // token."
            c if c.is_ascii_alphanumeric() => {
                if self.in_attribute() {
                    self.long_buf.push(c);
                } else {
                    self.text_char(pos);
                }
                Ok(Step::Consume)
            }
            ';' => {
                self.parse_error(ErrorCode::UnknownNamedCharacterReference);
                Ok(self.reconsume_in(self.return_state))
            }
            _ => Ok(self.reconsume_in(self.return_state)),
        }
    }

    /// [§ 13.2.5.75 Numeric character reference state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-state)
    ///
    /// "Set the character reference code to zero (0)."
    pub(super) fn numeric_character_reference_state(&mut self, c: char) -> StepResult {
        self.char_ref_code = 0;
        if c == 'x' || c == 'X' {
            self.temp_buf.push(c);
            return Ok(self.switch_to(TokenizerState::HexadecimalCharacterReferenceStart));
        }
        Ok(self.reconsume_in(TokenizerState::DecimalCharacterReferenceStart))
    }

    /// [§ 13.2.5.76 Hexadecimal character reference start state](https://html.spec.whatwg.org/multipage/parsing.html#hexadecimal-character-reference-start-state)
    pub(super) fn hexadecimal_character_reference_start_state(&mut self, c: char) -> StepResult {
        if c.is_ascii_hexdigit() {
            return Ok(self.reconsume_in(TokenizerState::HexadecimalCharacterReference));
        }
        self.absence_of_digits()
    }

    /// [§ 13.2.5.77 Decimal character reference start state](https://html.spec.whatwg.org/multipage/parsing.html#decimal-character-reference-start-state)
    pub(super) fn decimal_character_reference_start_state(&mut self, c: char) -> StepResult {
        if c.is_ascii_digit() {
            return Ok(self.reconsume_in(TokenizerState::DecimalCharacterReference));
        }
        self.absence_of_digits()
    }

    /// "This is an absence-of-digits-in-numeric-character-reference parse
    /// error. Flush code points consumed as a character reference. Reconsume in
    /// the return state."
    fn absence_of_digits(&mut self) -> StepResult {
        self.parse_error(ErrorCode::AbsenceOfDigitsInNumericCharacterReference);
        self.flush_code_points_consumed_as_character_reference()?;
        Ok(self.reconsume_in(self.return_state))
    }

    /// [§ 13.2.5.78 Hexadecimal character reference state](https://html.spec.whatwg.org/multipage/parsing.html#hexadecimal-character-reference-state)
    pub(super) fn hexadecimal_character_reference_state(&mut self, c: char) -> StepResult {
        self.character_reference_digit(c, 16)
    }

    /// [§ 13.2.5.79 Decimal character reference state](https://html.spec.whatwg.org/multipage/parsing.html#decimal-character-reference-state)
    pub(super) fn decimal_character_reference_state(&mut self, c: char) -> StepResult {
        self.character_reference_digit(c, 10)
    }

    fn character_reference_digit(&mut self, c: char, radix: u32) -> StepResult {
        if let Some(digit) = c.to_digit(radix) {
            // "Multiply the character reference code by 16 (10). Add a numeric
            // version of the current input character to the character reference
            // code." Anything past the Unicode range fails the same way, so the
            // code stops growing there.
            self.char_ref_code = self
                .char_ref_code
                .saturating_mul(radix)
                .saturating_add(digit)
                .min(0x11_0000);
            return Ok(Step::Consume);
        }
        if c == ';' {
            let _ = self.numeric_character_reference_end_state()?;
            return Ok(Step::Consume);
        }
        self.parse_error(ErrorCode::MissingSemicolonAfterCharacterReference);
        self.numeric_character_reference_end_state()
    }

    /// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
    ///
    /// Consumes nothing: the caller decides whether the current character is
    /// used up.
    pub(super) fn numeric_character_reference_end_state(&mut self) -> StepResult {
        let code = self.char_ref_code;
        let decoded = match code {
            // "If the number is 0x00, then this is a null-character-reference
            // parse error. Set the character reference code to 0xFFFD."
            0 => {
                self.parse_error(ErrorCode::NullCharacterReference);
                '\u{FFFD}'
            }
            // "If the number is greater than 0x10FFFF, then this is a
            // character-reference-outside-unicode-range parse error."
            c if c > 0x10_FFFF => {
                self.parse_error(ErrorCode::CharacterReferenceOutsideUnicodeRange);
                '\u{FFFD}'
            }
            // "If the number is a surrogate, then this is a
            // surrogate-character-reference parse error."
            0xD800..=0xDFFF => {
                self.parse_error(ErrorCode::SurrogateCharacterReference);
                '\u{FFFD}'
            }
            c => {
                if is_noncharacter(c) {
                    self.parse_error(ErrorCode::NoncharacterCharacterReference);
                }
                // "If the number is 0x0D, or a control that's not ASCII
                // whitespace, then this is a control-character-reference parse
                // error."
                if c == 0x0D || (is_control(c) && !matches!(c, 0x09 | 0x0A | 0x0C | 0x20)) {
                    self.parse_error(ErrorCode::ControlCharacterReference);
                }
                c1_replacement(c)
                    .or_else(|| char::from_u32(c))
                    .unwrap_or('\u{FFFD}')
            }
        };
        self.temp_buf.clear();
        self.temp_buf.push(decoded);
        self.flush_code_points_consumed_as_character_reference()?;
        Ok(self.reconsume_in(self.return_state))
    }
}

/// The `[lo, hi]` window of names starting with the ASCII letter `c`.
fn first_letter_window(c: char) -> Option<(usize, usize)> {
    let slot = match c {
        'A'..='Z' => c as usize - 'A' as usize,
        'a'..='z' => 26 + c as usize - 'a' as usize,
        _ => return None,
    };
    let (lo, hi) = (*FIRST_LETTER_WINDOWS.get(slot)?)?;
    Some((usize::from(lo), usize::from(hi)))
}

/// "A noncharacter is a code point that is in the range U+FDD0 to U+FDEF,
/// inclusive, or U+FFFE, U+FFFF, U+1FFFE, U+1FFFF, ... U+10FFFE, or U+10FFFF."
const fn is_noncharacter(c: u32) -> bool {
    matches!(c, 0xFDD0..=0xFDEF) || (c & 0xFFFE) == 0xFFFE
}

/// "A control is a C0 control or a code point in the range U+007F DELETE to
/// U+009F APPLICATION PROGRAM COMMAND, inclusive."
const fn is_control(c: u32) -> bool {
    c <= 0x1F || matches!(c, 0x7F..=0x9F)
}

/// The table of C1 code points that browsers read as Windows-1252.
const fn c1_replacement(code: u32) -> Option<char> {
    Some(match code {
        0x80 => '\u{20AC}',
        0x82 => '\u{201A}',
        0x83 => '\u{0192}',
        0x84 => '\u{201E}',
        0x85 => '\u{2026}',
        0x86 => '\u{2020}',
        0x87 => '\u{2021}',
        0x88 => '\u{02C6}',
        0x89 => '\u{2030}',
        0x8A => '\u{0160}',
        0x8B => '\u{2039}',
        0x8C => '\u{0152}',
        0x8E => '\u{017D}',
        0x91 => '\u{2018}',
        0x92 => '\u{2019}',
        0x93 => '\u{201C}',
        0x94 => '\u{201D}',
        0x95 => '\u{2022}',
        0x96 => '\u{2013}',
        0x97 => '\u{2014}',
        0x98 => '\u{02DC}',
        0x99 => '\u{2122}',
        0x9A => '\u{0161}',
        0x9B => '\u{203A}',
        0x9C => '\u{0153}',
        0x9E => '\u{017E}',
        0x9F => '\u{0178}',
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_letter_windows_cover_their_letter() {
        let (lo, hi) = first_letter_window('n').unwrap();
        assert!(NAMES[lo].starts_with('n'));
        assert!(NAMES[hi].starts_with('n'));
        assert!(!NAMES[hi + 1].starts_with('n'));
        assert_eq!(first_letter_window('1'), None);
    }

    #[test]
    fn c1_controls_map_to_windows_1252() {
        assert_eq!(c1_replacement(0x80), Some('€'));
        assert_eq!(c1_replacement(0x81), None);
        assert_eq!(c1_replacement(0x41), None);
    }

    #[test]
    fn noncharacters() {
        assert!(is_noncharacter(0xFDD0));
        assert!(is_noncharacter(0x1FFFF));
        assert!(!is_noncharacter(0xFFFD));
    }
}
