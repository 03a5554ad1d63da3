//! Parse errors.
//!
//! [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
//!
//! "This specification defines the parsing rules for HTML documents, whether
//! they are syntactically correct or not." Almost every error is therefore
//! data: a [`ParseIssue`] handed to the diagnostic sink while the parser
//! carries on with the defined repair. The only way to abort a parse is a
//! [`ParseError`], raised when an XML-compatibility policy is set to fatal.

use std::fmt;

use strum_macros::Display;
use thiserror::Error;

use crate::tokenizer::Position;

/// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
///
/// Tokenizer-level errors, displayed with their WHATWG codes
/// (`eof-in-tag`, `duplicate-attribute`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ErrorCode {
    /// `<!-->` or `<!--->`.
    AbruptClosingOfEmptyComment,
    /// `>` inside a quoted doctype public identifier.
    AbruptDoctypePublicIdentifier,
    /// `>` inside a quoted doctype system identifier.
    AbruptDoctypeSystemIdentifier,
    /// `&#` or `&#x` with no digits after it.
    AbsenceOfDigitsInNumericCharacterReference,
    /// `<![CDATA[` outside foreign content.
    CdataInHtmlContent,
    /// A numeric reference above U+10FFFF.
    CharacterReferenceOutsideUnicodeRange,
    /// A numeric reference to a control character.
    ControlCharacterReference,
    /// An attribute name repeated on one tag. The first value wins.
    DuplicateAttribute,
    /// An end tag carrying attributes.
    EndTagWithAttributes,
    /// An end tag written as `</name/>`.
    EndTagWithTrailingSolidus,
    /// End of input right after `<` or `</`.
    EofBeforeTagName,
    /// End of input inside a CDATA section.
    EofInCdata,
    /// End of input inside a comment.
    EofInComment,
    /// End of input inside a doctype.
    EofInDoctype,
    /// End of input inside `<!--` in script data.
    EofInScriptHtmlCommentLikeText,
    /// End of input inside a start or end tag.
    EofInTag,
    /// A comment closed by `--!>`.
    IncorrectlyClosedComment,
    /// `<!` not followed by `--`, `DOCTYPE` or `[CDATA[`.
    IncorrectlyOpenedComment,
    /// Something other than `PUBLIC` or `SYSTEM` after the doctype name.
    InvalidCharacterSequenceAfterDoctypeName,
    /// `<` or `</` followed by a character that cannot start a tag name.
    InvalidFirstCharacterOfTagName,
    /// `=` directly followed by `>`.
    MissingAttributeValue,
    /// `<!DOCTYPE>` with no name.
    MissingDoctypeName,
    /// `PUBLIC` with no identifier after it.
    MissingDoctypePublicIdentifier,
    /// `SYSTEM` with no identifier after it.
    MissingDoctypeSystemIdentifier,
    /// `</>`.
    MissingEndTagName,
    /// An unquoted doctype public identifier.
    MissingQuoteBeforeDoctypePublicIdentifier,
    /// An unquoted doctype system identifier.
    MissingQuoteBeforeDoctypeSystemIdentifier,
    /// A character reference without its closing `;`.
    MissingSemicolonAfterCharacterReference,
    /// `PUBLIC` immediately followed by a quote.
    MissingWhitespaceAfterDoctypePublicKeyword,
    /// `SYSTEM` immediately followed by a quote.
    MissingWhitespaceAfterDoctypeSystemKeyword,
    /// `<!DOCTYPEhtml>`.
    MissingWhitespaceBeforeDoctypeName,
    /// Two attributes with nothing between them.
    MissingWhitespaceBetweenAttributes,
    /// The public and system identifiers written back to back.
    MissingWhitespaceBetweenDoctypePublicAndSystemIdentifiers,
    /// `<!--` inside a comment.
    NestedComment,
    /// A numeric reference to a Unicode noncharacter.
    NoncharacterCharacterReference,
    /// `&#0;`.
    NullCharacterReference,
    /// A numeric reference to a surrogate.
    SurrogateCharacterReference,
    /// Trailing garbage after the doctype system identifier.
    UnexpectedCharacterAfterDoctypeSystemIdentifier,
    /// `"`, `'` or `<` in an attribute name.
    UnexpectedCharacterInAttributeName,
    /// `"`, `'`, `<`, `=` or `` ` `` in an unquoted value.
    UnexpectedCharacterInUnquotedAttributeValue,
    /// An attribute name starting with `=`.
    UnexpectedEqualsSignBeforeAttributeName,
    /// U+0000 in the input.
    UnexpectedNullCharacter,
    /// `<?`, read as a bogus comment.
    UnexpectedQuestionMarkInsteadOfTagName,
    /// A `/` inside a tag that is not part of `/>`.
    UnexpectedSolidusInTag,
    /// `&name;` where `name` is not a known reference.
    UnknownNamedCharacterReference,
}

/// Tree-construction errors and warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum TreeErrorCode {
    /// A DOCTYPE anywhere but at the very start.
    UnexpectedDoctype,
    /// The document did not start with a DOCTYPE.
    MissingDoctype,
    /// A DOCTYPE other than `<!DOCTYPE html>` or the `about:legacy-compat` form.
    LegacyDoctype,
    /// A DOCTYPE that puts the document in quirks or limited-quirks mode.
    QuirkyDoctype,
    /// A start tag the current insertion mode ignores.
    StrayStartTag,
    /// An end tag with no matching open element.
    StrayEndTag,
    /// Content after `</body>` or `</html>` reopened the body.
    UnexpectedContentAfterBody,
    /// Text or elements moved out of a table.
    FosterParented,
    /// Non-whitespace text where only whitespace is allowed.
    NonSpaceCharacters,
    /// U+0000 in text.
    UnexpectedNullCharacter,
    /// An end tag or end of file that closes elements left open.
    UnclosedElements,
    /// End of file with elements that should have been closed.
    EofWithOpenElements,
    /// The adoption agency had to rebuild misnested formatting elements.
    MisnestedFormatting,
    /// A formatting end tag whose element is not in scope.
    FormattingElementNotInScope,
    /// A formatting end tag whose element is no longer open.
    FormattingElementNotOpen,
    /// An element that may not nest in itself (`a`, `form`, `button`, `nobr`, ...).
    NestedElement,
    /// An HTML start tag that breaks out of SVG or MathML.
    HtmlStartTagInForeignContent,
    /// `<br/>`-style syntax on a non-void HTML element.
    NonVoidHtmlElementStartTagWithTrailingSolidus,
    /// An end tag that does not match the current node.
    EndTagMismatch,
}

/// Which stage reported the issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueCode {
    /// Reported by the tokenizer.
    Lexical(ErrorCode),
    /// Reported by the tree builder.
    Tree(TreeErrorCode),
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lexical(code) => code.fmt(f),
            Self::Tree(code) => code.fmt(f),
        }
    }
}

/// A recoverable problem found while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// The named error.
    pub code: IssueCode,
    /// Human-readable detail, e.g. the offending tag.
    pub message: String,
    /// Where in the input the issue was found.
    pub position: Position,
    /// `false` for advisory warnings (e.g. legacy DOCTYPEs), `true` for
    /// "Parse errors are only errors with the content".
    pub is_error: bool,
}

impl ParseIssue {
    /// A tokenizer error.
    #[must_use]
    pub fn lexical(code: ErrorCode, position: Position) -> Self {
        Self {
            code: IssueCode::Lexical(code),
            message: code.to_string(),
            position,
            is_error: true,
        }
    }

    /// A tree-construction error.
    #[must_use]
    pub fn tree(code: TreeErrorCode, message: impl Into<String>, position: Position) -> Self {
        Self {
            code: IssueCode::Tree(code),
            message: message.into(),
            position,
            is_error: true,
        }
    }

    /// Downgrade to an advisory warning.
    #[must_use]
    pub const fn as_warning(mut self) -> Self {
        self.is_error = false;
        self
    }
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.position, self.message, self.code)
    }
}

/// What violated XML compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum XmlViolation {
    /// `--` inside a comment, or a comment ending in `-`.
    CommentDoubleHyphen,
    /// U+000C FORM FEED in text.
    FormFeed,
    /// An `xmlns` or `xmlns:*` attribute.
    XmlnsAttribute,
}

/// A fatal parse failure.
///
/// Only produced when an [`XmlViolationPolicy::Fatal`](crate::XmlViolationPolicy)
/// is configured; the HTML algorithm itself never fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input that cannot be represented in an XML infoset.
    #[error("XML compatibility violation ({violation}) at {position}")]
    XmlViolation {
        /// What was violated.
        violation: XmlViolation,
        /// Where.
        position: Position,
    },
}
