//! Tokens and the interface the tokenizer emits them through.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! "The output of the tokenization step is a series of zero or more of the
//! following tokens: DOCTYPE, start tag, end tag, comment, character,
//! end-of-file." Tokens are never buffered: each one is handed to a
//! [`TokenHandler`] the moment it is complete. Character data is passed as a
//! borrowed slice of the input wherever possible.

use std::fmt;

use super::state::TokenizerState;
use crate::error::ParseIssue;
use crate::names::{AttributeName, ElementName};

/// A line/column location in the input, both starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// 1-based line.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
}

impl Position {
    /// The first character of the input.
    pub const START: Self = Self { line: 1, column: 1 };

    /// Advance past `c`. Line breaks have already been normalized to LF.
    pub(crate) const fn advance(&mut self, c: char) {
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// "a list of attributes, each of which has a name and a value"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// "each of which has a name"
    pub name: AttributeName,
    /// "and a value"
    pub value: String,
}

/// The finished, immutable attribute list of a start tag, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    list: Box<[Attribute]>,
}

impl Attributes {
    /// No attributes.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Whether there are none.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Iterate in source order.
    #[must_use]
    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.list.iter()
    }

    /// The value of the attribute named `name`, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.list
            .iter()
            .find(|a| a.name.name() == name)
            .map(|a| a.value.as_str())
    }

    /// Whether an attribute named `name` is present.
    #[must_use]
    pub fn contains(&self, name: &AttributeName) -> bool {
        self.list.iter().any(|a| &a.name == name)
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<(String, String)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        let mut builder = AttributesBuilder::default();
        for (name, value) in iter {
            let _ = builder.push(AttributeName::classify(&name), value);
        }
        builder.finish()
    }
}

/// Accumulates the attributes of the tag being tokenized.
///
/// [`finish`](Self::finish) hands out the immutable [`Attributes`] and leaves
/// the builder empty for the next tag.
#[derive(Debug, Clone, Default)]
pub struct AttributesBuilder {
    list: Vec<Attribute>,
}

impl AttributesBuilder {
    /// Whether an attribute with this name was already added.
    #[must_use]
    pub fn contains(&self, name: &AttributeName) -> bool {
        self.list.iter().any(|a| &a.name == name)
    }

    /// Add an attribute. Returns `false` (and drops it) if the name is taken:
    /// "if there is already an attribute on the token with the exact same
    /// name, then ... the new attribute must be removed from the token."
    pub fn push(&mut self, name: AttributeName, value: String) -> bool {
        if self.contains(&name) {
            return false;
        }
        self.list.push(Attribute { name, value });
        true
    }

    /// Whether nothing has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Drop everything collected so far.
    pub fn clear(&mut self) {
        self.list.clear();
    }

    /// Freeze the collected attributes.
    pub fn finish(&mut self) -> Attributes {
        Attributes {
            list: std::mem::take(&mut self.list).into_boxed_slice(),
        }
    }
}

/// "Start and end tag tokens have a tag name, a self-closing flag, and a list
/// of attributes"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// "a tag name"
    pub name: ElementName,
    /// "a list of attributes"
    pub attributes: Attributes,
    /// "a self-closing flag"
    pub self_closing: bool,
}

impl Tag {
    /// A start tag with no attributes.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: ElementName::classify(name),
            attributes: Attributes::empty(),
            self_closing: false,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.name)?;
        for attr in &self.attributes {
            write!(f, " {}=\"{}\"", attr.name, attr.value)?;
        }
        if self.self_closing {
            write!(f, " /")?;
        }
        write!(f, ">")
    }
}

/// "DOCTYPE tokens have a name, a public identifier, a system identifier, and
/// a force-quirks flag. When a DOCTYPE token is created, its name, public
/// identifier, and system identifier must be marked as missing (which is a
/// distinct state from the empty string), and the force-quirks flag must be
/// set to off"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Doctype {
    /// "a name"
    pub name: Option<String>,
    /// "a public identifier"
    pub public_id: Option<String>,
    /// "a system identifier"
    pub system_id: Option<String>,
    /// "a force-quirks flag"
    pub force_quirks: bool,
}

/// What the tokenizer should do after handing over a start tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResult {
    /// Go on in the data state.
    Continue,
    /// Switch content model, e.g. to RCDATA after `<title>`. `end_tag` names
    /// the element whose end tag closes raw text.
    SwitchTo {
        /// The next state.
        state: TokenizerState,
        /// The appropriate end tag, if any.
        end_tag: Option<ElementName>,
    },
    /// Stop consuming right after this tag; the caller resumes later.
    Suspend,
}

/// The consumer of tokens.
///
/// Implemented by the tree builder; tests use recording handlers.
pub trait TokenHandler {
    /// Called once before the first token.
    fn start_tokenization(&mut self) {}

    /// A start tag.
    fn start_tag(&mut self, tag: Tag) -> HandlerResult;

    /// An end tag. Attributes on end tags are reported and dropped by the
    /// tokenizer.
    fn end_tag(&mut self, name: ElementName);

    /// A run of characters. Never empty.
    fn characters(&mut self, text: &str);

    /// A comment. Only delivered when [`wants_comments`](Self::wants_comments).
    fn comment(&mut self, text: &str);

    /// A DOCTYPE.
    fn doctype(&mut self, doctype: Doctype);

    /// A U+0000 NULL seen in the data state. Whether it becomes U+FFFD or is
    /// dropped depends on where the tree builder is.
    fn zero_originating_replacement_character(&mut self);

    /// End of file. Called exactly once.
    fn eof(&mut self);

    /// Called once after [`eof`](Self::eof).
    fn end_tokenization(&mut self) {}

    /// A lexical parse error.
    fn parse_error(&mut self, _issue: ParseIssue) {}

    /// Location of the token about to be delivered.
    fn set_position(&mut self, _position: Position) {}

    /// Whether comments should be delivered at all.
    fn wants_comments(&self) -> bool {
        true
    }

    /// [§ 13.2.5.42](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    /// "If there is an adjusted current node and it is not an element in the
    /// HTML namespace", `<![CDATA[` opens a CDATA section.
    fn cdata_section_allowed(&self) -> bool {
        false
    }
}
