//! Parser configuration.

/// How to treat input that an XML infoset cannot represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum XmlViolationPolicy {
    /// Keep the input as HTML would.
    #[default]
    Allow,
    /// Rewrite it into something XML can carry (`--` becomes `- -`, form
    /// feeds become spaces, `xmlns` attributes are dropped).
    AlterInfoset,
    /// Abort the parse with [`ParseError::XmlViolation`](crate::ParseError).
    Fatal,
}

/// Options that affect a parse.
///
/// Built with the `with_*` methods:
///
/// ```
/// use sapling_html::{ParserOptions, XmlViolationPolicy};
///
/// let options = ParserOptions::new()
///     .with_scripting(false)
///     .with_comment_policy(XmlViolationPolicy::AlterInfoset);
/// assert!(!options.scripting_enabled);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct ParserOptions {
    /// [§ 13.2.3](https://html.spec.whatwg.org/multipage/parsing.html#scripting-flag)
    /// "The scripting flag is set to "enabled" if scripting was enabled for the
    /// Document with which the parser is associated". Decides whether
    /// `noscript` is raw text.
    pub scripting_enabled: bool,
    /// Report legacy DOCTYPEs and quirks-mode decisions as warnings.
    pub report_warnings: bool,
    /// Policy for `--` inside comments.
    pub comment_policy: XmlViolationPolicy,
    /// Policy for U+000C FORM FEED in text.
    pub content_space_policy: XmlViolationPolicy,
    /// Policy for `xmlns` attributes.
    pub xmlns_policy: XmlViolationPolicy,
    /// [§ 13.2.6.4.1](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    /// "If the document is not an iframe srcdoc document", a missing or quirky
    /// DOCTYPE switches to quirks mode. A srcdoc document never does.
    pub iframe_srcdoc: bool,
}

impl ParserOptions {
    /// Scripting enabled, everything else off.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            scripting_enabled: true,
            report_warnings: false,
            comment_policy: XmlViolationPolicy::Allow,
            content_space_policy: XmlViolationPolicy::Allow,
            xmlns_policy: XmlViolationPolicy::Allow,
            iframe_srcdoc: false,
        }
    }

    /// Set the scripting flag.
    #[must_use]
    pub const fn with_scripting(mut self, enabled: bool) -> Self {
        self.scripting_enabled = enabled;
        self
    }

    /// Report advisory warnings as well as errors.
    #[must_use]
    pub const fn with_warnings(mut self) -> Self {
        self.report_warnings = true;
        self
    }

    /// Set the comment policy.
    #[must_use]
    pub const fn with_comment_policy(mut self, policy: XmlViolationPolicy) -> Self {
        self.comment_policy = policy;
        self
    }

    /// Set the form-feed policy.
    #[must_use]
    pub const fn with_content_space_policy(mut self, policy: XmlViolationPolicy) -> Self {
        self.content_space_policy = policy;
        self
    }

    /// Set the `xmlns` attribute policy.
    #[must_use]
    pub const fn with_xmlns_policy(mut self, policy: XmlViolationPolicy) -> Self {
        self.xmlns_policy = policy;
        self
    }

    /// Apply every XML policy at once.
    #[must_use]
    pub const fn with_xml_policy(self, policy: XmlViolationPolicy) -> Self {
        self.with_comment_policy(policy)
            .with_content_space_policy(policy)
            .with_xmlns_policy(policy)
    }

    /// Parse as an `iframe srcdoc` document.
    #[must_use]
    pub const fn with_iframe_srcdoc(mut self) -> Self {
        self.iframe_srcdoc = true;
        self
    }
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self::new()
    }
}
