//! Element name classification.
//!
//! [§ 13.2.4.3 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)
//!
//! The tree builder never branches on tag-name strings. Every tag name coming
//! out of the tokenizer is classified once into an [`ElementName`], which
//! carries a [`DispatchGroup`] (the key of the insertion-mode `match`es) and
//! the [`ElementFlags`] the stack algorithms test.

use std::fmt;

use bitflags::bitflags;
use strum_macros::Display;

bitflags! {
    /// Category bits precomputed for every well-known element name.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ElementFlags: u16 {
        /// Not in the well-known table.
        const CUSTOM = 1 << 0;
        /// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#special)
        /// "The following elements have varying levels of special parsing rules"
        const SPECIAL = 1 << 1;
        /// `table`, `tbody`, `tfoot`, `thead`, `tr`: content misplaced inside
        /// them is foster parented.
        const FOSTER_PARENTING = 1 << 2;
        /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-scope)
        /// Bounds the generic "in scope" walk when in the HTML namespace.
        const SCOPING = 1 << 3;
        /// Bounds the scope walk when in the SVG namespace.
        const SCOPING_AS_SVG = 1 << 4;
        /// Bounds the scope walk when in the MathML namespace.
        const SCOPING_AS_MATHML = 1 << 5;
        /// [§ 13.2.6](https://html.spec.whatwg.org/multipage/parsing.html#html-integration-point)
        /// SVG `foreignObject`, `desc` and `title`.
        const HTML_INTEGRATION_POINT = 1 << 6;
        /// [§ 13.2.6.3](https://html.spec.whatwg.org/multipage/parsing.html#generate-implied-end-tags)
        /// Popped by "generate implied end tags".
        const OPTIONAL_END_TAG = 1 << 7;
        /// [§ 13.2.6.5](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inforeign)
        /// A start tag with this name pops out of foreign content.
        const BREAKS_OUT = 1 << 8;
    }
}

/// The dispatch key of the tree builder.
///
/// Names that the insertion modes treat identically share a group, so a mode
/// handler is a `match` on this value rather than a chain of string
/// comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[repr(u8)]
pub enum DispatchGroup {
    /// Anything the tree builder has no dedicated rule for.
    Other,
    /// `a`
    A,
    /// MathML `annotation-xml`
    AnnotationXml,
    /// `applet`, `marquee`, `object`
    Applet,
    /// `base`, `basefont`, `bgsound`, `link`
    Base,
    /// The "address, article, aside, ..." start-tag group of "in body".
    Block,
    /// `body`
    Body,
    /// `br`
    Br,
    /// `button`
    Button,
    /// `caption`
    Caption,
    /// `col`
    Col,
    /// `colgroup`
    Colgroup,
    /// `dd`, `dt`
    DdDt,
    /// `font`
    Font,
    /// `form`
    Form,
    /// `b`, `big`, `code`, `em`, `i`, `s`, `small`, `strike`, `strong`, `tt`, `u`
    Formatting,
    /// `frame`
    Frame,
    /// `frameset`
    Frameset,
    /// `head`
    Head,
    /// `h1` to `h6`
    Heading,
    /// `hr`
    Hr,
    /// `html`
    Html,
    /// `iframe`
    Iframe,
    /// `image`, which "in body" rewrites to `img`
    Image,
    /// `input`
    Input,
    /// `li`
    Li,
    /// `ol`, `ul`
    List,
    /// `math`
    Math,
    /// `mi`, `mo`, `mn`, `ms`, `mtext`
    MathMlText,
    /// `meta`
    Meta,
    /// `mglyph`, `malignmark`
    Mglyph,
    /// `nobr`
    Nobr,
    /// `noembed`
    Noembed,
    /// `noframes`
    Noframes,
    /// `noscript`
    Noscript,
    /// `optgroup`
    Optgroup,
    /// `option`
    Option,
    /// `p`
    P,
    /// `param`, `source`, `track`
    Param,
    /// `plaintext`
    Plaintext,
    /// `pre`, `listing`
    Pre,
    /// `rb`, `rtc`
    RbRtc,
    /// `rp`, `rt`
    RpRt,
    /// `ruby`
    Ruby,
    /// `script`
    Script,
    /// `select`
    Select,
    /// `style`
    Style,
    /// `svg`
    Svg,
    /// `table`
    Table,
    /// `tbody`, `tfoot`, `thead`
    TbodyGroup,
    /// `td`, `th`
    TdTh,
    /// `template`
    Template,
    /// `textarea`
    Textarea,
    /// `title`
    Title,
    /// `tr`
    Tr,
    /// `area`, `embed`, `img`, `keygen`, `wbr`
    Void,
    /// `xmp`
    Xmp,
}

struct Entry {
    hash: u32,
    name: &'static str,
    camel: Option<&'static str>,
    group: DispatchGroup,
    flags: ElementFlags,
}

const fn entry(
    hash: u32,
    name: &'static str,
    camel: Option<&'static str>,
    group: DispatchGroup,
    flags: ElementFlags,
) -> Entry {
    Entry {
        hash,
        name,
        camel,
        group,
        flags,
    }
}

/// Packs length, first byte, last byte and a mix of two inner bytes.
///
/// Distinct for every name in [`ELEMENTS`]; the table is sorted by it.
fn name_hash(name: &[u8]) -> u32 {
    let (Some(&first), Some(&last)) = (name.first(), name.last()) else {
        return 0;
    };
    let len = name.len();
    let mix = name[len / 2].wrapping_add(name[len / 3]);
    #[allow(clippy::cast_possible_truncation)]
    let len = (len.min(0xff)) as u32;
    (len << 24) | (u32::from(first) << 16) | (u32::from(last) << 8) | u32::from(mix)
}

#[derive(Clone, PartialEq, Eq, Hash)]
enum Repr {
    Known(u16),
    Custom(Box<str>),
}

/// Interned identity of an element local name.
///
/// Two `ElementName`s are equal exactly when they name the same element, so
/// identity comparison replaces string comparison throughout the tree builder.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ElementName(Repr);

impl ElementName {
    /// Classify a (lowercase) tag name.
    ///
    /// Well-known names resolve to their table entry; anything else gets a
    /// fresh identity in [`DispatchGroup::Other`] flagged [`ElementFlags::CUSTOM`].
    #[must_use]
    pub fn classify(name: &str) -> Self {
        let hash = name_hash(name.as_bytes());
        let start = ELEMENTS.partition_point(|e| e.hash < hash);
        let found = ELEMENTS[start..]
            .iter()
            .take_while(|e| e.hash == hash)
            .position(|e| e.name == name);
        match found {
            #[allow(clippy::cast_possible_truncation)]
            Some(offset) => Self(Repr::Known((start + offset) as u16)),
            None => Self(Repr::Custom(name.into())),
        }
    }

    fn entry(&self) -> Option<&'static Entry> {
        match &self.0 {
            Repr::Known(index) => ELEMENTS.get(usize::from(*index)),
            Repr::Custom(_) => None,
        }
    }

    /// The lowercase local name.
    #[must_use]
    pub fn name(&self) -> &str {
        match &self.0 {
            Repr::Known(_) => self.entry().map_or("", |e| e.name),
            Repr::Custom(name) => name,
        }
    }

    /// [§ 13.2.6.5](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inforeign)
    ///
    /// The local name an SVG element gets, with the case fixed up per the
    /// "adjust SVG tag names" table (`foreignobject` becomes `foreignObject`).
    #[must_use]
    pub fn camel_case_name(&self) -> &str {
        match self.entry().and_then(|e| e.camel) {
            Some(camel) => camel,
            None => self.name(),
        }
    }

    /// The dispatch group.
    #[must_use]
    pub fn group(&self) -> DispatchGroup {
        self.entry().map_or(DispatchGroup::Other, |e| e.group)
    }

    /// The precomputed category bits.
    #[must_use]
    pub fn flags(&self) -> ElementFlags {
        self.entry().map_or(ElementFlags::CUSTOM, |e| e.flags)
    }

    /// Whether the name is in the well-known table.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        matches!(self.0, Repr::Known(_))
    }

    /// [§ 13.2.6.5](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inforeign)
    ///
    /// "A start tag whose tag name is one of: "b", "big", "blockquote", "body",
    /// "br", "center", "code", "dd", "div", "dl", "dt", "em", "embed", "h1", ...
    /// "var"" pops out of foreign content. `font` is only included when it
    /// carries `color`, `face` or `size`, which the caller checks.
    #[must_use]
    pub fn breaks_out_of_foreign_content(&self) -> bool {
        self.flags().contains(ElementFlags::BREAKS_OUT)
    }
}

impl fmt::Debug for ElementName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementName({})", self.name())
    }
}

impl fmt::Display for ElementName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Well-known element names, sorted by [`name_hash`].
static ELEMENTS: [Entry; ELEMENT_COUNT] = [
    entry(0x016161c2, "a", None, DispatchGroup::A, ElementFlags::empty()),
    entry(0x016262c4, "b", None, DispatchGroup::Formatting, ElementFlags::BREAKS_OUT),
    entry(0x016969d2, "i", None, DispatchGroup::Formatting, ElementFlags::BREAKS_OUT),
    entry(0x017070e0, "p", None, DispatchGroup::P, ElementFlags::SPECIAL.union(ElementFlags::OPTIONAL_END_TAG).union(ElementFlags::BREAKS_OUT)),
    entry(0x017171e2, "q", None, DispatchGroup::Other, ElementFlags::empty()),
    entry(0x017373e6, "s", None, DispatchGroup::Formatting, ElementFlags::BREAKS_OUT),
    entry(0x017575ea, "u", None, DispatchGroup::Formatting, ElementFlags::BREAKS_OUT),
    entry(0x026272d4, "br", None, DispatchGroup::Br, ElementFlags::SPECIAL.union(ElementFlags::BREAKS_OUT)),
    entry(0x026464c8, "dd", None, DispatchGroup::DdDt, ElementFlags::SPECIAL.union(ElementFlags::OPTIONAL_END_TAG).union(ElementFlags::BREAKS_OUT)),
    entry(0x02646cd0, "dl", None, DispatchGroup::Block, ElementFlags::SPECIAL.union(ElementFlags::BREAKS_OUT)),
    entry(0x026474d8, "dt", None, DispatchGroup::DdDt, ElementFlags::SPECIAL.union(ElementFlags::OPTIONAL_END_TAG).union(ElementFlags::BREAKS_OUT)),
    entry(0x02656dd2, "em", None, DispatchGroup::Formatting, ElementFlags::BREAKS_OUT),
    entry(0x02683199, "h1", None, DispatchGroup::Heading, ElementFlags::SPECIAL.union(ElementFlags::BREAKS_OUT)),
    entry(0x0268329a, "h2", None, DispatchGroup::Heading, ElementFlags::SPECIAL.union(ElementFlags::BREAKS_OUT)),
    entry(0x0268339b, "h3", None, DispatchGroup::Heading, ElementFlags::SPECIAL.union(ElementFlags::BREAKS_OUT)),
    entry(0x0268349c, "h4", None, DispatchGroup::Heading, ElementFlags::SPECIAL.union(ElementFlags::BREAKS_OUT)),
    entry(0x0268359d, "h5", None, DispatchGroup::Heading, ElementFlags::SPECIAL.union(ElementFlags::BREAKS_OUT)),
    entry(0x0268369e, "h6", None, DispatchGroup::Heading, ElementFlags::SPECIAL.union(ElementFlags::BREAKS_OUT)),
    entry(0x026872da, "hr", None, DispatchGroup::Hr, ElementFlags::SPECIAL.union(ElementFlags::BREAKS_OUT)),
    entry(0x026c69d5, "li", None, DispatchGroup::Li, ElementFlags::SPECIAL.union(ElementFlags::OPTIONAL_END_TAG).union(ElementFlags::BREAKS_OUT)),
    entry(0x026d69d6, "mi", None, DispatchGroup::MathMlText, ElementFlags::SCOPING_AS_MATHML),
    entry(0x026d6edb, "mn", None, DispatchGroup::MathMlText, ElementFlags::SCOPING_AS_MATHML),
    entry(0x026d6fdc, "mo", None, DispatchGroup::MathMlText, ElementFlags::SCOPING_AS_MATHML),
    entry(0x026d73e0, "ms", None, DispatchGroup::MathMlText, ElementFlags::SCOPING_AS_MATHML),
    entry(0x026f6cdb, "ol", None, DispatchGroup::List, ElementFlags::SPECIAL.union(ElementFlags::BREAKS_OUT)),
    entry(0x027262d4, "rb", None, DispatchGroup::RbRtc, ElementFlags::OPTIONAL_END_TAG),
    entry(0x027270e2, "rp", None, DispatchGroup::RpRt, ElementFlags::OPTIONAL_END_TAG),
    entry(0x027274e6, "rt", None, DispatchGroup::RpRt, ElementFlags::OPTIONAL_END_TAG),
    entry(0x027464d8, "td", None, DispatchGroup::TdTh, ElementFlags::SPECIAL.union(ElementFlags::SCOPING)),
    entry(0x027468dc, "th", None, DispatchGroup::TdTh, ElementFlags::SPECIAL.union(ElementFlags::SCOPING)),
    entry(0x027472e6, "tr", None, DispatchGroup::Tr, ElementFlags::SPECIAL.union(ElementFlags::FOSTER_PARENTING)),
    entry(0x027474e8, "tt", None, DispatchGroup::Formatting, ElementFlags::BREAKS_OUT),
    entry(0x02756ce1, "ul", None, DispatchGroup::List, ElementFlags::SPECIAL.union(ElementFlags::BREAKS_OUT)),
    entry(0x036267d2, "big", None, DispatchGroup::Formatting, ElementFlags::BREAKS_OUT),
    entry(0x036269c8, "bdi", None, DispatchGroup::Other, ElementFlags::empty()),
    entry(0x03626fc8, "bdo", None, DispatchGroup::Other, ElementFlags::empty()),
    entry(0x03636cde, "col", None, DispatchGroup::Col, ElementFlags::SPECIAL),
    entry(0x03646cca, "del", None, DispatchGroup::Other, ElementFlags::empty()),
    entry(0x03646ecc, "dfn", None, DispatchGroup::Other, ElementFlags::empty()),
    entry(0x036472d2, "dir", None, DispatchGroup::Block, ElementFlags::SPECIAL),
    entry(0x036476d2, "div", None, DispatchGroup::Block, ElementFlags::SPECIAL.union(ElementFlags::BREAKS_OUT)),
    entry(0x036967da, "img", None, DispatchGroup::Void, ElementFlags::SPECIAL.union(ElementFlags::BREAKS_OUT)),
    entry(0x036973dc, "ins", None, DispatchGroup::Other, ElementFlags::empty()),
    entry(0x036b64c4, "kbd", None, DispatchGroup::Other, ElementFlags::empty()),
    entry(0x036d70c2, "map", None, DispatchGroup::Other, ElementFlags::empty()),
    entry(0x036e76c2, "nav", None, DispatchGroup::Block, ElementFlags::SPECIAL),
    entry(0x037065e4, "pre", None, DispatchGroup::Pre, ElementFlags::SPECIAL.union(ElementFlags::BREAKS_OUT)),
    entry(0x037263e8, "rtc", None, DispatchGroup::RbRtc, ElementFlags::OPTIONAL_END_TAG),
    entry(0x037362ea, "sub", None, DispatchGroup::Other, ElementFlags::BREAKS_OUT),
    entry(0x037367ec, "svg", None, DispatchGroup::Svg, ElementFlags::empty()),
    entry(0x037370ea, "sup", None, DispatchGroup::Other, ElementFlags::BREAKS_OUT),
    entry(0x037672c2, "var", None, DispatchGroup::Other, ElementFlags::BREAKS_OUT),
    entry(0x037772c4, "wbr", None, DispatchGroup::Void, ElementFlags::SPECIAL),
    entry(0x037870da, "xmp", None, DispatchGroup::Xmp, ElementFlags::SPECIAL),
    entry(0x046161d7, "area", None, DispatchGroup::Void, ElementFlags::SPECIAL),
    entry(0x046172c4, "abbr", None, DispatchGroup::Other, ElementFlags::empty()),
    entry(0x046265d4, "base", None, DispatchGroup::Base, ElementFlags::SPECIAL),
    entry(0x046279d3, "body", None, DispatchGroup::Body, ElementFlags::SPECIAL.union(ElementFlags::BREAKS_OUT)),
    entry(0x046365d3, "code", None, DispatchGroup::Formatting, ElementFlags::BREAKS_OUT),
    entry(0x046365dd, "cite", None, DispatchGroup::Other, ElementFlags::empty()),
    entry(0x046461d5, "data", None, DispatchGroup::Other, ElementFlags::empty()),
    entry(0x046463d8, "desc", None, DispatchGroup::Other, ElementFlags::SCOPING_AS_SVG.union(ElementFlags::HTML_INTEGRATION_POINT)),
    entry(0x04666de1, "form", None, DispatchGroup::Form, ElementFlags::SPECIAL),
    entry(0x046674dd, "font", None, DispatchGroup::Font, ElementFlags::empty()),
    entry(0x046864c6, "head", None, DispatchGroup::Head, ElementFlags::SPECIAL.union(ElementFlags::BREAKS_OUT)),
    entry(0x04686ce1, "html", None, DispatchGroup::Html, ElementFlags::SPECIAL.union(ElementFlags::SCOPING)),
    entry(0x046c6bd7, "link", None, DispatchGroup::Base, ElementFlags::SPECIAL),
    entry(0x046d61d9, "meta", None, DispatchGroup::Meta, ElementFlags::SPECIAL.union(ElementFlags::BREAKS_OUT)),
    entry(0x046d68d5, "math", None, DispatchGroup::Math, ElementFlags::empty()),
    entry(0x046d6bd3, "mark", None, DispatchGroup::Other, ElementFlags::empty()),
    entry(0x046d6eca, "main", None, DispatchGroup::Block, ElementFlags::SPECIAL),
    entry(0x046d75d3, "menu", None, DispatchGroup::Block, ElementFlags::SPECIAL.union(ElementFlags::BREAKS_OUT)),
    entry(0x046e72d1, "nobr", None, DispatchGroup::Nobr, ElementFlags::BREAKS_OUT),
    entry(0x047279d7, "ruby", None, DispatchGroup::Ruby, ElementFlags::BREAKS_OUT),
    entry(0x04736ed1, "span", None, DispatchGroup::Other, ElementFlags::BREAKS_OUT),
    entry(0x047370ce, "samp", None, DispatchGroup::Other, ElementFlags::empty()),
    entry(0x047465d6, "time", None, DispatchGroup::Other, ElementFlags::empty()),
    entry(0x056165dc, "aside", None, DispatchGroup::Block, ElementFlags::SPECIAL),
    entry(0x05616fd9, "audio", None, DispatchGroup::Other, ElementFlags::empty()),
    entry(0x056564cf, "embed", None, DispatchGroup::Void, ElementFlags::SPECIAL.union(ElementFlags::BREAKS_OUT)),
    entry(0x056665d3, "frame", None, DispatchGroup::Frame, ElementFlags::SPECIAL),
    entry(0x056965ce, "image", None, DispatchGroup::Image, ElementFlags::empty()),
    entry(0x056974de, "input", None, DispatchGroup::Input, ElementFlags::SPECIAL),
    entry(0x056c6cc3, "label", None, DispatchGroup::Other, ElementFlags::empty()),
    entry(0x056d74d9, "mtext", None, DispatchGroup::MathMlText, ElementFlags::SCOPING_AS_MATHML),
    entry(0x05706dd3, "param", None, DispatchGroup::Param, ElementFlags::SPECIAL),
    entry(0x057365ed, "style", None, DispatchGroup::Style, ElementFlags::SPECIAL),
    entry(0x05736cce, "small", None, DispatchGroup::Formatting, ElementFlags::BREAKS_OUT),
    entry(0x057464cd, "thead", None, DispatchGroup::TbodyGroup, ElementFlags::SPECIAL.union(ElementFlags::FOSTER_PARENTING)),
    entry(0x057465c3, "table", None, DispatchGroup::Table, ElementFlags::SPECIAL.union(ElementFlags::SCOPING).union(ElementFlags::FOSTER_PARENTING).union(ElementFlags::BREAKS_OUT)),
    entry(0x057465dd, "title", None, DispatchGroup::Title, ElementFlags::SPECIAL.union(ElementFlags::SCOPING_AS_SVG).union(ElementFlags::HTML_INTEGRATION_POINT)),
    entry(0x05746bd3, "track", None, DispatchGroup::Param, ElementFlags::SPECIAL),
    entry(0x057474d5, "tfoot", None, DispatchGroup::TbodyGroup, ElementFlags::SPECIAL.union(ElementFlags::FOSTER_PARENTING)),
    entry(0x057479d1, "tbody", None, DispatchGroup::TbodyGroup, ElementFlags::SPECIAL.union(ElementFlags::FOSTER_PARENTING)),
    entry(0x05766fcd, "video", None, DispatchGroup::Other, ElementFlags::empty()),
    entry(0x066174dc, "applet", None, DispatchGroup::Applet, ElementFlags::SPECIAL.union(ElementFlags::SCOPING)),
    entry(0x06626ee8, "button", None, DispatchGroup::Button, ElementFlags::SPECIAL),
    entry(0x066372e2, "center", None, DispatchGroup::Block, ElementFlags::SPECIAL.union(ElementFlags::BREAKS_OUT)),
    entry(0x066373e4, "canvas", None, DispatchGroup::Other, ElementFlags::empty()),
    entry(0x066467cd, "dialog", None, DispatchGroup::Block, ElementFlags::empty()),
    entry(0x066665dc, "figure", None, DispatchGroup::Block, ElementFlags::SPECIAL),
    entry(0x066665dd, "fetile", Some("feTile"), DispatchGroup::Other, ElementFlags::empty()),
    entry(0x066672e3, "footer", None, DispatchGroup::Block, ElementFlags::SPECIAL),
    entry(0x066870e1, "hgroup", None, DispatchGroup::Block, ElementFlags::SPECIAL),
    entry(0x066872c5, "header", None, DispatchGroup::Block, ElementFlags::SPECIAL),
    entry(0x066965d3, "iframe", None, DispatchGroup::Iframe, ElementFlags::SPECIAL),
    entry(0x066b6ee0, "keygen", None, DispatchGroup::Void, ElementFlags::SPECIAL),
    entry(0x066d68e5, "mglyph", None, DispatchGroup::Mglyph, ElementFlags::empty()),
    entry(0x066f6edd, "option", None, DispatchGroup::Option, ElementFlags::OPTIONAL_END_TAG),
    entry(0x066f74cf, "object", None, DispatchGroup::Applet, ElementFlags::SPECIAL.union(ElementFlags::SCOPING)),
    entry(0x066f74e4, "output", None, DispatchGroup::Other, ElementFlags::empty()),
    entry(0x067365db, "strike", None, DispatchGroup::Formatting, ElementFlags::BREAKS_OUT),
    entry(0x067365e7, "source", None, DispatchGroup::Param, ElementFlags::SPECIAL),
    entry(0x067367e1, "strong", None, DispatchGroup::Formatting, ElementFlags::BREAKS_OUT),
    entry(0x067368d3, "search", None, DispatchGroup::Block, ElementFlags::SPECIAL),
    entry(0x067374d1, "select", None, DispatchGroup::Select, ElementFlags::SPECIAL),
    entry(0x067374db, "script", None, DispatchGroup::Script, ElementFlags::SPECIAL),
    entry(0x076165dd, "article", None, DispatchGroup::Block, ElementFlags::SPECIAL),
    entry(0x076173d6, "address", None, DispatchGroup::Block, ElementFlags::SPECIAL),
    entry(0x076264e2, "bgsound", None, DispatchGroup::Base, ElementFlags::SPECIAL),
    entry(0x07636ee4, "caption", None, DispatchGroup::Caption, ElementFlags::SPECIAL.union(ElementFlags::SCOPING)),
    entry(0x076473d5, "details", None, DispatchGroup::Block, ElementFlags::SPECIAL),
    entry(0x076661db, "fefunca", Some("feFuncA"), DispatchGroup::Other, ElementFlags::empty()),
    entry(0x076662db, "fefuncb", Some("feFuncB"), DispatchGroup::Other, ElementFlags::empty()),
    entry(0x076664ce, "feblend", Some("feBlend"), DispatchGroup::Other, ElementFlags::empty()),
    entry(0x076664d2, "feflood", Some("feFlood"), DispatchGroup::Other, ElementFlags::empty()),
    entry(0x076665d2, "femerge", Some("feMerge"), DispatchGroup::Other, ElementFlags::empty()),
    entry(0x076665d6, "feimage", Some("feImage"), DispatchGroup::Other, ElementFlags::empty()),
    entry(0x076667db, "fefuncg", Some("feFuncG"), DispatchGroup::Other, ElementFlags::empty()),
    entry(0x076672db, "fefuncr", Some("feFuncR"), DispatchGroup::Other, ElementFlags::empty()),
    entry(0x076c67e7, "listing", None, DispatchGroup::Pre, ElementFlags::SPECIAL.union(ElementFlags::BREAKS_OUT)),
    entry(0x076d65e3, "marquee", None, DispatchGroup::Applet, ElementFlags::SPECIAL.union(ElementFlags::SCOPING)),
    entry(0x076e64d2, "noembed", None, DispatchGroup::Noembed, ElementFlags::SPECIAL),
    entry(0x077065d7, "picture", None, DispatchGroup::Other, ElementFlags::empty()),
    entry(0x07736ed7, "section", None, DispatchGroup::Block, ElementFlags::SPECIAL),
    entry(0x077379da, "summary", None, DispatchGroup::Block, ElementFlags::SPECIAL),
    entry(0x086168e0, "altglyph", Some("altGlyph"), DispatchGroup::Other, ElementFlags::empty()),
    entry(0x086274d9, "basefont", None, DispatchGroup::Base, ElementFlags::SPECIAL),
    entry(0x086368d9, "clippath", Some("clipPath"), DispatchGroup::Other, ElementFlags::empty()),
    entry(0x086370de, "colgroup", None, DispatchGroup::Colgroup, ElementFlags::SPECIAL),
    entry(0x086674c6, "frameset", None, DispatchGroup::Frameset, ElementFlags::SPECIAL),
    entry(0x086674c9, "fieldset", None, DispatchGroup::Block, ElementFlags::SPECIAL),
    entry(0x086674d5, "feoffset", Some("feOffset"), DispatchGroup::Other, ElementFlags::empty()),
    entry(0x086766e1, "glyphref", Some("glyphRef"), DispatchGroup::Other, ElementFlags::empty()),
    entry(0x086e73c7, "noframes", None, DispatchGroup::Noframes, ElementFlags::SPECIAL),
    entry(0x086e74e5, "noscript", None, DispatchGroup::Noscript, ElementFlags::SPECIAL),
    entry(0x086f70e6, "optgroup", None, DispatchGroup::Optgroup, ElementFlags::OPTIONAL_END_TAG),
    entry(0x087461d9, "textarea", None, DispatchGroup::Textarea, ElementFlags::SPECIAL),
    entry(0x087465d9, "template", None, DispatchGroup::Template, ElementFlags::SPECIAL.union(ElementFlags::SCOPING)),
    entry(0x087468e8, "textpath", Some("textPath"), DispatchGroup::Other, ElementFlags::empty()),
    entry(0x097074d7, "plaintext", None, DispatchGroup::Plaintext, ElementFlags::SPECIAL),
    entry(0x0a6265d4, "blockquote", None, DispatchGroup::Block, ElementFlags::SPECIAL.union(ElementFlags::BREAKS_OUT)),
    entry(0x0a666ed3, "figcaption", None, DispatchGroup::Block, ElementFlags::SPECIAL),
    entry(0x0a6d6bd7, "malignmark", None, DispatchGroup::Mglyph, ElementFlags::empty()),
    entry(0x0b6166e0, "altglyphdef", Some("altGlyphDef"), DispatchGroup::Other, ElementFlags::empty()),
    entry(0x0b6665cc, "femergenode", Some("feMergeNode"), DispatchGroup::Other, ElementFlags::empty()),
    entry(0x0b6665df, "fecomposite", Some("feComposite"), DispatchGroup::Other, ElementFlags::empty()),
    entry(0x0b6674e4, "fespotlight", Some("feSpotLight"), DispatchGroup::Other, ElementFlags::empty()),
    entry(0x0c616ddc, "altglyphitem", Some("altGlyphItem"), DispatchGroup::Other, ElementFlags::empty()),
    entry(0x0c6172c6, "animatecolor", Some("animateColor"), DispatchGroup::Other, ElementFlags::empty()),
    entry(0x0c6665e7, "feturbulence", Some("feTurbulence"), DispatchGroup::Other, ElementFlags::empty()),
    entry(0x0c6674dd, "fepointlight", Some("fePointLight"), DispatchGroup::Other, ElementFlags::empty()),
    entry(0x0c6677e2, "fedropshadow", Some("feDropShadow"), DispatchGroup::Other, ElementFlags::empty()),
    entry(0x0c6679da, "femorphology", Some("feMorphology"), DispatchGroup::Other, ElementFlags::empty()),
    entry(0x0d616ec6, "animatemotion", Some("animateMotion"), DispatchGroup::Other, ElementFlags::empty()),
    entry(0x0d6674d7, "foreignobject", Some("foreignObject"), DispatchGroup::Other, ElementFlags::SCOPING_AS_SVG.union(ElementFlags::HTML_INTEGRATION_POINT)),
    entry(0x0d6678de, "fecolormatrix", Some("feColorMatrix"), DispatchGroup::Other, ElementFlags::empty()),
    entry(0x0e616cdd, "annotation-xml", None, DispatchGroup::AnnotationXml, ElementFlags::SCOPING_AS_MATHML),
    entry(0x0e6672de, "fegaussianblur", Some("feGaussianBlur"), DispatchGroup::Other, ElementFlags::empty()),
    entry(0x0e6674e1, "fedistantlight", Some("feDistantLight"), DispatchGroup::Other, ElementFlags::empty()),
    entry(0x0e6c74d3, "lineargradient", Some("linearGradient"), DispatchGroup::Other, ElementFlags::empty()),
    entry(0x0e7274d3, "radialgradient", Some("radialGradient"), DispatchGroup::Other, ElementFlags::empty()),
    entry(0x10616de6, "animatetransform", Some("animateTransform"), DispatchGroup::Other, ElementFlags::empty()),
    entry(0x106678ec, "feconvolvematrix", Some("feConvolveMatrix"), DispatchGroup::Other, ElementFlags::empty()),
    entry(0x116667cb, "fediffuselighting", Some("feDiffuseLighting"), DispatchGroup::Other, ElementFlags::empty()),
    entry(0x116670d3, "fedisplacementmap", Some("feDisplacementMap"), DispatchGroup::Other, ElementFlags::empty()),
    entry(0x126667e7, "fespecularlighting", Some("feSpecularLighting"), DispatchGroup::Other, ElementFlags::empty()),
    entry(0x136672dd, "fecomponenttransfer", Some("feComponentTransfer"), DispatchGroup::Other, ElementFlags::empty()),
];

const ELEMENT_COUNT: usize = 178;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted_without_collisions() {
        for pair in ELEMENTS.windows(2) {
            assert!(
                pair[0].hash < pair[1].hash,
                "{} and {} are out of order or collide",
                pair[0].name,
                pair[1].name
            );
        }
        for e in &ELEMENTS {
            assert_eq!(e.hash, name_hash(e.name.as_bytes()), "{}", e.name);
        }
    }

    #[test]
    fn every_known_name_round_trips() {
        for e in &ELEMENTS {
            let name = ElementName::classify(e.name);
            assert!(name.is_known(), "{}", e.name);
            assert_eq!(name.name(), e.name);
            assert_eq!(name.group(), e.group);
        }
    }

    #[test]
    fn classification_is_stable() {
        let a = ElementName::classify("table");
        let b = ElementName::classify("table");
        assert_eq!(a, b);
        assert_eq!(a.group(), DispatchGroup::Table);
        assert!(a.flags().contains(ElementFlags::FOSTER_PARENTING | ElementFlags::SCOPING));
        assert_ne!(a, ElementName::classify("title"));
    }

    #[test]
    fn unknown_names_are_custom() {
        let name = ElementName::classify("my-widget");
        assert!(!name.is_known());
        assert_eq!(name.group(), DispatchGroup::Other);
        assert_eq!(name.flags(), ElementFlags::CUSTOM);
        assert_eq!(name, ElementName::classify("my-widget"));
        assert_ne!(name, ElementName::classify("my-widgets"));
    }

    #[test]
    fn svg_names_are_camel_cased() {
        assert_eq!(ElementName::classify("foreignobject").camel_case_name(), "foreignObject");
        assert_eq!(ElementName::classify("lineargradient").camel_case_name(), "linearGradient");
        assert_eq!(ElementName::classify("div").camel_case_name(), "div");
    }

    #[test]
    fn breakout_names() {
        assert!(ElementName::classify("b").breaks_out_of_foreign_content());
        assert!(ElementName::classify("span").breaks_out_of_foreign_content());
        assert!(!ElementName::classify("font").breaks_out_of_foreign_content());
        assert!(!ElementName::classify("path").breaks_out_of_foreign_content());
    }

    #[test]
    fn breakout_is_per_name_within_a_group() {
        for name in ["blockquote", "center", "div", "dl", "menu", "embed", "img", "listing", "sub", "var"] {
            let name = ElementName::classify(name);
            assert!(name.flags().contains(ElementFlags::BREAKS_OUT), "{name}");
        }
        // Same dispatch groups, but not breakout names.
        for name in ["article", "section", "area", "wbr", "q", "abbr"] {
            assert!(!ElementName::classify(name).breaks_out_of_foreign_content(), "{name}");
        }
    }
}
