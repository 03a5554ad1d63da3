//! The stack of open elements and the list of active formatting elements.
//!
//! [§ 13.2.4.3 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)
//!
//! An element can be on the stack and in the formatting list at the same time.
//! Both hold an [`Rc`](std::rc::Rc) to the same [`StackNode`], so the node
//! (and the sink handle inside it) lives until the last membership ends, and
//! identity checks are pointer comparisons.

use std::rc::Rc;

use crate::names::{DispatchGroup, ElementFlags, ElementName, Namespace};
use crate::tokenizer::Attributes;

/// An element the tree builder is tracking.
#[derive(Debug)]
pub struct StackNode<H> {
    /// Local name as classified from the start tag.
    pub name: ElementName,
    /// The element's namespace.
    pub namespace: Namespace,
    /// The sink's reference to the element.
    pub handle: H,
    /// The attributes of the token the element was created for. Formatting
    /// elements are recreated from them.
    pub attributes: Attributes,
    flags: ElementFlags,
}

impl<H> StackNode<H> {
    /// Track an element, resolving its category bits for its namespace.
    #[must_use]
    pub fn new(name: ElementName, namespace: Namespace, handle: H, attributes: Attributes) -> Self {
        let raw = name.flags();
        let flags = match namespace {
            Namespace::Html => {
                raw & (ElementFlags::SPECIAL
                    | ElementFlags::SCOPING
                    | ElementFlags::FOSTER_PARENTING
                    | ElementFlags::OPTIONAL_END_TAG)
            }
            Namespace::Svg => {
                let mut flags = ElementFlags::empty();
                if raw.contains(ElementFlags::SCOPING_AS_SVG) {
                    flags |= ElementFlags::SCOPING | ElementFlags::SPECIAL;
                }
                if raw.contains(ElementFlags::HTML_INTEGRATION_POINT) {
                    flags |= ElementFlags::HTML_INTEGRATION_POINT;
                }
                flags
            }
            Namespace::MathMl => {
                let mut flags = ElementFlags::empty();
                if raw.contains(ElementFlags::SCOPING_AS_MATHML) {
                    flags |= ElementFlags::SCOPING | ElementFlags::SPECIAL;
                }
                // "A MathML annotation-xml element whose start tag token had an
                // attribute with the name "encoding" whose value was an ASCII
                // case-insensitive match for the string "text/html" ... or
                // "application/xhtml+xml""
                if name.group() == DispatchGroup::AnnotationXml
                    && attributes.get("encoding").is_some_and(|encoding| {
                        encoding.eq_ignore_ascii_case("text/html")
                            || encoding.eq_ignore_ascii_case("application/xhtml+xml")
                    })
                {
                    flags |= ElementFlags::HTML_INTEGRATION_POINT;
                }
                flags
            }
            _ => ElementFlags::empty(),
        };
        Self {
            name,
            namespace,
            handle,
            attributes,
            flags,
        }
    }

    /// An HTML element in `group`.
    #[must_use]
    pub fn is(&self, group: DispatchGroup) -> bool {
        self.namespace == Namespace::Html && self.name.group() == group
    }

    /// An HTML element called `name`.
    #[must_use]
    pub fn is_named(&self, name: &ElementName) -> bool {
        self.namespace == Namespace::Html && &self.name == name
    }

    /// Whether the element is in the HTML namespace.
    #[must_use]
    pub fn is_html(&self) -> bool {
        self.namespace == Namespace::Html
    }

    /// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#special)
    /// "the special category"
    #[must_use]
    pub const fn is_special(&self) -> bool {
        self.flags.contains(ElementFlags::SPECIAL)
    }

    /// Bounds the generic scope walk.
    #[must_use]
    pub const fn is_scoping(&self) -> bool {
        self.flags.contains(ElementFlags::SCOPING)
    }

    /// `table`, `tbody`, `tfoot`, `thead` or `tr`.
    #[must_use]
    pub const fn is_foster_parenting(&self) -> bool {
        self.flags.contains(ElementFlags::FOSTER_PARENTING)
    }

    /// Popped by "generate implied end tags".
    #[must_use]
    pub const fn has_optional_end_tag(&self) -> bool {
        self.flags.contains(ElementFlags::OPTIONAL_END_TAG)
    }

    /// [§ 13.2.6](https://html.spec.whatwg.org/multipage/parsing.html#html-integration-point)
    #[must_use]
    pub const fn is_html_integration_point(&self) -> bool {
        self.flags.contains(ElementFlags::HTML_INTEGRATION_POINT)
    }

    /// [§ 13.2.6](https://html.spec.whatwg.org/multipage/parsing.html#mathml-text-integration-point)
    /// "A MathML mi element, A MathML mo element, A MathML mn element, A MathML
    /// ms element, A MathML mtext element"
    #[must_use]
    pub fn is_mathml_text_integration_point(&self) -> bool {
        self.namespace == Namespace::MathMl && self.name.group() == DispatchGroup::MathMlText
    }

    /// "same tag name, namespace, and attributes", attributes compared as
    /// sets.
    #[must_use]
    pub fn same_token_as(&self, other: &Self) -> bool {
        self.name == other.name
            && self.namespace == other.namespace
            && self.attributes.len() == other.attributes.len()
            && self
                .attributes
                .iter()
                .all(|a| other.attributes.get(a.name.name()) == Some(a.value.as_str()))
    }
}

/// [§ 13.2.4.3 The list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#the-list-of-active-formatting-elements)
#[derive(Debug)]
pub enum FormattingEntry<H> {
    /// "A marker is an entry in the list of active formatting elements that is
    /// distinct from any element"
    Marker,
    /// A formatting element, shared with the stack while it is open.
    Element(Rc<StackNode<H>>),
}

impl<H> Clone for FormattingEntry<H> {
    fn clone(&self) -> Self {
        match self {
            Self::Marker => Self::Marker,
            Self::Element(node) => Self::Element(Rc::clone(node)),
        }
    }
}

impl<H> FormattingEntry<H> {
    /// The element, unless this is a marker.
    #[must_use]
    pub const fn element(&self) -> Option<&Rc<StackNode<H>>> {
        match self {
            Self::Marker => None,
            Self::Element(node) => Some(node),
        }
    }
}

/// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-the-specific-scope)
///
/// The variants of "has an element in the specific scope", which differ only
/// in which elements stop the walk down the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// "has an element in scope"
    Default,
    /// "has an element in list item scope": also `ol` and `ul`.
    ListItem,
    /// "has an element in button scope": also `button`.
    Button,
    /// "has an element in table scope": only `html`, `table` and `template`.
    Table,
    /// "has an element in select scope": everything except `optgroup` and
    /// `option`.
    Select,
}

impl ScopeKind {
    /// Whether `node` ends the walk.
    #[must_use]
    pub fn is_boundary<H>(self, node: &StackNode<H>) -> bool {
        match self {
            Self::Default => node.is_scoping(),
            Self::ListItem => node.is_scoping() || node.is(DispatchGroup::List),
            Self::Button => node.is_scoping() || node.is(DispatchGroup::Button),
            Self::Table => {
                node.is(DispatchGroup::Html)
                    || node.is(DispatchGroup::Table)
                    || node.is(DispatchGroup::Template)
            }
            Self::Select => !(node.is(DispatchGroup::Optgroup) || node.is(DispatchGroup::Option)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(name: &str, namespace: Namespace) -> StackNode<u32> {
        StackNode::new(ElementName::classify(name), namespace, 0, Attributes::empty())
    }

    #[test]
    fn flags_depend_on_namespace() {
        assert!(node("title", Namespace::Html).is_special());
        assert!(!node("title", Namespace::Html).is_scoping());
        assert!(node("title", Namespace::Svg).is_scoping());
        assert!(node("title", Namespace::Svg).is_html_integration_point());
        assert!(!node("table", Namespace::Svg).is_foster_parenting());
        assert!(node("mi", Namespace::MathMl).is_mathml_text_integration_point());
        assert!(!node("mi", Namespace::Html).is_mathml_text_integration_point());
    }

    #[test]
    fn annotation_xml_integration_point_needs_encoding() {
        let plain = node("annotation-xml", Namespace::MathMl);
        assert!(!plain.is_html_integration_point());
        let attrs: Attributes = [("encoding".to_string(), "Text/HTML".to_string())]
            .into_iter()
            .collect();
        let html = StackNode::new(
            ElementName::classify("annotation-xml"),
            Namespace::MathMl,
            0,
            attrs,
        );
        assert!(html.is_html_integration_point());
    }

    #[test]
    fn scope_boundaries() {
        assert!(ScopeKind::Button.is_boundary(&node("button", Namespace::Html)));
        assert!(!ScopeKind::Default.is_boundary(&node("button", Namespace::Html)));
        assert!(ScopeKind::ListItem.is_boundary(&node("ul", Namespace::Html)));
        assert!(!ScopeKind::Table.is_boundary(&node("td", Namespace::Html)));
        assert!(!ScopeKind::Select.is_boundary(&node("option", Namespace::Html)));
        assert!(ScopeKind::Select.is_boundary(&node("div", Namespace::Html)));
    }

    #[test]
    fn same_token_ignores_attribute_order() {
        let a: Attributes = [("x", "1"), ("y", "2")]
            .into_iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect();
        let b: Attributes = [("y", "2"), ("x", "1")]
            .into_iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect();
        let first = StackNode::new(ElementName::classify("b"), Namespace::Html, 0, a);
        let second = StackNode::new(ElementName::classify("b"), Namespace::Html, 1, b);
        assert!(first.same_token_as(&second));
    }
}
