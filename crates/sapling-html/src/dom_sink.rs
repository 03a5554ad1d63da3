//! A [`TreeSink`] that builds a [`sapling_dom::DomTree`].

use sapling_dom::{AttributeData, DoctypeData, DocumentMode, DomTree, ElementData, NodeId, NodeType};

use crate::names::{ElementName, Namespace};
use crate::parser::TreeSink;
use crate::tokenizer::{Attribute, Attributes};

/// Builds an arena [`DomTree`].
///
/// Template contents are stored as the `template` element's children.
#[derive(Debug, Default)]
pub struct DomSink {
    tree: DomTree,
    declared_charset: Option<String>,
    suspend_on_charset: bool,
}

impl DomSink {
    /// A sink over an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the parser to suspend when a `meta` element declares an encoding,
    /// so the host can decide whether to restart with another decoder.
    #[must_use]
    pub const fn with_charset_suspension(mut self) -> Self {
        self.suspend_on_charset = true;
        self
    }

    /// The document built so far.
    #[must_use]
    pub const fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Give back the document.
    #[must_use]
    pub fn into_tree(self) -> DomTree {
        self.tree
    }

    /// [§ 13.4 Parsing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#parsing-html-fragments)
    ///
    /// Give back a fragment parse's result: "root's children, in tree order",
    /// moved onto the document node.
    #[must_use]
    pub fn into_fragment(self) -> DomTree {
        let mut tree = self.tree;
        if let Some(root) = tree.document_element() {
            tree.move_children(root, NodeId::ROOT);
            tree.detach(root);
        }
        tree
    }

    /// The first encoding a `meta` element declared, if any.
    #[must_use]
    pub fn declared_charset(&self) -> Option<&str> {
        self.declared_charset.as_deref()
    }
}

/// [§ 13.2.6.3](https://html.spec.whatwg.org/multipage/parsing.html#adjust-foreign-attributes)
///
/// The attribute as it lands on an element in `element_ns`: case-restored for
/// SVG and MathML, and namespaced for `xlink:*`, `xml:*` and `xmlns`.
fn attribute_data(attribute: &Attribute, element_ns: Namespace) -> AttributeData {
    AttributeData {
        namespace: attribute.name.namespace(element_ns),
        prefix: attribute.name.prefix(element_ns).map(str::to_string),
        local_name: attribute.name.local_name(element_ns).to_string(),
        value: attribute.value.clone(),
    }
}

impl TreeSink for DomSink {
    type Handle = NodeId;

    fn create_element(
        &mut self,
        namespace: Namespace,
        name: &ElementName,
        attributes: &Attributes,
        _form: Option<&NodeId>,
    ) -> NodeId {
        let tag_name = match namespace {
            Namespace::Svg => name.camel_case_name(),
            _ => name.name(),
        };
        let mut element = ElementData::new(namespace, tag_name);
        element.attrs = attributes
            .iter()
            .map(|attribute| attribute_data(attribute, namespace))
            .collect();
        self.tree.alloc(NodeType::Element(element))
    }

    fn create_html_element_set_as_root(&mut self, attributes: &Attributes) -> NodeId {
        let html = self.create_element(
            Namespace::Html,
            &ElementName::classify("html"),
            attributes,
            None,
        );
        self.tree.append_child(NodeId::ROOT, html);
        html
    }

    fn append_element(&mut self, child: &NodeId, parent: &NodeId) {
        self.tree.append_child(*parent, *child);
    }

    fn append_children_to_new_parent(&mut self, old_parent: &NodeId, new_parent: &NodeId) {
        self.tree.move_children(*old_parent, *new_parent);
    }

    fn detach_from_parent(&mut self, element: &NodeId) {
        self.tree.detach(*element);
    }

    fn insert_foster_parented_child(&mut self, child: &NodeId, table: &NodeId, stack_parent: &NodeId) {
        match self.tree.parent(*table) {
            Some(parent) => self.tree.insert_before(parent, *child, *table),
            None => self.tree.append_child(*stack_parent, *child),
        }
    }

    fn insert_foster_parented_characters(&mut self, text: &str, table: &NodeId, stack_parent: &NodeId) {
        match self.tree.parent(*table) {
            Some(parent) => self.tree.insert_text_before(parent, text, *table),
            None => self.tree.append_text(*stack_parent, text),
        }
    }

    fn append_characters(&mut self, parent: &NodeId, text: &str) {
        self.tree.append_text(*parent, text);
    }

    fn append_comment(&mut self, parent: &NodeId, text: &str) {
        let comment = self.tree.alloc(NodeType::Comment(text.to_string()));
        self.tree.append_child(*parent, comment);
    }

    fn append_comment_to_document(&mut self, text: &str) {
        self.append_comment(&NodeId::ROOT, text);
    }

    fn add_attributes_to_element(&mut self, element: &NodeId, attributes: &Attributes) {
        let Some(data) = self.tree.as_element_mut(*element) else {
            return;
        };
        let namespace = data.namespace;
        for attribute in attributes {
            let adjusted = attribute_data(attribute, namespace);
            let present = data.attrs.iter().any(|existing| {
                existing.namespace == adjusted.namespace && existing.local_name == adjusted.local_name
            });
            if !present {
                data.attrs.push(adjusted);
            }
        }
    }

    fn append_doctype_to_document(&mut self, name: &str, public_id: &str, system_id: &str) {
        let doctype = self.tree.alloc(NodeType::Doctype(DoctypeData {
            name: name.to_string(),
            public_id: public_id.to_string(),
            system_id: system_id.to_string(),
        }));
        self.tree.append_child(NodeId::ROOT, doctype);
    }

    fn set_document_mode(&mut self, mode: DocumentMode) {
        self.tree.set_document_mode(mode);
    }

    fn internal_encoding_declaration(&mut self, charset: &str) -> bool {
        log::debug!("dom sink: document declares charset {charset}");
        if self.declared_charset.is_none() {
            self.declared_charset = Some(charset.to_string());
        }
        self.suspend_on_charset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attributes(pairs: &[(&str, &str)]) -> Attributes {
        pairs
            .iter()
            .map(|&(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn svg_names_and_attributes_are_adjusted() {
        let mut sink = DomSink::new();
        let node = sink.create_element(
            Namespace::Svg,
            &ElementName::classify("foreignobject"),
            &attributes(&[("viewbox", "0 0 1 1"), ("xlink:href", "#a")]),
            None,
        );
        let element = sink.tree().as_element(node).unwrap();
        assert_eq!(element.tag_name, "foreignObject");
        assert_eq!(element.attrs[0].local_name, "viewBox");
        assert_eq!(element.attrs[1].local_name, "href");
        assert_eq!(element.attrs[1].prefix.as_deref(), Some("xlink"));
        assert_eq!(element.attrs[1].namespace, Some(Namespace::XLink));
    }

    #[test]
    fn merged_attributes_keep_existing_values() {
        let mut sink = DomSink::new();
        let html = sink.create_html_element_set_as_root(&attributes(&[("lang", "en")]));
        sink.add_attributes_to_element(&html, &attributes(&[("lang", "fr"), ("dir", "rtl")]));
        let element = sink.tree().as_element(html).unwrap();
        assert_eq!(element.attr("lang"), Some("en"));
        assert_eq!(element.attr("dir"), Some("rtl"));
    }

    #[test]
    fn foster_parenting_without_table_parent_appends_to_stack_parent() {
        let mut sink = DomSink::new();
        let html = sink.create_html_element_set_as_root(&Attributes::empty());
        let table = sink.create_element(
            Namespace::Html,
            &ElementName::classify("table"),
            &Attributes::empty(),
            None,
        );
        sink.insert_foster_parented_characters("a", &table, &html);
        assert_eq!(sink.tree().text_content(html), "a");

        sink.append_element(&table, &html);
        sink.insert_foster_parented_characters("b", &table, &html);
        assert_eq!(sink.tree().to_test_format(), "| <html>\n|   \"ab\"\n|   <table>\n");
    }
}
