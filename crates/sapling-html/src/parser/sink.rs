//! The interface between the tree builder and the document it builds.
//!
//! [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
//!
//! The tree builder never looks inside the document. Everything it needs to
//! know about nodes it keeps itself (names, namespaces, attributes of
//! formatting elements), so a sink only has to perform the mutations below.

use crate::names::{DocumentMode, ElementName, Namespace};
use crate::tokenizer::Attributes;

/// Receives the document as the tree builder constructs it.
///
/// Handles are opaque to the parser and only compared with `==`, so they
/// should be cheap to clone (an index or a reference-counted pointer).
pub trait TreeSink {
    /// A reference to a node in the document being built.
    type Handle: Clone + PartialEq;

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#create-an-element-for-the-token)
    /// "Create an element for a token".
    ///
    /// SVG elements take [`ElementName::camel_case_name`]; attribute names
    /// should be adjusted for `namespace` through
    /// [`AttributeName::local_name`](crate::AttributeName::local_name) and its
    /// siblings. `form` is the form element pointer when the element is
    /// form-associated.
    fn create_element(
        &mut self,
        namespace: Namespace,
        name: &ElementName,
        attributes: &Attributes,
        form: Option<&Self::Handle>,
    ) -> Self::Handle;

    /// Create the `html` element and make it the document element.
    fn create_html_element_set_as_root(&mut self, attributes: &Attributes) -> Self::Handle;

    /// Append `child` as the last child of `parent`, moving it if it already
    /// has a parent.
    fn append_element(&mut self, child: &Self::Handle, parent: &Self::Handle);

    /// Move all children of `old_parent` to the end of `new_parent`.
    fn append_children_to_new_parent(&mut self, old_parent: &Self::Handle, new_parent: &Self::Handle);

    /// Remove `element` from its parent, if it has one.
    fn detach_from_parent(&mut self, element: &Self::Handle);

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#foster-parent)
    ///
    /// "If last table has a parent node, then let adjusted insertion location
    /// be inside last table's parent node, immediately before last table ...
    /// Let previous element be the element immediately above last table in the
    /// stack of open elements, and let adjusted insertion location be inside
    /// previous element, after its last child (if any)."
    fn insert_foster_parented_child(
        &mut self,
        child: &Self::Handle,
        table: &Self::Handle,
        stack_parent: &Self::Handle,
    );

    /// The text counterpart of
    /// [`insert_foster_parented_child`](Self::insert_foster_parented_child).
    fn insert_foster_parented_characters(
        &mut self,
        text: &str,
        table: &Self::Handle,
        stack_parent: &Self::Handle,
    );

    /// Append text to `parent`, merging with a trailing text node.
    fn append_characters(&mut self, parent: &Self::Handle, text: &str);

    /// Append a comment to `parent`.
    fn append_comment(&mut self, parent: &Self::Handle, text: &str);

    /// Append a comment to the document itself.
    fn append_comment_to_document(&mut self, text: &str);

    /// "For each attribute on the token, check to see if the attribute is
    /// already present on the top element of the stack of open elements. If it
    /// is not, add the attribute and its corresponding value to that element."
    fn add_attributes_to_element(&mut self, element: &Self::Handle, attributes: &Attributes);

    /// An element was pushed onto the stack of open elements.
    fn element_pushed(&mut self, _element: &Self::Handle) {}

    /// An element was popped off the stack of open elements.
    fn element_popped(&mut self, _element: &Self::Handle) {}

    /// "Append a `DocumentType` node to the Document node". Missing identifiers
    /// are passed as empty strings.
    fn append_doctype_to_document(&mut self, name: &str, public_id: &str, system_id: &str);

    /// The document's quirks mode was decided.
    fn set_document_mode(&mut self, _mode: DocumentMode) {}

    /// [§ 13.2.6.4.4](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    ///
    /// A `meta` element declared the document's character encoding. Returning
    /// `true` suspends the parser right after the `meta` tag so the host can
    /// restart decoding.
    fn internal_encoding_declaration(&mut self, _charset: &str) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FeedStatus, Parser, ParserOptions};

    /// Numbers elements and ignores every optional hook.
    #[derive(Default)]
    struct CountingSink {
        elements: usize,
    }

    impl TreeSink for CountingSink {
        type Handle = usize;

        fn create_element(
            &mut self,
            _namespace: Namespace,
            _name: &ElementName,
            _attributes: &Attributes,
            _form: Option<&usize>,
        ) -> usize {
            self.elements += 1;
            self.elements
        }

        fn create_html_element_set_as_root(&mut self, _attributes: &Attributes) -> usize {
            self.elements += 1;
            self.elements
        }

        fn append_element(&mut self, _child: &usize, _parent: &usize) {}

        fn append_children_to_new_parent(&mut self, _old_parent: &usize, _new_parent: &usize) {}

        fn detach_from_parent(&mut self, _element: &usize) {}

        fn insert_foster_parented_child(
            &mut self,
            _child: &usize,
            _table: &usize,
            _stack_parent: &usize,
        ) {
        }

        fn insert_foster_parented_characters(
            &mut self,
            _text: &str,
            _table: &usize,
            _stack_parent: &usize,
        ) {
        }

        fn append_characters(&mut self, _parent: &usize, _text: &str) {}

        fn append_comment(&mut self, _parent: &usize, _text: &str) {}

        fn append_comment_to_document(&mut self, _text: &str) {}

        fn add_attributes_to_element(&mut self, _element: &usize, _attributes: &Attributes) {}

        fn append_doctype_to_document(
            &mut self,
            _name: &str,
            _public_id: &str,
            _system_id: &str,
        ) {
        }
    }

    #[test]
    fn default_hooks_never_suspend() {
        let mut parser = Parser::new(CountingSink::default(), ParserOptions::new());
        let status = parser.feed("<!DOCTYPE html><meta charset=windows-1252><p>x").unwrap();
        assert_eq!(status, FeedStatus::Done);
        // html, head, meta, body, p
        assert_eq!(parser.finish().unwrap().elements, 5);
    }
}
