//! Indented tree dump in the format used by the html5lib tree-construction
//! test suite.

use std::fmt::Write;

use crate::{DomTree, Namespace, NodeId, NodeType};

impl DomTree {
    /// Render the children of `from` one node per line, each prefixed by
    /// `"| "` and two spaces of indentation per depth level.
    ///
    /// ```text
    /// | <!DOCTYPE html>
    /// | <html>
    /// |   <head>
    /// |   <body>
    /// |     class="x"
    /// |     "hello"
    /// ```
    ///
    /// Attributes are listed sorted by their displayed name. Foreign elements
    /// carry their namespace prefix (`<svg path>`, `<math mi>`).
    #[must_use]
    pub fn to_test_format_from(&self, from: NodeId) -> String {
        let mut out = String::new();
        for &child in self.children(from) {
            self.dump_node(child, 0, &mut out);
        }
        out
    }

    /// [`Self::to_test_format_from`] starting at the document.
    #[must_use]
    pub fn to_test_format(&self) -> String {
        self.to_test_format_from(NodeId::ROOT)
    }

    fn dump_node(&self, id: NodeId, depth: usize, out: &mut String) {
        let Some(node) = self.get(id) else {
            return;
        };
        let indent = "  ".repeat(depth);
        match &node.node_type {
            NodeType::Document => {}
            NodeType::Doctype(doctype) => {
                if doctype.public_id.is_empty() && doctype.system_id.is_empty() {
                    let _ = writeln!(out, "| {indent}<!DOCTYPE {}>", doctype.name);
                } else {
                    let _ = writeln!(
                        out,
                        "| {indent}<!DOCTYPE {} \"{}\" \"{}\">",
                        doctype.name, doctype.public_id, doctype.system_id
                    );
                }
            }
            NodeType::Text(data) => {
                let _ = writeln!(out, "| {indent}\"{data}\"");
            }
            NodeType::Comment(data) => {
                let _ = writeln!(out, "| {indent}<!-- {data} -->");
            }
            NodeType::Element(element) => {
                if element.namespace == Namespace::Html {
                    let _ = writeln!(out, "| {indent}<{}>", element.tag_name);
                } else {
                    let _ = writeln!(
                        out,
                        "| {indent}<{} {}>",
                        element.namespace.test_prefix(),
                        element.tag_name
                    );
                }
                let mut attrs: Vec<(String, &str)> = element
                    .attrs
                    .iter()
                    .map(|a| {
                        let shown = match a.namespace {
                            Some(ns) => format!("{} {}", ns.test_prefix(), a.local_name),
                            None => a.local_name.clone(),
                        };
                        (shown, a.value.as_str())
                    })
                    .collect();
                attrs.sort_by(|a, b| a.0.cmp(&b.0));
                let attr_indent = "  ".repeat(depth + 1);
                for (name, value) in attrs {
                    let _ = writeln!(out, "| {attr_indent}{name}=\"{value}\"");
                }
            }
        }
        for &child in &node.children {
            self.dump_node(child, depth + 1, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{AttributeData, DoctypeData, DomTree, ElementData, Namespace, NodeType};

    #[test]
    fn dump_nests_and_sorts_attributes() {
        let mut tree = DomTree::new();
        let doctype = tree.alloc(NodeType::Doctype(DoctypeData {
            name: "html".to_string(),
            ..DoctypeData::default()
        }));
        tree.append_child(tree.root(), doctype);

        let mut html = ElementData::new(Namespace::Html, "html");
        html.attrs.push(AttributeData::new("lang", "en"));
        html.attrs.push(AttributeData::new("dir", "ltr"));
        let html = tree.alloc(NodeType::Element(html));
        tree.append_child(tree.root(), html);

        let svg = tree.alloc(NodeType::Element(ElementData::new(Namespace::Svg, "svg")));
        tree.append_child(html, svg);
        tree.append_text(svg, "a");
        tree.append_text(svg, "b");

        let expected = "\
| <!DOCTYPE html>
| <html>
|   dir=\"ltr\"
|   lang=\"en\"
|   <svg svg>
|     \"ab\"
";
        assert_eq!(tree.to_test_format(), expected);
    }

    #[test]
    fn doctype_with_identifiers_is_quoted() {
        let mut tree = DomTree::new();
        let doctype = tree.alloc(NodeType::Doctype(DoctypeData {
            name: "html".to_string(),
            public_id: "-//W3C//DTD HTML 4.01//EN".to_string(),
            system_id: String::new(),
        }));
        tree.append_child(tree.root(), doctype);
        assert_eq!(
            tree.to_test_format(),
            "| <!DOCTYPE html \"-//W3C//DTD HTML 4.01//EN\" \"\">\n"
        );
    }
}
