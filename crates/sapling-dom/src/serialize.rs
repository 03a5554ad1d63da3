//! Nested serde view of the arena tree.
//!
//! The arena itself is flat, so serialization walks it from the document and
//! emits each node with its children inline.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::{AttributeData, DomTree, NodeId, NodeType};

struct NodeView<'a> {
    tree: &'a DomTree,
    id: NodeId,
}

struct ChildrenView<'a> {
    tree: &'a DomTree,
    id: NodeId,
}

struct AttrView<'a>(&'a AttributeData);

impl Serialize for DomTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        NodeView {
            tree: self,
            id: NodeId::ROOT,
        }
        .serialize(serializer)
    }
}

impl Serialize for NodeView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        let Some(node) = self.tree.get(self.id) else {
            return map.end();
        };
        match &node.node_type {
            NodeType::Document => {
                map.serialize_entry("type", "document")?;
            }
            NodeType::Doctype(doctype) => {
                map.serialize_entry("type", "doctype")?;
                map.serialize_entry("name", &doctype.name)?;
                map.serialize_entry("public_id", &doctype.public_id)?;
                map.serialize_entry("system_id", &doctype.system_id)?;
            }
            NodeType::Element(element) => {
                map.serialize_entry("type", "element")?;
                map.serialize_entry("namespace", element.namespace.uri())?;
                map.serialize_entry("tag", &element.tag_name)?;
                let attrs: Vec<AttrView<'_>> = element.attrs.iter().map(AttrView).collect();
                map.serialize_entry("attrs", &attrs)?;
            }
            NodeType::Text(data) => {
                map.serialize_entry("type", "text")?;
                map.serialize_entry("text", data)?;
            }
            NodeType::Comment(data) => {
                map.serialize_entry("type", "comment")?;
                map.serialize_entry("data", data)?;
            }
        }
        if !node.children.is_empty() {
            map.serialize_entry(
                "children",
                &ChildrenView {
                    tree: self.tree,
                    id: self.id,
                },
            )?;
        }
        map.end()
    }
}

impl Serialize for ChildrenView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let children = self.tree.children(self.id);
        let mut seq = serializer.serialize_seq(Some(children.len()))?;
        for &child in children {
            seq.serialize_element(&NodeView {
                tree: self.tree,
                id: child,
            })?;
        }
        seq.end()
    }
}

impl Serialize for AttrView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("name", &self.0.local_name)?;
        if let Some(ns) = self.0.namespace {
            map.serialize_entry("namespace", ns.uri())?;
        }
        if let Some(prefix) = &self.0.prefix {
            map.serialize_entry("prefix", prefix)?;
        }
        map.serialize_entry("value", &self.0.value)?;
        map.end()
    }
}
