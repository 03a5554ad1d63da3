//! Tests for the tree mutations the parser relies on: reparenting appends,
//! insertion before a reference node, text merging and child moves.

use sapling_dom::{DomTree, ElementData, Namespace, NodeId, NodeType};

fn html_element(tree: &mut DomTree, tag: &str) -> NodeId {
    tree.alloc(NodeType::Element(ElementData::new(Namespace::Html, tag)))
}

/// Builds `parent` under the document with children named by `tags`.
fn parent_with(tree: &mut DomTree, tags: &[&str]) -> (NodeId, Vec<NodeId>) {
    let parent = html_element(tree, "div");
    tree.append_child(NodeId::ROOT, parent);
    let kids = tags
        .iter()
        .map(|tag| {
            let id = html_element(tree, tag);
            tree.append_child(parent, id);
            id
        })
        .collect();
    (parent, kids)
}

// ========== remove_child ==========

#[test]
fn test_remove_child_relinks_neighbours() {
    let mut tree = DomTree::new();
    let (parent, kids) = parent_with(&mut tree, &["a", "b", "c"]);

    tree.remove_child(parent, kids[1]);

    assert_eq!(tree.children(parent), &[kids[0], kids[2]]);
    assert_eq!(tree.next_sibling(kids[0]), Some(kids[2]));
    assert_eq!(tree.prev_sibling(kids[2]), Some(kids[0]));
    assert_eq!(tree.parent(kids[1]), None);
    assert_eq!(tree.next_sibling(kids[1]), None);
}

#[test]
fn test_remove_child_of_other_parent_is_noop() {
    let mut tree = DomTree::new();
    let (parent, kids) = parent_with(&mut tree, &["a"]);
    let stranger = html_element(&mut tree, "span");

    tree.remove_child(stranger, kids[0]);

    assert_eq!(tree.children(parent), &[kids[0]]);
    assert_eq!(tree.parent(kids[0]), Some(parent));
}

// ========== append_child ==========

#[test]
fn test_append_child_reparents_attached_node() {
    let mut tree = DomTree::new();
    let (first, kids) = parent_with(&mut tree, &["a", "b"]);
    let second = html_element(&mut tree, "section");
    tree.append_child(NodeId::ROOT, second);

    tree.append_child(second, kids[0]);

    assert_eq!(tree.children(first), &[kids[1]]);
    assert_eq!(tree.prev_sibling(kids[1]), None);
    assert_eq!(tree.children(second), &[kids[0]]);
    assert_eq!(tree.parent(kids[0]), Some(second));
}

// ========== insert_before ==========

#[test]
fn test_insert_before_first_and_middle() {
    let mut tree = DomTree::new();
    let (parent, kids) = parent_with(&mut tree, &["b", "d"]);

    let a = html_element(&mut tree, "a");
    tree.insert_before(parent, a, kids[0]);
    let c = html_element(&mut tree, "c");
    tree.insert_before(parent, c, kids[1]);

    assert_eq!(tree.children(parent), &[a, kids[0], c, kids[1]]);
    assert_eq!(tree.prev_sibling(a), None);
    assert_eq!(tree.next_sibling(kids[0]), Some(c));
    assert_eq!(tree.prev_sibling(kids[1]), Some(c));
}

#[test]
fn test_insert_before_unknown_reference_appends() {
    let mut tree = DomTree::new();
    let (parent, kids) = parent_with(&mut tree, &["a"]);
    let elsewhere = html_element(&mut tree, "p");

    let b = html_element(&mut tree, "b");
    tree.insert_before(parent, b, elsewhere);

    assert_eq!(tree.children(parent), &[kids[0], b]);
}

// ========== text ==========

#[test]
fn test_append_text_merges_adjacent_runs() {
    let mut tree = DomTree::new();
    let (parent, _) = parent_with(&mut tree, &[]);

    tree.append_text(parent, "foo");
    tree.append_text(parent, "bar");

    assert_eq!(tree.children(parent).len(), 1);
    assert_eq!(tree.text_content(parent), "foobar");
}

#[test]
fn test_insert_text_before_merges_with_previous_text() {
    let mut tree = DomTree::new();
    let (parent, _) = parent_with(&mut tree, &[]);
    tree.append_text(parent, "x");
    let table = html_element(&mut tree, "table");
    tree.append_child(parent, table);

    tree.insert_text_before(parent, "y", table);
    tree.insert_text_before(parent, "z", table);

    assert_eq!(tree.children(parent).len(), 2);
    assert_eq!(tree.as_text(tree.children(parent)[0]), Some("xyz"));
}

// ========== move_children ==========

#[test]
fn test_move_children_appends_after_existing() {
    let mut tree = DomTree::new();
    let (from, moved) = parent_with(&mut tree, &["y", "z"]);
    let (to, existing) = parent_with(&mut tree, &["x"]);

    tree.move_children(from, to);

    assert!(tree.children(from).is_empty());
    assert_eq!(tree.children(to), &[existing[0], moved[0], moved[1]]);
    assert_eq!(tree.next_sibling(existing[0]), Some(moved[0]));
    assert_eq!(tree.prev_sibling(moved[0]), Some(existing[0]));
    assert_eq!(tree.parent(moved[1]), Some(to));
}

#[test]
fn test_move_children_empty_source_is_noop() {
    let mut tree = DomTree::new();
    let (from, _) = parent_with(&mut tree, &[]);
    let (to, _) = parent_with(&mut tree, &[]);

    tree.move_children(from, to);

    assert!(tree.children(to).is_empty());
}

// ========== document accessors ==========

#[test]
fn test_document_element_and_body() {
    let mut tree = DomTree::new();
    let comment = tree.alloc(NodeType::Comment("c".to_string()));
    tree.append_child(NodeId::ROOT, comment);
    let html = html_element(&mut tree, "html");
    tree.append_child(NodeId::ROOT, html);
    let head = html_element(&mut tree, "head");
    tree.append_child(html, head);
    let frameset = html_element(&mut tree, "frameset");
    tree.append_child(html, frameset);

    assert_eq!(tree.document_element(), Some(html));
    assert_eq!(tree.body(), Some(frameset));
    assert_eq!(tree.find_element(NodeId::ROOT, "head"), Some(head));
}

#[test]
fn test_serialize_nests_children() {
    let mut tree = DomTree::new();
    let (div, _) = parent_with(&mut tree, &["br"]);
    tree.append_text(div, "hi");

    let json = serde_json::to_value(&tree).unwrap();

    assert_eq!(json["type"], "document");
    let div_json = &json["children"][0];
    assert_eq!(div_json["tag"], "div");
    assert_eq!(div_json["children"][0]["tag"], "br");
    assert_eq!(div_json["children"][1]["text"], "hi");
}
