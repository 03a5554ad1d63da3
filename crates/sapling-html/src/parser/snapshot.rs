//! Capturing and restoring tree builder state between tokens.
//!
//! A snapshot shares its [`StackNode`]s with the builder, so taking one is a
//! handful of reference-count bumps and no node is released while a snapshot
//! still refers to it.

use std::rc::Rc;

use crate::names::DocumentMode;

use super::insertion_mode::InsertionMode;
use super::sink::TreeSink;
use super::stack::{FormattingEntry, StackNode};
use super::tree_builder::TreeBuilder;

/// The tree builder's state at a token boundary.
#[derive(Debug)]
pub struct TreeBuilderSnapshot<H> {
    stack: Vec<Rc<StackNode<H>>>,
    formatting: Vec<FormattingEntry<H>>,
    head: Option<Rc<StackNode<H>>>,
    form: Option<Rc<StackNode<H>>>,
    mode: InsertionMode,
    original_mode: InsertionMode,
    template_modes: Vec<InsertionMode>,
    document_mode: DocumentMode,
    frameset_ok: bool,
    drop_next_lf: bool,
    pending_table_text: String,
    pending_table_text_is_whitespace: bool,
}

impl<H> Clone for TreeBuilderSnapshot<H> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            formatting: self.formatting.clone(),
            head: self.head.clone(),
            form: self.form.clone(),
            mode: self.mode,
            original_mode: self.original_mode,
            template_modes: self.template_modes.clone(),
            document_mode: self.document_mode,
            frameset_ok: self.frameset_ok,
            drop_next_lf: self.drop_next_lf,
            pending_table_text: self.pending_table_text.clone(),
            pending_table_text_is_whitespace: self.pending_table_text_is_whitespace,
        }
    }
}

impl<H> TreeBuilderSnapshot<H> {
    /// The insertion mode when the snapshot was taken.
    #[must_use]
    pub const fn insertion_mode(&self) -> InsertionMode {
        self.mode
    }

    /// Number of open elements when the snapshot was taken.
    #[must_use]
    pub fn open_elements(&self) -> usize {
        self.stack.len()
    }

    /// Entries in the list of active formatting elements, markers included.
    #[must_use]
    pub fn formatting_entries(&self) -> usize {
        self.formatting.len()
    }

    /// "pending table character tokens" held when the snapshot was taken.
    #[must_use]
    pub fn pending_table_text(&self) -> &str {
        &self.pending_table_text
    }
}

fn same_node<H>(a: Option<&Rc<StackNode<H>>>, b: Option<&Rc<StackNode<H>>>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => Rc::ptr_eq(a, b),
        _ => false,
    }
}

impl<S: TreeSink> TreeBuilder<S> {
    /// Capture the state needed to continue parsing from this point.
    #[must_use]
    pub fn snapshot(&self) -> TreeBuilderSnapshot<S::Handle> {
        TreeBuilderSnapshot {
            stack: self.stack.clone(),
            formatting: self.formatting.clone(),
            head: self.head.clone(),
            form: self.form.clone(),
            mode: self.mode,
            original_mode: self.original_mode,
            template_modes: self.template_modes.clone(),
            document_mode: self.document_mode,
            frameset_ok: self.frameset_ok,
            drop_next_lf: self.drop_next_lf,
            pending_table_text: self.pending_table_text.clone(),
            pending_table_text_is_whitespace: self.pending_table_text_is_whitespace,
        }
    }

    /// Whether the builder is still where `snapshot` left it: the same
    /// elements (by identity) on the stack and in the formatting list, the
    /// same pointers, modes and flags.
    #[must_use]
    pub fn matches(&self, snapshot: &TreeBuilderSnapshot<S::Handle>) -> bool {
        let stacks_match = self.stack.len() == snapshot.stack.len()
            && self
                .stack
                .iter()
                .zip(&snapshot.stack)
                .all(|(a, b)| Rc::ptr_eq(a, b));
        let formatting_matches = self.formatting.len() == snapshot.formatting.len()
            && self
                .formatting
                .iter()
                .zip(&snapshot.formatting)
                .all(|(a, b)| match (a.element(), b.element()) {
                    (None, None) => true,
                    (Some(a), Some(b)) => Rc::ptr_eq(a, b),
                    _ => false,
                });
        stacks_match
            && formatting_matches
            && same_node(self.head.as_ref(), snapshot.head.as_ref())
            && same_node(self.form.as_ref(), snapshot.form.as_ref())
            && self.mode == snapshot.mode
            && self.original_mode == snapshot.original_mode
            && self.template_modes == snapshot.template_modes
            && self.document_mode == snapshot.document_mode
            && self.frameset_ok == snapshot.frameset_ok
            && self.drop_next_lf == snapshot.drop_next_lf
            && self.pending_table_text == snapshot.pending_table_text
            && self.pending_table_text_is_whitespace == snapshot.pending_table_text_is_whitespace
    }

    /// Put the builder back into the state `snapshot` captured. The sink is
    /// not touched: undoing the document is up to the host.
    pub fn restore(&mut self, snapshot: &TreeBuilderSnapshot<S::Handle>) {
        log::debug!(
            "tree builder: restoring {} open elements in {}",
            snapshot.stack.len(),
            snapshot.mode
        );
        self.stack.clone_from(&snapshot.stack);
        self.formatting.clone_from(&snapshot.formatting);
        self.head.clone_from(&snapshot.head);
        self.form.clone_from(&snapshot.form);
        self.mode = snapshot.mode;
        self.original_mode = snapshot.original_mode;
        self.template_modes.clone_from(&snapshot.template_modes);
        self.document_mode = snapshot.document_mode;
        self.frameset_ok = snapshot.frameset_ok;
        self.drop_next_lf = snapshot.drop_next_lf;
        self.pending_table_text.clone_from(&snapshot.pending_table_text);
        self.pending_table_text_is_whitespace = snapshot.pending_table_text_is_whitespace;
        self.foster_parenting = false;
        self.self_closing_pending = false;
    }
}
