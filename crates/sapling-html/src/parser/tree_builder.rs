//! The tree builder: token dispatch and the algorithms shared by the
//! insertion modes.
//!
//! [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
//!
//! "The input to the tree construction stage is a sequence of tokens from the
//! tokenization stage." The builder never sees the document: everything goes
//! through a [`TreeSink`], and what the algorithms need to know about open
//! elements is kept in [`StackNode`]s.

use std::fmt;
use std::rc::Rc;

use crate::config::ParserOptions;
use crate::diagnostics::DiagnosticSink;
use crate::error::{ParseIssue, TreeErrorCode};
use crate::names::{DispatchGroup, DocumentMode, ElementName, Namespace};
use crate::tokenizer::{
    Attributes, Doctype, HandlerResult, Position, Tag, TokenHandler, TokenizerState,
};

use super::insertion_mode::InsertionMode;
use super::sink::TreeSink;
use super::stack::{FormattingEntry, ScopeKind, StackNode};

/// A tracked element, shared between the stack and the formatting list.
pub(super) type Node<H> = Rc<StackNode<H>>;

/// A token as the insertion modes see it.
///
/// Character data arrives in runs of one kind (all whitespace, all U+0000, or
/// neither), so a handler only looks at the first character.
#[derive(Debug)]
pub(super) enum Token<'a> {
    StartTag(Tag),
    EndTag(ElementName),
    Characters(&'a str),
    Comment(&'a str),
    Doctype(Doctype),
    Eof,
}

impl Token<'_> {
    /// "A character token that is one of U+0009 CHARACTER TABULATION, U+000A
    /// LINE FEED (LF), U+000C FORM FEED (FF), U+000D CARRIAGE RETURN (CR), or
    /// U+0020 SPACE"
    pub(super) fn is_whitespace(&self) -> bool {
        matches!(self, Token::Characters(text) if RunKind::of_run(text) == RunKind::Whitespace)
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::StartTag(tag) => write!(f, "<{}>", tag.name),
            Token::EndTag(name) => write!(f, "</{name}>"),
            Token::Characters(_) => f.write_str("text"),
            Token::Comment(_) => f.write_str("comment"),
            Token::Doctype(_) => f.write_str("DOCTYPE"),
            Token::Eof => f.write_str("end of file"),
        }
    }
}

/// Where a new node goes.
///
/// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#appropriate-place-for-inserting-a-node)
/// "The appropriate place for inserting a node"
#[derive(Debug, Clone)]
pub(super) enum InsertionPlace<H> {
    /// After the last child of this element.
    Append(H),
    /// Immediately before `table`, or at the end of `stack_parent` if the table
    /// has no parent.
    FosterParent { table: H, stack_parent: H },
}

/// The element a fragment is parsed in.
///
/// [§ 13.4 Parsing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#parsing-html-fragments)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentContext {
    /// The context element's local name.
    pub name: ElementName,
    /// The context element's namespace.
    pub namespace: Namespace,
    /// The quirks mode of the context element's document.
    pub quirks: DocumentMode,
}

impl FragmentContext {
    /// An HTML context element in a no-quirks document.
    #[must_use]
    pub fn html(name: &str) -> Self {
        Self {
            name: ElementName::classify(name),
            namespace: Namespace::Html,
            quirks: DocumentMode::NoQuirks,
        }
    }

    /// A context element in `namespace`.
    #[must_use]
    pub fn foreign(name: &str, namespace: Namespace) -> Self {
        Self {
            name: ElementName::classify(name),
            namespace,
            quirks: DocumentMode::NoQuirks,
        }
    }

    /// Use the given quirks mode.
    #[must_use]
    pub const fn with_quirks(mut self, quirks: DocumentMode) -> Self {
        self.quirks = quirks;
        self
    }

    /// [§ 13.4](https://html.spec.whatwg.org/multipage/parsing.html#parsing-html-fragments)
    ///
    /// "Set the state of the HTML parser's tokenization stage as follows,
    /// switching on the context element"
    #[must_use]
    pub fn tokenizer_state(&self, scripting_enabled: bool) -> TokenizerState {
        if self.namespace != Namespace::Html {
            return TokenizerState::Data;
        }
        match self.name.group() {
            DispatchGroup::Title | DispatchGroup::Textarea => TokenizerState::RCDATA,
            DispatchGroup::Style
            | DispatchGroup::Xmp
            | DispatchGroup::Iframe
            | DispatchGroup::Noembed
            | DispatchGroup::Noframes => TokenizerState::RAWTEXT,
            DispatchGroup::Noscript if scripting_enabled => TokenizerState::RAWTEXT,
            DispatchGroup::Script => TokenizerState::ScriptData,
            DispatchGroup::Plaintext => TokenizerState::PLAINTEXT,
            _ => TokenizerState::Data,
        }
    }
}

/// [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
///
/// Receives tokens from the tokenizer and drives a [`TreeSink`].
#[allow(clippy::struct_excessive_bools)]
pub struct TreeBuilder<S: TreeSink> {
    pub(super) sink: S,
    pub(super) options: ParserOptions,
    diagnostics: Option<Box<dyn DiagnosticSink>>,

    /// [§ 13.2.4.1](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
    pub(super) mode: InsertionMode,
    /// [§ 13.2.4.1](https://html.spec.whatwg.org/multipage/parsing.html#original-insertion-mode)
    pub(super) original_mode: InsertionMode,
    /// [§ 13.2.4.1](https://html.spec.whatwg.org/multipage/parsing.html#stack-of-template-insertion-modes)
    pub(super) template_modes: Vec<InsertionMode>,

    /// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)
    pub(super) stack: Vec<Node<S::Handle>>,
    /// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#the-list-of-active-formatting-elements)
    pub(super) formatting: Vec<FormattingEntry<S::Handle>>,

    /// [§ 13.2.4.4](https://html.spec.whatwg.org/multipage/parsing.html#head-element-pointer)
    pub(super) head: Option<Node<S::Handle>>,
    /// [§ 13.2.4.4](https://html.spec.whatwg.org/multipage/parsing.html#form-element-pointer)
    pub(super) form: Option<Node<S::Handle>>,
    /// The fragment parsing context element. Never on the stack.
    pub(super) context: Option<Node<S::Handle>>,

    pub(super) document_mode: DocumentMode,
    /// [§ 13.2.4.5](https://html.spec.whatwg.org/multipage/parsing.html#frameset-ok-flag)
    pub(super) frameset_ok: bool,
    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#foster-parent)
    pub(super) foster_parenting: bool,
    /// "If the next token is a U+000A LINE FEED (LF) character token, then
    /// ignore that token and move on to the next one."
    pub(super) drop_next_lf: bool,

    /// [§ 13.2.6.4.10](https://html.spec.whatwg.org/multipage/parsing.html#concept-pending-table-char-tokens)
    pub(super) pending_table_text: String,
    pub(super) pending_table_text_is_whitespace: bool,

    /// The current start tag is self-closing and nothing acknowledged it yet.
    pub(super) self_closing_pending: bool,
    tokenizer_switch: Option<(TokenizerState, Option<ElementName>)>,
    suspend: bool,
    position: Position,
}

impl<S: TreeSink> TreeBuilder<S> {
    /// A builder for a whole document, starting in the "initial" mode.
    #[must_use]
    pub fn new(sink: S, options: ParserOptions) -> Self {
        Self {
            sink,
            options,
            diagnostics: None,
            mode: InsertionMode::Initial,
            original_mode: InsertionMode::Initial,
            template_modes: Vec::new(),
            stack: Vec::new(),
            formatting: Vec::new(),
            head: None,
            form: None,
            context: None,
            document_mode: DocumentMode::NoQuirks,
            frameset_ok: true,
            foster_parenting: false,
            drop_next_lf: false,
            pending_table_text: String::new(),
            pending_table_text_is_whitespace: true,
            self_closing_pending: false,
            tokenizer_switch: None,
            suspend: false,
            position: Position::START,
        }
    }

    /// [§ 13.4 Parsing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#parsing-html-fragments)
    ///
    /// A builder for the children of `context`. The tokenizer should start in
    /// [`FragmentContext::tokenizer_state`].
    #[must_use]
    pub fn new_fragment(sink: S, options: ParserOptions, context: &FragmentContext) -> Self {
        let mut builder = Self::new(sink, options);
        builder.document_mode = context.quirks;
        builder.sink.set_document_mode(context.quirks);

        // "Let root be a new html element with no attributes. Append the
        // element root to the Document node created above. Set up the parser's
        // stack of open elements so that it contains just the single element
        // root."
        let root = builder
            .sink
            .create_html_element_set_as_root(&Attributes::empty());
        builder.push(Rc::new(StackNode::new(
            ElementName::classify("html"),
            Namespace::Html,
            root,
            Attributes::empty(),
        )));

        // "If the context element is a template element, push "in template"
        // onto the stack of template insertion modes so that it is the new
        // current template insertion mode."
        if context.namespace == Namespace::Html && context.name.group() == DispatchGroup::Template
        {
            builder.template_modes.push(InsertionMode::InTemplate);
        }

        let handle =
            builder
                .sink
                .create_element(context.namespace, &context.name, &Attributes::empty(), None);
        builder.context = Some(Rc::new(StackNode::new(
            context.name.clone(),
            context.namespace,
            handle,
            Attributes::empty(),
        )));

        // "Reset the parser's insertion mode appropriately."
        builder.reset_insertion_mode_appropriately();
        log::debug!(
            "tree builder: fragment in <{}> starts in {}",
            context.name,
            builder.mode
        );
        builder
    }

    /// Report issues to `sink`.
    #[must_use]
    pub fn with_diagnostics(mut self, sink: Box<dyn DiagnosticSink>) -> Self {
        self.diagnostics = Some(sink);
        self
    }

    /// Report issues to `sink` from now on.
    pub fn set_diagnostics(&mut self, sink: Option<Box<dyn DiagnosticSink>>) {
        self.diagnostics = sink;
    }

    /// The sink.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// The sink, mutably.
    pub const fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Give back the sink.
    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// The current insertion mode.
    #[must_use]
    pub const fn insertion_mode(&self) -> InsertionMode {
        self.mode
    }

    /// The document's quirks mode as decided so far.
    #[must_use]
    pub const fn document_mode(&self) -> DocumentMode {
        self.document_mode
    }

    /// Number of open elements.
    #[must_use]
    pub fn open_elements(&self) -> usize {
        self.stack.len()
    }

    // ----- diagnostics -----

    /// Report a parse error. `detail` is only formatted when someone listens.
    pub(super) fn error(&mut self, code: TreeErrorCode, detail: impl fmt::Display) {
        log::trace!("tree builder: {code} ({detail}) in {}", self.mode);
        if let Some(diagnostics) = self.diagnostics.as_mut() {
            diagnostics.error(ParseIssue::tree(code, detail.to_string(), self.position));
        }
    }

    /// Report an advisory warning, if warnings are enabled.
    pub(super) fn warning(&mut self, code: TreeErrorCode, detail: impl fmt::Display) {
        if !self.options.report_warnings {
            return;
        }
        if let Some(diagnostics) = self.diagnostics.as_mut() {
            diagnostics.warning(ParseIssue::tree(code, detail.to_string(), self.position).as_warning());
        }
    }

    /// Stop at the end of the current token so the host can act on it.
    pub(super) fn request_suspension(&mut self) {
        self.suspend = true;
    }

    // ----- dispatch -----

    /// [§ 13.2.6 Tree construction dispatcher](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction-dispatcher)
    pub(super) fn dispatch(&mut self, token: Token<'_>) {
        if self.use_html_rules(&token) {
            self.process(self.mode, token);
        } else {
            self.process_foreign_content(token);
        }
    }

    /// "If the stack of open elements is empty; If the adjusted current node
    /// is an element in the HTML namespace; If the adjusted current node is a
    /// MathML text integration point and the token is a start tag whose tag
    /// name is neither "mglyph" nor "malignmark"; ... If the token is an
    /// end-of-file token: Process the token according to the rules given in
    /// the section corresponding to the current insertion mode in HTML
    /// content."
    fn use_html_rules(&self, token: &Token<'_>) -> bool {
        let Some(node) = self.adjusted_current_node() else {
            return true;
        };
        if node.is_html() {
            return true;
        }
        match token {
            Token::StartTag(tag) => {
                (node.is_mathml_text_integration_point()
                    && tag.name.group() != DispatchGroup::Mglyph)
                    || (node.namespace == Namespace::MathMl
                        && node.name.group() == DispatchGroup::AnnotationXml
                        && tag.name.group() == DispatchGroup::Svg)
                    || node.is_html_integration_point()
            }
            Token::Characters(_) => {
                node.is_mathml_text_integration_point() || node.is_html_integration_point()
            }
            Token::Eof => true,
            _ => false,
        }
    }

    /// Process `token` using the rules for `mode`. Also how "reprocess the
    /// token" and "process the token using the rules for" are spelled.
    pub(super) fn process(&mut self, mode: InsertionMode, token: Token<'_>) {
        use InsertionMode as M;
        match mode {
            M::Initial => self.initial_mode(token),
            M::BeforeHtml => self.before_html_mode(token),
            M::BeforeHead => self.before_head_mode(token),
            M::InHead => self.in_head_mode(token),
            M::InHeadNoscript => self.in_head_noscript_mode(token),
            M::AfterHead => self.after_head_mode(token),
            M::InBody => self.in_body_mode(token),
            M::Text => self.text_mode(token),
            M::InTable => self.in_table_mode(token),
            M::InTableText => self.in_table_text_mode(token),
            M::InCaption => self.in_caption_mode(token),
            M::InColumnGroup => self.in_column_group_mode(token),
            M::InTableBody => self.in_table_body_mode(token),
            M::InRow => self.in_row_mode(token),
            M::InCell => self.in_cell_mode(token),
            M::InSelect => self.in_select_mode(token),
            M::InSelectInTable => self.in_select_in_table_mode(token),
            M::InTemplate => self.in_template_mode(token),
            M::AfterBody => self.after_body_mode(token),
            M::InFrameset => self.in_frameset_mode(token),
            M::AfterFrameset => self.after_frameset_mode(token),
            M::AfterAfterBody => self.after_after_body_mode(token),
            M::AfterAfterFrameset => self.after_after_frameset_mode(token),
        }
    }

    /// Switch modes.
    pub(super) fn switch_to(&mut self, mode: InsertionMode) {
        if mode != self.mode {
            log::trace!("tree builder: {} -> {mode}", self.mode);
        }
        self.mode = mode;
    }

    /// Have the tokenizer switch content model once the current start tag is
    /// done.
    pub(super) fn switch_tokenizer(&mut self, state: TokenizerState, end_tag: Option<ElementName>) {
        self.tokenizer_switch = Some((state, end_tag));
    }

    /// [§ 13.2.6.2](https://html.spec.whatwg.org/multipage/parsing.html#generic-raw-text-element-parsing-algorithm)
    ///
    /// The generic raw text and RCDATA element parsing algorithms: "Insert an
    /// HTML element for the token. If the algorithm that was invoked is the
    /// generic raw text element parsing algorithm, switch the tokenizer to the
    /// RAWTEXT state; otherwise ... switch the tokenizer to the RCDATA state.
    /// Let the original insertion mode be the current insertion mode. Then,
    /// switch the insertion mode to "text"."
    pub(super) fn parse_text_element(&mut self, tag: Tag, state: TokenizerState) {
        let name = tag.name.clone();
        let _ = self.insert_html_element(tag);
        self.switch_tokenizer(state, Some(name));
        self.original_mode = self.mode;
        self.switch_to(InsertionMode::Text);
    }

    /// "Acknowledge the token's self-closing flag, if it is set."
    pub(super) const fn acknowledge_self_closing(&mut self) {
        self.self_closing_pending = false;
    }

    // ----- the stack of open elements -----

    /// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#current-node)
    /// "The current node is the bottommost node in this stack of open elements."
    pub(super) fn current_node(&self) -> Option<&Node<S::Handle>> {
        self.stack.last()
    }

    /// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#adjusted-current-node)
    /// "The adjusted current node is the context element if the parser was
    /// created as part of the HTML fragment parsing algorithm and the stack of
    /// open elements has only one element in it (fragment case); otherwise,
    /// the adjusted current node is the current node."
    pub(super) fn adjusted_current_node(&self) -> Option<&StackNode<S::Handle>> {
        match &self.context {
            Some(context) if self.stack.len() == 1 => Some(context),
            _ => self.stack.last().map(|node| &**node),
        }
    }

    /// Whether the current node is an HTML element in `group`.
    pub(super) fn current_is(&self, group: DispatchGroup) -> bool {
        self.current_node().is_some_and(|node| node.is(group))
    }

    /// Whether the current node is an HTML element called `name`.
    pub(super) fn current_is_named(&self, name: &ElementName) -> bool {
        self.current_node().is_some_and(|node| node.is_named(name))
    }

    /// Whether `node` is on the stack.
    pub(super) fn is_open(&self, node: &Node<S::Handle>) -> bool {
        self.stack.iter().any(|open| Rc::ptr_eq(open, node))
    }

    /// Whether a `template` is on the stack.
    pub(super) fn has_template_on_stack(&self) -> bool {
        self.stack.iter().any(|node| node.is(DispatchGroup::Template))
    }

    pub(super) fn push(&mut self, node: Node<S::Handle>) {
        self.sink.element_pushed(&node.handle);
        self.stack.push(node);
    }

    pub(super) fn pop(&mut self) -> Option<Node<S::Handle>> {
        let node = self.stack.pop()?;
        self.sink.element_popped(&node.handle);
        Some(node)
    }

    /// Pop elements until one matching `done` has been popped.
    pub(super) fn pop_until(&mut self, done: impl Fn(&StackNode<S::Handle>) -> bool) {
        while let Some(node) = self.pop() {
            if done(&node) {
                break;
            }
        }
    }

    /// "Pop elements from the stack of open elements until an HTML element in
    /// `group` has been popped from the stack."
    pub(super) fn pop_until_group(&mut self, group: DispatchGroup) {
        self.pop_until(|node| node.is(group));
    }

    /// "Pop elements from the stack of open elements until an HTML element
    /// with the same tag name as the token has been popped from the stack."
    pub(super) fn pop_until_named(&mut self, name: &ElementName) {
        self.pop_until(|node| node.is_named(name));
    }

    /// Pop elements while the current node is not `keep`.
    pub(super) fn pop_while_not(&mut self, keep: impl Fn(&StackNode<S::Handle>) -> bool) {
        while self.current_node().is_some_and(|node| !keep(node)) {
            let _ = self.pop();
        }
    }

    /// Take `node` out of the stack, wherever it is.
    pub(super) fn remove_from_stack(&mut self, node: &Node<S::Handle>) {
        if let Some(index) = self.stack.iter().rposition(|open| Rc::ptr_eq(open, node)) {
            let removed = self.stack.remove(index);
            self.sink.element_popped(&removed.handle);
        }
    }

    // ----- scope -----

    /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-the-specific-scope)
    ///
    /// "1. Initialize node to be the current node (the bottommost node of the
    /// stack). 2. If node is the target node, terminate in a match state.
    /// 3. Otherwise, if node is one of the element types in list, terminate in
    /// a failure state. 4. Otherwise, set node to the previous entry in the
    /// stack of open elements and return to step 2."
    pub(super) fn in_scope(
        &self,
        kind: ScopeKind,
        target: impl Fn(&Node<S::Handle>) -> bool,
    ) -> bool {
        for node in self.stack.iter().rev() {
            if target(node) {
                return true;
            }
            if kind.is_boundary(node) {
                return false;
            }
        }
        false
    }

    /// Whether an HTML element in `group` is in `kind` scope.
    pub(super) fn has_in_scope(&self, kind: ScopeKind, group: DispatchGroup) -> bool {
        self.in_scope(kind, |node| node.is(group))
    }

    /// Whether an HTML element called `name` is in `kind` scope.
    pub(super) fn has_named_in_scope(&self, kind: ScopeKind, name: &ElementName) -> bool {
        self.in_scope(kind, |node| node.is_named(name))
    }

    // ----- implied end tags -----

    /// [§ 13.2.6.3](https://html.spec.whatwg.org/multipage/parsing.html#generate-implied-end-tags)
    ///
    /// "while the current node is a dd element, a dt element, an li element,
    /// an optgroup element, an option element, a p element, an rb element, an
    /// rp element, an rt element, or an rtc element, the UA must pop the
    /// current node off the stack of open elements." `except` names an element
    /// that is left alone.
    pub(super) fn generate_implied_end_tags(&mut self, except: Option<&ElementName>) {
        while self.current_node().is_some_and(|node| {
            node.is_html()
                && node.has_optional_end_tag()
                && except.is_none_or(|name| node.name != *name)
        }) {
            let _ = self.pop();
        }
    }

    /// "generate all implied end tags thoroughly": also `caption`,
    /// `colgroup`, `tbody`, `td`, `tfoot`, `th`, `thead` and `tr`.
    pub(super) fn generate_implied_end_tags_thoroughly(&mut self) {
        while self.current_node().is_some_and(|node| {
            node.is_html()
                && (node.has_optional_end_tag()
                    || matches!(
                        node.name.group(),
                        DispatchGroup::Caption
                            | DispatchGroup::Colgroup
                            | DispatchGroup::TbodyGroup
                            | DispatchGroup::TdTh
                            | DispatchGroup::Tr
                    ))
        }) {
            let _ = self.pop();
        }
    }

    /// [§ 13.2.6.4.7](https://html.spec.whatwg.org/multipage/parsing.html#close-a-p-element)
    ///
    /// "Generate implied end tags, except for p elements. If the current node
    /// is not a p element, then this is a parse error. Pop elements from the
    /// stack of open elements until a p element has been popped from the
    /// stack."
    pub(super) fn close_p_element(&mut self) {
        let p = ElementName::classify("p");
        self.generate_implied_end_tags(Some(&p));
        if !self.current_is(DispatchGroup::P) {
            self.error(TreeErrorCode::UnclosedElements, "</p>");
        }
        self.pop_until_group(DispatchGroup::P);
    }

    /// "If the stack of open elements has a p element in button scope, then
    /// close a p element."
    pub(super) fn close_p_in_button_scope(&mut self) {
        if self.has_in_scope(ScopeKind::Button, DispatchGroup::P) {
            self.close_p_element();
        }
    }

    /// [§ 13.2.4.1](https://html.spec.whatwg.org/multipage/parsing.html#reset-the-insertion-mode-appropriately)
    pub(super) fn reset_insertion_mode_appropriately(&mut self) {
        let mode = self.appropriate_mode();
        self.switch_to(mode);
    }

    fn appropriate_mode(&self) -> InsertionMode {
        use InsertionMode as M;
        // STEP 1: "Let last be false."
        // STEP 2: "Let node be the last node in the stack of open elements."
        for (index, open) in self.stack.iter().enumerate().rev() {
            // STEP 3: "Loop: If node is the first node in the stack of open
            //          elements, then set last to true, and, if the parser was
            //          created as part of the HTML fragment parsing algorithm
            //          (fragment case), set node to the context element passed
            //          to that algorithm."
            let last = index == 0;
            let node: &StackNode<S::Handle> = match &self.context {
                Some(context) if last => context,
                _ => open,
            };
            if !node.is_html() {
                if last {
                    return M::InBody;
                }
                continue;
            }
            match node.name.group() {
                // STEP 4: "If node is a select element, run these substeps"
                DispatchGroup::Select => {
                    if !last {
                        for ancestor in self.stack[..index].iter().rev() {
                            if ancestor.is(DispatchGroup::Template) {
                                break;
                            }
                            if ancestor.is(DispatchGroup::Table) {
                                return M::InSelectInTable;
                            }
                        }
                    }
                    return M::InSelect;
                }
                // STEP 5: "If node is a td or th element and last is false,
                //          then switch the insertion mode to "in cell""
                DispatchGroup::TdTh if !last => return M::InCell,
                DispatchGroup::Tr => return M::InRow,
                DispatchGroup::TbodyGroup => return M::InTableBody,
                DispatchGroup::Caption => return M::InCaption,
                DispatchGroup::Colgroup => return M::InColumnGroup,
                DispatchGroup::Table => return M::InTable,
                // STEP 11: "If node is a template element, then switch the
                //           insertion mode to the current template insertion
                //           mode"
                DispatchGroup::Template => {
                    return self.template_modes.last().copied().unwrap_or(M::InTemplate);
                }
                DispatchGroup::Head if !last => return M::InHead,
                DispatchGroup::Body => return M::InBody,
                DispatchGroup::Frameset => return M::InFrameset,
                // STEP 15: "If node is an html element, run these substeps:
                //           If the head element pointer is null, switch the
                //           insertion mode to "before head" ... Otherwise,
                //           ... "after head""
                DispatchGroup::Html => {
                    return if self.head.is_none() {
                        M::BeforeHead
                    } else {
                        M::AfterHead
                    };
                }
                // STEP 16: "If last is true, then switch the insertion mode to
                //           "in body" and return."
                _ if last => return M::InBody,
                _ => {}
            }
        }
        M::InBody
    }

    // ----- the list of active formatting elements -----

    /// Position of `node` in the formatting list.
    pub(super) fn formatting_index(&self, node: &Node<S::Handle>) -> Option<usize> {
        self.formatting.iter().rposition(|entry| {
            entry
                .element()
                .is_some_and(|element| Rc::ptr_eq(element, node))
        })
    }

    /// Remove `node` from the formatting list if it is there.
    pub(super) fn remove_from_formatting(&mut self, node: &Node<S::Handle>) {
        if let Some(index) = self.formatting_index(node) {
            let _ = self.formatting.remove(index);
        }
    }

    /// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#push-onto-the-list-of-active-formatting-elements)
    ///
    /// "If there are already three elements in the list of active formatting
    /// elements after the last marker, if any, or anywhere in the list if there
    /// are no markers, that have the same tag name, namespace, and attributes
    /// as element, then remove the earliest such element from the list of
    /// active formatting elements." Then "Add element to the list".
    pub(super) fn push_formatting(&mut self, node: Node<S::Handle>) {
        let mut matches = 0;
        let mut earliest = None;
        for (index, entry) in self.formatting.iter().enumerate().rev() {
            let Some(element) = entry.element() else {
                break;
            };
            if element.same_token_as(&node) {
                matches += 1;
                earliest = Some(index);
            }
        }
        if matches >= 3
            && let Some(index) = earliest
        {
            let _ = self.formatting.remove(index);
        }
        self.formatting.push(FormattingEntry::Element(node));
    }

    /// "Insert a marker at the end of the list of active formatting elements."
    pub(super) fn push_marker(&mut self) {
        self.formatting.push(FormattingEntry::Marker);
    }

    /// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-list-of-active-formatting-elements-up-to-the-last-marker)
    pub(super) fn clear_formatting_to_last_marker(&mut self) {
        while let Some(entry) = self.formatting.pop() {
            if matches!(entry, FormattingEntry::Marker) {
                break;
            }
        }
    }

    /// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#reconstruct-the-active-formatting-elements)
    pub(super) fn reconstruct_formatting(&mut self) {
        // STEP 1: "If there are no entries in the list of active formatting
        //          elements, then there is nothing to reconstruct; stop this
        //          algorithm."
        // STEP 2: "If the last (most recently added) entry in the list of
        //          active formatting elements is a marker, or if it is an
        //          element that is in the stack of open elements, then there is
        //          nothing to reconstruct; stop this algorithm."
        let Some(last) = self.formatting.last() else {
            return;
        };
        match last.element() {
            None => return,
            Some(element) if self.is_open(element) => return,
            Some(_) => {}
        }

        // STEP 3-6: "Rewind: If there are no entries before entry in the list
        //            of active formatting elements, then jump to the step
        //            labeled create ... If entry is neither a marker nor an
        //            element that is also in the stack of open elements, go to
        //            the step labeled rewind."
        let mut index = self.formatting.len() - 1;
        while index > 0 {
            let open_or_marker = match self.formatting[index - 1].element() {
                None => true,
                Some(element) => self.is_open(element),
            };
            if open_or_marker {
                break;
            }
            index -= 1;
        }

        // STEP 7-10: "Advance ... Create: Insert an HTML element for the token
        //             for which the element entry was created, to obtain new
        //             element. Replace the entry for entry in the list with an
        //             entry for new element. If the entry for new element in
        //             the list of active formatting elements is not the last
        //             entry in the list, return to the step labeled advance."
        for position in index..self.formatting.len() {
            let Some(old) = self.formatting[position].element().cloned() else {
                continue;
            };
            let new = self.insert_element(Namespace::Html, old.name.clone(), old.attributes.clone());
            self.formatting[position] = FormattingEntry::Element(new);
        }
    }

    // ----- inserting nodes -----

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#appropriate-place-for-inserting-a-node)
    pub(super) fn appropriate_place(
        &self,
        override_target: Option<&Node<S::Handle>>,
    ) -> Option<InsertionPlace<S::Handle>> {
        // STEP 1: "If there was an override target specified, then let target
        //          be the override target. Otherwise, let target be the current
        //          node."
        let target = override_target.or_else(|| self.stack.last())?;

        // STEP 2: "If foster parenting is enabled and target is a table, tbody,
        //          tfoot, thead, or tr element"
        if self.foster_parenting && target.is_foster_parenting() {
            let last_template = self
                .stack
                .iter()
                .rposition(|node| node.is(DispatchGroup::Template));
            let last_table = self
                .stack
                .iter()
                .rposition(|node| node.is(DispatchGroup::Table));
            // "If there is a last template and either there is no last table,
            // or there is one, but last template is lower (more recently added)
            // than last table in the stack of open elements, then: let adjusted
            // insertion location be inside last template's template contents,
            // after its last child (if any), and abort these steps."
            if let Some(template) = last_template
                && last_table.is_none_or(|table| template > table)
            {
                return Some(InsertionPlace::Append(self.stack[template].handle.clone()));
            }
            // "If there is no last table, then let adjusted insertion location
            // be inside the first element in the stack of open elements (the
            // html element), after its last child (if any), and abort these
            // steps. (fragment case)"
            let Some(table) = last_table else {
                return self
                    .stack
                    .first()
                    .map(|html| InsertionPlace::Append(html.handle.clone()));
            };
            let stack_parent = table.saturating_sub(1);
            return Some(InsertionPlace::FosterParent {
                table: self.stack[table].handle.clone(),
                stack_parent: self.stack[stack_parent].handle.clone(),
            });
        }

        // STEP 3-4: "Otherwise: let adjusted insertion location be inside
        //            target, after its last child (if any)." Template contents
        //            are the template's children.
        Some(InsertionPlace::Append(target.handle.clone()))
    }

    /// Put an element at `place`.
    pub(super) fn insert_at(&mut self, place: InsertionPlace<S::Handle>, element: &S::Handle) {
        match place {
            InsertionPlace::Append(parent) => self.sink.append_element(element, &parent),
            InsertionPlace::FosterParent {
                table,
                stack_parent,
            } => self
                .sink
                .insert_foster_parented_child(element, &table, &stack_parent),
        }
    }

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#create-an-element-for-the-token)
    ///
    /// "Create an element for the token", without inserting it.
    pub(super) fn create_element(
        &mut self,
        namespace: Namespace,
        name: ElementName,
        attributes: Attributes,
    ) -> Node<S::Handle> {
        // "If element is a form-associated element and not a form-associated
        // custom element, the form element pointer is not null, there is no
        // template element on the stack of open elements, element is either not
        // listed or doesn't have a form attribute, and the intended parent is
        // in the same tree as the element pointed to by the form element
        // pointer, then associate element with the form element pointed to by
        // the form element pointer"
        let form = match &self.form {
            Some(form)
                if namespace == Namespace::Html
                    && is_form_associated(&name, &attributes)
                    && !self.has_template_on_stack() =>
            {
                Some(form.handle.clone())
            }
            _ => None,
        };
        let handle = self
            .sink
            .create_element(namespace, &name, &attributes, form.as_ref());
        Rc::new(StackNode::new(name, namespace, handle, attributes))
    }

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-foreign-element)
    ///
    /// "Insert a foreign element": create it at the appropriate place and push
    /// it onto the stack.
    pub(super) fn insert_element(
        &mut self,
        namespace: Namespace,
        name: ElementName,
        attributes: Attributes,
    ) -> Node<S::Handle> {
        let place = self.appropriate_place(None);
        let node = self.create_element(namespace, name, attributes);
        if let Some(place) = place {
            self.insert_at(place, &node.handle);
        }
        self.push(Rc::clone(&node));
        node
    }

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#insert-an-html-element)
    /// "Insert an HTML element for the token"
    pub(super) fn insert_html_element(&mut self, tag: Tag) -> Node<S::Handle> {
        self.insert_element(Namespace::Html, tag.name, tag.attributes)
    }

    /// Insert an HTML element for a token the parser made up (`head`,
    /// `body`, `tbody`, ...).
    pub(super) fn insert_synthetic_element(&mut self, name: &str) -> Node<S::Handle> {
        self.insert_html_element(Tag::new(name))
    }

    /// Insert an HTML element and pop it right away, acknowledging a
    /// self-closing flag. The shape of every void element rule.
    pub(super) fn insert_void_element(&mut self, tag: Tag) -> Node<S::Handle> {
        let node = self.insert_html_element(tag);
        let _ = self.pop();
        self.acknowledge_self_closing();
        node
    }

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-character)
    pub(super) fn insert_characters(&mut self, text: &str) {
        match self.appropriate_place(None) {
            Some(InsertionPlace::Append(parent)) => self.sink.append_characters(&parent, text),
            Some(InsertionPlace::FosterParent {
                table,
                stack_parent,
            }) => self
                .sink
                .insert_foster_parented_characters(text, &table, &stack_parent),
            // "If the adjusted insertion location is in a Document node, then
            // return."
            None => {}
        }
    }

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-comment)
    pub(super) fn insert_comment(&mut self, text: &str) {
        match self.appropriate_place(None) {
            Some(
                InsertionPlace::Append(parent)
                | InsertionPlace::FosterParent {
                    stack_parent: parent,
                    ..
                },
            ) => self.sink.append_comment(&parent, text),
            None => self.sink.append_comment_to_document(text),
        }
    }

    /// Insert a comment as the last child of the first element on the stack
    /// (the `html` element), as "after body" does.
    pub(super) fn insert_comment_in_html(&mut self, text: &str) {
        match self.stack.first() {
            Some(html) => {
                let html = html.handle.clone();
                self.sink.append_comment(&html, text);
            }
            None => self.sink.append_comment_to_document(text),
        }
    }

    /// "add the attribute and its corresponding value to that element" for
    /// each attribute not already present.
    pub(super) fn merge_attributes(&mut self, node: &Node<S::Handle>, attributes: &Attributes) {
        if !attributes.is_empty() {
            self.sink.add_attributes_to_element(&node.handle, attributes);
        }
    }

    /// Stop parsing: "Pop all the nodes off the stack of open elements".
    pub(super) fn stop_parsing(&mut self) {
        while self.pop().is_some() {}
        log::debug!("tree builder: stopped parsing");
    }
}

/// "form-associated elements": `button`, `fieldset`, `input`, `object`,
/// `output`, `select`, `textarea` and `img`. The listed ones keep an explicit
/// `form` attribute instead.
fn is_form_associated(name: &ElementName, attributes: &Attributes) -> bool {
    match name.name() {
        "img" => true,
        "button" | "fieldset" | "input" | "object" | "output" | "select" | "textarea" => {
            attributes.get("form").is_none()
        }
        _ => false,
    }
}

/// The kind of a character run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum RunKind {
    /// Tab, LF, FF, CR or space.
    Whitespace,
    /// U+0000, only ever produced by
    /// [`TokenHandler::zero_originating_replacement_character`].
    Null,
    /// Anything else.
    Text,
}

impl RunKind {
    pub(super) const fn of(c: char) -> Self {
        match c {
            '\t' | '\n' | '\x0C' | '\r' | ' ' => Self::Whitespace,
            '\0' => Self::Null,
            _ => Self::Text,
        }
    }

    /// The kind of a non-empty run.
    pub(super) fn of_run(text: &str) -> Self {
        text.chars().next().map_or(Self::Text, Self::of)
    }
}

/// Split `text` into maximal runs of one [`RunKind`].
pub(super) fn runs(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let kind = RunKind::of(first);
        let end = rest
            .char_indices()
            .find(|&(_, c)| RunKind::of(c) != kind)
            .map_or(rest.len(), |(index, _)| index);
        let (run, tail) = rest.split_at(end);
        rest = tail;
        Some(run)
    })
}

impl<S: TreeSink> TokenHandler for TreeBuilder<S> {
    fn start_tokenization(&mut self) {
        log::debug!("tree builder: starting in {}", self.mode);
    }

    fn start_tag(&mut self, tag: Tag) -> HandlerResult {
        self.drop_next_lf = false;
        self.tokenizer_switch = None;
        self.suspend = false;
        self.self_closing_pending = tag.self_closing;
        let self_closing_name = tag.self_closing.then(|| tag.name.clone());

        self.dispatch(Token::StartTag(tag));

        // [§ 13.2.5.40](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
        // "When a start tag token is emitted with its self-closing flag set, if
        // the flag is not acknowledged when it is processed by the tree
        // construction stage, that is a parse error."
        if std::mem::take(&mut self.self_closing_pending)
            && let Some(name) = self_closing_name
        {
            self.error(
                TreeErrorCode::NonVoidHtmlElementStartTagWithTrailingSolidus,
                format_args!("<{name}/>"),
            );
        }

        if std::mem::take(&mut self.suspend) {
            return HandlerResult::Suspend;
        }
        match self.tokenizer_switch.take() {
            Some((state, end_tag)) => HandlerResult::SwitchTo { state, end_tag },
            None => HandlerResult::Continue,
        }
    }

    fn end_tag(&mut self, name: ElementName) {
        self.drop_next_lf = false;
        self.dispatch(Token::EndTag(name));
    }

    fn characters(&mut self, text: &str) {
        let mut text = text;
        if std::mem::take(&mut self.drop_next_lf)
            && let Some(rest) = text.strip_prefix('\n')
        {
            text = rest;
        }
        for run in runs(text) {
            self.dispatch(Token::Characters(run));
        }
    }

    fn comment(&mut self, text: &str) {
        self.drop_next_lf = false;
        self.dispatch(Token::Comment(text));
    }

    fn doctype(&mut self, doctype: Doctype) {
        self.drop_next_lf = false;
        self.dispatch(Token::Doctype(doctype));
    }

    fn zero_originating_replacement_character(&mut self) {
        self.drop_next_lf = false;
        self.dispatch(Token::Characters("\0"));
    }

    fn eof(&mut self) {
        self.drop_next_lf = false;
        self.dispatch(Token::Eof);
    }

    fn end_tokenization(&mut self) {
        log::debug!(
            "tree builder: finished in {} with {} open elements",
            self.mode,
            self.stack.len()
        );
    }

    fn parse_error(&mut self, issue: ParseIssue) {
        if let Some(diagnostics) = self.diagnostics.as_mut() {
            diagnostics.error(issue);
        }
    }

    fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    fn cdata_section_allowed(&self) -> bool {
        self.adjusted_current_node()
            .is_some_and(|node| !node.is_html())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_split_by_kind() {
        let split: Vec<&str> = runs(" \nab c\0\0d").collect();
        assert_eq!(split, vec![" \n", "ab", " ", "c", "\0\0", "d"]);
        assert_eq!(runs("").count(), 0);
    }

    #[test]
    fn fragment_context_picks_tokenizer_state() {
        assert_eq!(
            FragmentContext::html("title").tokenizer_state(true),
            TokenizerState::RCDATA
        );
        assert_eq!(
            FragmentContext::html("noscript").tokenizer_state(false),
            TokenizerState::Data
        );
        assert_eq!(
            FragmentContext::html("noscript").tokenizer_state(true),
            TokenizerState::RAWTEXT
        );
        assert_eq!(
            FragmentContext::foreign("title", Namespace::Svg).tokenizer_state(true),
            TokenizerState::Data
        );
    }

    #[test]
    fn listed_elements_with_form_attribute_are_not_associated() {
        let input = ElementName::classify("input");
        let with_form: Attributes = [("form".to_string(), "f".to_string())]
            .into_iter()
            .collect();
        assert!(is_form_associated(&input, &Attributes::empty()));
        assert!(!is_form_associated(&input, &with_form));
        assert!(is_form_associated(&ElementName::classify("img"), &with_form));
        assert!(!is_form_associated(&ElementName::classify("div"), &Attributes::empty()));
    }
}
