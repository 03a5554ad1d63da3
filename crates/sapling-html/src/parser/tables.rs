//! The table, select and template insertion modes.
//!
//! [§ 13.2.6.4.9 The "in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intable)
//! through [§ 13.2.6.4.18 The "in template" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intemplate)

use crate::error::TreeErrorCode;
use crate::names::{DispatchGroup as G, ElementName};
use crate::tokenizer::Tag;

use super::insertion_mode::InsertionMode;
use super::sink::TreeSink;
use super::stack::ScopeKind;
use super::tree_builder::{RunKind, Token, TreeBuilder, runs};

impl<S: TreeSink> TreeBuilder<S> {
    // ----- clearing the stack -----

    /// "clear the stack back to a table context": pop until the current node
    /// is a `table`, `template` or `html` element.
    fn clear_to_table_context(&mut self) {
        self.pop_while_not(|node| node.is(G::Table) || node.is(G::Template) || node.is(G::Html));
    }

    /// "clear the stack back to a table body context": `tbody`, `tfoot`,
    /// `thead`, `template` or `html`.
    fn clear_to_table_body_context(&mut self) {
        self.pop_while_not(|node| {
            node.is(G::TbodyGroup) || node.is(G::Template) || node.is(G::Html)
        });
    }

    /// "clear the stack back to a table row context": `tr`, `template` or
    /// `html`.
    fn clear_to_table_row_context(&mut self) {
        self.pop_while_not(|node| node.is(G::Tr) || node.is(G::Template) || node.is(G::Html));
    }

    /// "in table" "Anything else": "Parse error. Enable foster parenting,
    /// process the token using the rules for the "in body" insertion mode, and
    /// then disable foster parenting."
    fn foster_parent(&mut self, token: Token<'_>) {
        self.error(TreeErrorCode::FosterParented, format_args!("{token} in <table>"));
        self.foster_parenting = true;
        self.process(InsertionMode::InBody, token);
        self.foster_parenting = false;
    }

    /// [§ 13.2.6.4.9 The "in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intable)
    pub(super) fn in_table_mode(&mut self, token: Token<'_>) {
        match token {
            // "A character token, if the current node is table, tbody,
            // template, tfoot, thead, or tr element"
            // "Let the pending table character tokens be an empty list of
            // tokens. Let the original insertion mode be the current insertion
            // mode. Switch the insertion mode to "in table text" and reprocess
            // the token."
            Token::Characters(_)
                if self.current_node().is_some_and(|node| {
                    node.is(G::Table)
                        || node.is(G::TbodyGroup)
                        || node.is(G::Template)
                        || node.is(G::Tr)
                }) =>
            {
                self.pending_table_text.clear();
                self.pending_table_text_is_whitespace = true;
                self.original_mode = self.mode;
                self.switch_to(InsertionMode::InTableText);
                self.process(InsertionMode::InTableText, token);
            }

            // "A comment token"
            // "Insert a comment."
            Token::Comment(text) => self.insert_comment(text),

            // "A DOCTYPE token"
            // "Parse error. Ignore the token."
            Token::Doctype(_) => self.error(TreeErrorCode::UnexpectedDoctype, "in <table>"),

            Token::StartTag(tag) => self.in_table_start_tag(tag),

            // "An end tag whose tag name is "table""
            // "If the stack of open elements does not have a table element in
            // table scope, this is a parse error; ignore the token. Otherwise:
            // Pop elements from this stack until a table element has been
            // popped from the stack. Reset the insertion mode appropriately."
            Token::EndTag(name) if name.group() == G::Table => {
                if !self.has_in_scope(ScopeKind::Table, G::Table) {
                    self.ignore_end_tag(&name);
                    return;
                }
                self.pop_until_group(G::Table);
                self.reset_insertion_mode_appropriately();
            }

            // "An end tag whose tag name is one of: "body", "caption", "col",
            // "colgroup", "html", "tbody", "td", "tfoot", "th", "thead", "tr""
            // "Parse error. Ignore the token."
            Token::EndTag(name)
                if matches!(
                    name.group(),
                    G::Body
                        | G::Caption
                        | G::Col
                        | G::Colgroup
                        | G::Html
                        | G::TbodyGroup
                        | G::TdTh
                        | G::Tr
                ) =>
            {
                self.ignore_end_tag(&name);
            }

            // "An end tag whose tag name is "template""
            // "Process the token using the rules for the "in head" insertion
            // mode."
            Token::EndTag(name) if name.group() == G::Template => {
                self.process(InsertionMode::InHead, Token::EndTag(name));
            }

            // "An end-of-file token"
            // "Process the token using the rules for the "in body" insertion
            // mode."
            Token::Eof => self.process(InsertionMode::InBody, Token::Eof),

            token => self.foster_parent(token),
        }
    }

    fn in_table_start_tag(&mut self, tag: Tag) {
        match tag.name.group() {
            // "A start tag whose tag name is "caption""
            // "Clear the stack back to a table context. Insert a marker at the
            // end of the list of active formatting elements. Insert an HTML
            // element for the token, then switch the insertion mode to "in
            // caption"."
            G::Caption => {
                self.clear_to_table_context();
                self.push_marker();
                let _ = self.insert_html_element(tag);
                self.switch_to(InsertionMode::InCaption);
            }

            // "A start tag whose tag name is "colgroup""
            // "Clear the stack back to a table context. Insert an HTML element
            // for the token, then switch the insertion mode to "in column
            // group"."
            G::Colgroup => {
                self.clear_to_table_context();
                let _ = self.insert_html_element(tag);
                self.switch_to(InsertionMode::InColumnGroup);
            }

            // "A start tag whose tag name is "col""
            // "Clear the stack back to a table context. Insert an HTML element
            // for a "colgroup" start tag token with no attributes, then switch
            // the insertion mode to "in column group". Reprocess the current
            // token."
            G::Col => {
                self.clear_to_table_context();
                let _ = self.insert_synthetic_element("colgroup");
                self.switch_to(InsertionMode::InColumnGroup);
                self.process(InsertionMode::InColumnGroup, Token::StartTag(tag));
            }

            // "A start tag whose tag name is one of: "tbody", "tfoot", "thead""
            // "Clear the stack back to a table context. Insert an HTML element
            // for the token, then switch the insertion mode to "in table
            // body"."
            G::TbodyGroup => {
                self.clear_to_table_context();
                let _ = self.insert_html_element(tag);
                self.switch_to(InsertionMode::InTableBody);
            }

            // "A start tag whose tag name is one of: "td", "th", "tr""
            // "Clear the stack back to a table context. Insert an HTML element
            // for a "tbody" start tag token with no attributes, then switch the
            // insertion mode to "in table body". Reprocess the current token."
            G::TdTh | G::Tr => {
                self.clear_to_table_context();
                let _ = self.insert_synthetic_element("tbody");
                self.switch_to(InsertionMode::InTableBody);
                self.process(InsertionMode::InTableBody, Token::StartTag(tag));
            }

            // "A start tag whose tag name is "table""
            // "Parse error. If the stack of open elements does not have a table
            // element in table scope, ignore the token. Otherwise: Pop elements
            // from this stack until a table element has been popped from the
            // stack. Reset the insertion mode appropriately. Reprocess the
            // token."
            G::Table => {
                self.error(TreeErrorCode::NestedElement, "<table>");
                if !self.has_in_scope(ScopeKind::Table, G::Table) {
                    return;
                }
                self.pop_until_group(G::Table);
                self.reset_insertion_mode_appropriately();
                self.process(self.mode, Token::StartTag(tag));
            }

            // "A start tag whose tag name is one of: "style", "script",
            // "template""
            // "Process the token using the rules for the "in head" insertion
            // mode."
            G::Style | G::Script | G::Template => {
                self.process(InsertionMode::InHead, Token::StartTag(tag));
            }

            // "A start tag whose tag name is "input""
            // "If the token does not have an attribute with the name "type", or
            // if it does, but that attribute's value is not an ASCII
            // case-insensitive match for the string "hidden", then: act as
            // described in the "anything else" entry below. Otherwise: Parse
            // error. Insert an HTML element for the token. Pop that input
            // element off the stack of open elements. Acknowledge the token's
            // self-closing flag, if it is set."
            G::Input
                if tag
                    .attributes
                    .get("type")
                    .is_some_and(|kind| kind.eq_ignore_ascii_case("hidden")) =>
            {
                self.error(TreeErrorCode::FosterParented, "<input type=hidden> in <table>");
                let _ = self.insert_void_element(tag);
            }

            // "A start tag whose tag name is "form""
            // "Parse error. If there is a template element on the stack of open
            // elements, or if the form element pointer is not null, ignore the
            // token. Otherwise: Insert an HTML element for the token, and set
            // the form element pointer to point to the element created. Pop
            // that form element off the stack of open elements."
            G::Form => {
                self.error(TreeErrorCode::FosterParented, "<form> in <table>");
                if self.has_template_on_stack() || self.form.is_some() {
                    return;
                }
                let form = self.insert_html_element(tag);
                self.form = Some(form);
                let _ = self.pop();
            }

            _ => self.foster_parent(Token::StartTag(tag)),
        }
    }

    /// [§ 13.2.6.4.10 The "in table text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intabletext)
    pub(super) fn in_table_text_mode(&mut self, token: Token<'_>) {
        match token {
            // "A character token that is U+0000 NULL"
            // "Parse error. Ignore the token."
            Token::Characters(text) if RunKind::of_run(text) == RunKind::Null => {
                self.error(TreeErrorCode::UnexpectedNullCharacter, "in <table>");
            }

            // "Any other character token"
            // "Append the character token to the pending table character tokens
            // list."
            Token::Characters(text) => {
                if RunKind::of_run(text) == RunKind::Text {
                    self.pending_table_text_is_whitespace = false;
                }
                self.pending_table_text.push_str(text);
            }

            // "Anything else"
            token => {
                self.flush_pending_table_text();
                // "Switch the insertion mode to the original insertion mode and
                // reprocess the token."
                let original = self.original_mode;
                self.switch_to(original);
                self.process(original, token);
            }
        }
    }

    /// "If any of the tokens in the pending table character tokens list are
    /// character tokens that are not ASCII whitespace, then this is a parse
    /// error: reprocess the character tokens in the pending table character
    /// tokens list using the rules given in the "anything else" entry in the
    /// "in table" insertion mode. Otherwise, insert the characters given by
    /// the pending table character tokens list."
    fn flush_pending_table_text(&mut self) {
        let text = std::mem::take(&mut self.pending_table_text);
        let whitespace = std::mem::replace(&mut self.pending_table_text_is_whitespace, true);
        if text.is_empty() {
            return;
        }
        if whitespace {
            self.insert_characters(&text);
            return;
        }
        self.error(TreeErrorCode::FosterParented, "text in <table>");
        self.foster_parenting = true;
        for run in runs(&text) {
            self.process(InsertionMode::InBody, Token::Characters(run));
        }
        self.foster_parenting = false;
    }

    /// [§ 13.2.6.4.11 The "in caption" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incaption)
    pub(super) fn in_caption_mode(&mut self, token: Token<'_>) {
        match token {
            // "An end tag whose tag name is "caption""
            Token::EndTag(name) if name.group() == G::Caption => {
                let _ = self.close_caption();
            }

            // "A start tag whose tag name is one of: "caption", "col",
            // "colgroup", "tbody", "td", "tfoot", "th", "thead", "tr"; An end
            // tag whose tag name is "table""
            // "If the stack of open elements does not have a caption element in
            // table scope, this is a parse error; ignore the token. (fragment
            // case) Otherwise: ... Reprocess the token."
            Token::StartTag(ref tag)
                if matches!(
                    tag.name.group(),
                    G::Caption | G::Col | G::Colgroup | G::TbodyGroup | G::TdTh | G::Tr
                ) =>
            {
                if self.close_caption() {
                    self.process(InsertionMode::InTable, token);
                }
            }
            Token::EndTag(ref name) if name.group() == G::Table => {
                if self.close_caption() {
                    self.process(InsertionMode::InTable, token);
                }
            }

            // "An end tag whose tag name is one of: "body", "col", "colgroup",
            // "html", "tbody", "td", "tfoot", "th", "thead", "tr""
            // "Parse error. Ignore the token."
            Token::EndTag(name)
                if matches!(
                    name.group(),
                    G::Body | G::Col | G::Colgroup | G::Html | G::TbodyGroup | G::TdTh | G::Tr
                ) =>
            {
                self.ignore_end_tag(&name);
            }

            // "Anything else"
            // "Process the token using the rules for the "in body" insertion
            // mode."
            token => self.process(InsertionMode::InBody, token),
        }
    }

    /// "If the stack of open elements does not have a caption element in
    /// table scope, this is a parse error; ignore the token. (fragment case)
    /// Otherwise: Generate implied end tags. Now, if the current node is not a
    /// caption element, then this is a parse error. Pop elements from this
    /// stack until a caption element has been popped from the stack. Clear the
    /// list of active formatting elements up to the last marker. Switch the
    /// insertion mode to "in table"."
    fn close_caption(&mut self) -> bool {
        if !self.has_in_scope(ScopeKind::Table, G::Caption) {
            self.error(TreeErrorCode::StrayEndTag, "</caption>");
            return false;
        }
        self.generate_implied_end_tags(None);
        if !self.current_is(G::Caption) {
            self.error(TreeErrorCode::UnclosedElements, "</caption>");
        }
        self.pop_until_group(G::Caption);
        self.clear_formatting_to_last_marker();
        self.switch_to(InsertionMode::InTable);
        true
    }

    /// [§ 13.2.6.4.12 The "in column group" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incolgroup)
    pub(super) fn in_column_group_mode(&mut self, token: Token<'_>) {
        match token {
            // "Insert the character."
            Token::Characters(text) if RunKind::of_run(text) == RunKind::Whitespace => {
                self.insert_characters(text);
            }
            Token::Comment(text) => self.insert_comment(text),
            Token::Doctype(_) => self.error(TreeErrorCode::UnexpectedDoctype, "in <colgroup>"),
            Token::StartTag(tag) if tag.name.group() == G::Html => {
                self.process(InsertionMode::InBody, Token::StartTag(tag));
            }

            // "A start tag whose tag name is "col""
            // "Insert an HTML element for the token. Immediately pop the current
            // node off the stack of open elements. Acknowledge the token's
            // self-closing flag, if it is set."
            Token::StartTag(tag) if tag.name.group() == G::Col => {
                let _ = self.insert_void_element(tag);
            }

            // "An end tag whose tag name is "colgroup""
            // "If the current node is not a colgroup element, then this is a
            // parse error; ignore the token. Otherwise, pop the current node
            // from the stack of open elements. Switch the insertion mode to "in
            // table"."
            Token::EndTag(name) if name.group() == G::Colgroup => {
                if !self.current_is(G::Colgroup) {
                    self.ignore_end_tag(&name);
                    return;
                }
                let _ = self.pop();
                self.switch_to(InsertionMode::InTable);
            }

            // "An end tag whose tag name is "col""
            // "Parse error. Ignore the token."
            Token::EndTag(name) if name.group() == G::Col => self.ignore_end_tag(&name),

            // "A start tag whose tag name is "template"; An end tag whose tag
            // name is "template""
            // "Process the token using the rules for the "in head" insertion
            // mode."
            Token::StartTag(ref tag) if tag.name.group() == G::Template => {
                self.process(InsertionMode::InHead, token);
            }
            Token::EndTag(ref name) if name.group() == G::Template => {
                self.process(InsertionMode::InHead, token);
            }

            // "An end-of-file token"
            // "Process the token using the rules for the "in body" insertion
            // mode."
            Token::Eof => self.process(InsertionMode::InBody, Token::Eof),

            // "Anything else"
            // "If the current node is not a colgroup element, then this is a
            // parse error; ignore the token. Otherwise, pop the current node
            // from the stack of open elements. Switch the insertion mode to "in
            // table". Reprocess the token."
            token => {
                if !self.current_is(G::Colgroup) {
                    self.error(TreeErrorCode::StrayStartTag, "in <colgroup>");
                    return;
                }
                let _ = self.pop();
                self.switch_to(InsertionMode::InTable);
                self.process(InsertionMode::InTable, token);
            }
        }
    }

    /// [§ 13.2.6.4.13 The "in table body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intbody)
    pub(super) fn in_table_body_mode(&mut self, token: Token<'_>) {
        match token {
            // "A start tag whose tag name is "tr""
            // "Clear the stack back to a table body context. Insert an HTML
            // element for the token, then switch the insertion mode to "in
            // row"."
            Token::StartTag(tag) if tag.name.group() == G::Tr => {
                self.clear_to_table_body_context();
                let _ = self.insert_html_element(tag);
                self.switch_to(InsertionMode::InRow);
            }

            // "A start tag whose tag name is one of: "th", "td""
            // "Parse error. Clear the stack back to a table body context. Insert
            // an HTML element for a "tr" start tag token with no attributes,
            // then switch the insertion mode to "in row". Reprocess the current
            // token."
            Token::StartTag(tag) if tag.name.group() == G::TdTh => {
                self.error(TreeErrorCode::StrayStartTag, format_args!("<{}> without <tr>", tag.name));
                self.clear_to_table_body_context();
                let _ = self.insert_synthetic_element("tr");
                self.switch_to(InsertionMode::InRow);
                self.process(InsertionMode::InRow, Token::StartTag(tag));
            }

            // "An end tag whose tag name is one of: "tbody", "tfoot", "thead""
            // "If the stack of open elements does not have an element in table
            // scope that is an HTML element with the same tag name as the token,
            // this is a parse error; ignore the token. Otherwise: Clear the
            // stack back to a table body context. Pop the current node from the
            // stack of open elements. Switch the insertion mode to "in table"."
            Token::EndTag(name) if name.group() == G::TbodyGroup => {
                if !self.has_named_in_scope(ScopeKind::Table, &name) {
                    self.ignore_end_tag(&name);
                    return;
                }
                self.clear_to_table_body_context();
                let _ = self.pop();
                self.switch_to(InsertionMode::InTable);
            }

            // "A start tag whose tag name is one of: "caption", "col",
            // "colgroup", "tbody", "tfoot", "thead"; An end tag whose tag name
            // is "table""
            // "If the stack of open elements does not have a tbody, thead, or
            // tfoot element in table scope, this is a parse error; ignore the
            // token. Otherwise: Clear the stack back to a table body context.
            // Pop the current node from the stack of open elements. Switch the
            // insertion mode to "in table". Reprocess the token."
            Token::StartTag(ref tag)
                if matches!(
                    tag.name.group(),
                    G::Caption | G::Col | G::Colgroup | G::TbodyGroup
                ) =>
            {
                self.leave_table_body(token);
            }
            Token::EndTag(ref name) if name.group() == G::Table => self.leave_table_body(token),

            // "An end tag whose tag name is one of: "body", "caption", "col",
            // "colgroup", "html", "td", "th", "tr""
            // "Parse error. Ignore the token."
            Token::EndTag(name)
                if matches!(
                    name.group(),
                    G::Body | G::Caption | G::Col | G::Colgroup | G::Html | G::TdTh | G::Tr
                ) =>
            {
                self.ignore_end_tag(&name);
            }

            // "Anything else"
            // "Process the token using the rules for the "in table" insertion
            // mode."
            token => self.process(InsertionMode::InTable, token),
        }
    }

    fn leave_table_body(&mut self, token: Token<'_>) {
        if !self.has_in_scope(ScopeKind::Table, G::TbodyGroup) {
            self.error(TreeErrorCode::StrayEndTag, "no table body in scope");
            return;
        }
        self.clear_to_table_body_context();
        let _ = self.pop();
        self.switch_to(InsertionMode::InTable);
        self.process(InsertionMode::InTable, token);
    }

    /// [§ 13.2.6.4.14 The "in row" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intr)
    pub(super) fn in_row_mode(&mut self, token: Token<'_>) {
        match token {
            // "A start tag whose tag name is one of: "th", "td""
            // "Clear the stack back to a table row context. Insert an HTML
            // element for the token, then switch the insertion mode to "in
            // cell". Insert a marker at the end of the list of active
            // formatting elements."
            Token::StartTag(tag) if tag.name.group() == G::TdTh => {
                self.clear_to_table_row_context();
                let _ = self.insert_html_element(tag);
                self.switch_to(InsertionMode::InCell);
                self.push_marker();
            }

            // "An end tag whose tag name is "tr""
            // "If the stack of open elements does not have a tr element in table
            // scope, this is a parse error; ignore the token. Otherwise: Clear
            // the stack back to a table row context. Pop the current node
            // (which will be a tr element) from the stack of open elements.
            // Switch the insertion mode to "in table body"."
            Token::EndTag(name) if name.group() == G::Tr => {
                let _ = self.close_row();
            }

            // "A start tag whose tag name is one of: "caption", "col",
            // "colgroup", "tbody", "tfoot", "thead", "tr"; An end tag whose tag
            // name is "table""
            // "If the stack of open elements does not have a tr element in table
            // scope, this is a parse error; ignore the token. Otherwise: ...
            // Reprocess the token."
            Token::StartTag(ref tag)
                if matches!(
                    tag.name.group(),
                    G::Caption | G::Col | G::Colgroup | G::TbodyGroup | G::Tr
                ) =>
            {
                if self.close_row() {
                    self.process(InsertionMode::InTableBody, token);
                }
            }
            Token::EndTag(ref name) if name.group() == G::Table => {
                if self.close_row() {
                    self.process(InsertionMode::InTableBody, token);
                }
            }

            // "An end tag whose tag name is one of: "tbody", "tfoot", "thead""
            // "If the stack of open elements does not have an element in table
            // scope that is an HTML element with the same tag name as the token,
            // this is a parse error; ignore the token. If the stack of open
            // elements does not have a tr element in table scope, ignore the
            // token. Otherwise: ... Reprocess the token."
            Token::EndTag(ref name) if name.group() == G::TbodyGroup => {
                if !self.has_named_in_scope(ScopeKind::Table, name) {
                    let name = name.clone();
                    self.ignore_end_tag(&name);
                    return;
                }
                if self.close_row() {
                    self.process(InsertionMode::InTableBody, token);
                }
            }

            // "An end tag whose tag name is one of: "body", "caption", "col",
            // "colgroup", "html", "td", "th""
            // "Parse error. Ignore the token."
            Token::EndTag(name)
                if matches!(
                    name.group(),
                    G::Body | G::Caption | G::Col | G::Colgroup | G::Html | G::TdTh
                ) =>
            {
                self.ignore_end_tag(&name);
            }

            // "Anything else"
            // "Process the token using the rules for the "in table" insertion
            // mode."
            token => self.process(InsertionMode::InTable, token),
        }
    }

    /// Close the current row and go back to "in table body". False (after
    /// reporting) when no `tr` is in table scope.
    fn close_row(&mut self) -> bool {
        if !self.has_in_scope(ScopeKind::Table, G::Tr) {
            self.error(TreeErrorCode::StrayEndTag, "</tr>");
            return false;
        }
        self.clear_to_table_row_context();
        let _ = self.pop();
        self.switch_to(InsertionMode::InTableBody);
        true
    }

    /// [§ 13.2.6.4.15 The "in cell" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intd)
    pub(super) fn in_cell_mode(&mut self, token: Token<'_>) {
        match token {
            // "An end tag whose tag name is one of: "td", "th""
            // "If the stack of open elements does not have an element in table
            // scope that is an HTML element with the same tag name as that of
            // the token, then this is a parse error; ignore the token.
            // Otherwise: Generate implied end tags. Now, if the current node is
            // not an HTML element with the same tag name as the token, then this
            // is a parse error. Pop elements from the stack of open elements
            // until an HTML element with the same tag name as the token has been
            // popped from the stack. Clear the list of active formatting
            // elements up to the last marker. Switch the insertion mode to "in
            // row"."
            Token::EndTag(name) if name.group() == G::TdTh => {
                if !self.has_named_in_scope(ScopeKind::Table, &name) {
                    self.ignore_end_tag(&name);
                    return;
                }
                self.generate_implied_end_tags(None);
                if !self.current_is_named(&name) {
                    self.error(TreeErrorCode::EndTagMismatch, format_args!("</{name}>"));
                }
                self.pop_until_named(&name);
                self.clear_formatting_to_last_marker();
                self.switch_to(InsertionMode::InRow);
            }

            // "A start tag whose tag name is one of: "caption", "col",
            // "colgroup", "tbody", "td", "tfoot", "th", "thead", "tr""
            // "Assert: The stack of open elements has a td or th element in
            // table scope. Close the cell (see below) and reprocess the token."
            Token::StartTag(ref tag)
                if matches!(
                    tag.name.group(),
                    G::Caption | G::Col | G::Colgroup | G::TbodyGroup | G::TdTh | G::Tr
                ) =>
            {
                if !self.has_in_scope(ScopeKind::Table, G::TdTh) {
                    self.error(TreeErrorCode::StrayStartTag, "no cell in scope");
                    return;
                }
                self.close_cell();
                self.process(InsertionMode::InRow, token);
            }

            // "An end tag whose tag name is one of: "body", "caption", "col",
            // "colgroup", "html""
            // "Parse error. Ignore the token."
            Token::EndTag(name)
                if matches!(
                    name.group(),
                    G::Body | G::Caption | G::Col | G::Colgroup | G::Html
                ) =>
            {
                self.ignore_end_tag(&name);
            }

            // "An end tag whose tag name is one of: "table", "tbody", "tfoot",
            // "thead", "tr""
            // "If the stack of open elements does not have an element in table
            // scope that is an HTML element with the same tag name as that of
            // the token, then this is a parse error; ignore the token.
            // Otherwise, close the cell (see below) and reprocess the token."
            Token::EndTag(ref name)
                if matches!(name.group(), G::Table | G::TbodyGroup | G::Tr) =>
            {
                if !self.has_named_in_scope(ScopeKind::Table, name) {
                    let name = name.clone();
                    self.ignore_end_tag(&name);
                    return;
                }
                self.close_cell();
                self.process(InsertionMode::InRow, token);
            }

            // "Anything else"
            // "Process the token using the rules for the "in body" insertion
            // mode."
            token => self.process(InsertionMode::InBody, token),
        }
    }

    /// [§ 13.2.6.4.15](https://html.spec.whatwg.org/multipage/parsing.html#close-the-cell)
    ///
    /// "Generate implied end tags. If the current node is not now a td element
    /// or a th element, then this is a parse error. Pop elements from the stack
    /// of open elements until a td element or a th element has been popped
    /// from the stack. Clear the list of active formatting elements up to the
    /// last marker. Switch the insertion mode to "in row"."
    fn close_cell(&mut self) {
        self.generate_implied_end_tags(None);
        if !self.current_is(G::TdTh) {
            self.error(TreeErrorCode::UnclosedElements, "cell");
        }
        self.pop_until_group(G::TdTh);
        self.clear_formatting_to_last_marker();
        self.switch_to(InsertionMode::InRow);
    }

    /// [§ 13.2.6.4.16 The "in select" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselect)
    pub(super) fn in_select_mode(&mut self, token: Token<'_>) {
        match token {
            // "A character token that is U+0000 NULL"
            // "Parse error. Ignore the token."
            Token::Characters(text) if RunKind::of_run(text) == RunKind::Null => {
                self.error(TreeErrorCode::UnexpectedNullCharacter, "in <select>");
            }

            // "Any other character token"
            // "Insert the token's character."
            Token::Characters(text) => self.insert_characters(text),

            Token::Comment(text) => self.insert_comment(text),
            Token::Doctype(_) => self.error(TreeErrorCode::UnexpectedDoctype, "in <select>"),
            Token::StartTag(tag) => self.in_select_start_tag(tag),

            // "An end tag whose tag name is "optgroup""
            // "First, if the current node is an option element, and the node
            // immediately before it in the stack of open elements is an optgroup
            // element, then pop the current node from the stack of open
            // elements. If the current node is an optgroup element, then pop
            // that node from the stack of open elements. Otherwise, this is a
            // parse error; ignore the token."
            Token::EndTag(name) if name.group() == G::Optgroup => {
                let len = self.stack.len();
                if self.current_is(G::Option)
                    && len >= 2
                    && self.stack[len - 2].is(G::Optgroup)
                {
                    let _ = self.pop();
                }
                if self.current_is(G::Optgroup) {
                    let _ = self.pop();
                } else {
                    self.ignore_end_tag(&name);
                }
            }

            // "An end tag whose tag name is "option""
            // "If the current node is an option element, then pop that node
            // from the stack of open elements. Otherwise, this is a parse error;
            // ignore the token."
            Token::EndTag(name) if name.group() == G::Option => {
                if self.current_is(G::Option) {
                    let _ = self.pop();
                } else {
                    self.ignore_end_tag(&name);
                }
            }

            // "An end tag whose tag name is "select""
            // "If the stack of open elements does not have a select element in
            // select scope, this is a parse error; ignore the token. Otherwise:
            // Pop elements from the stack of open elements until a select
            // element has been popped from the stack. Reset the insertion mode
            // appropriately."
            Token::EndTag(name) if name.group() == G::Select => {
                if !self.close_select() {
                    self.ignore_end_tag(&name);
                }
            }

            // "An end tag whose tag name is "template""
            // "Process the token using the rules for the "in head" insertion
            // mode."
            Token::EndTag(name) if name.group() == G::Template => {
                self.process(InsertionMode::InHead, Token::EndTag(name));
            }

            // "An end-of-file token"
            // "Process the token using the rules for the "in body" insertion
            // mode."
            Token::Eof => self.process(InsertionMode::InBody, Token::Eof),

            // "Anything else"
            // "Parse error. Ignore the token."
            Token::EndTag(name) => self.ignore_end_tag(&name),
        }
    }

    fn in_select_start_tag(&mut self, tag: Tag) {
        match tag.name.group() {
            G::Html => self.process(InsertionMode::InBody, Token::StartTag(tag)),

            // "A start tag whose tag name is "option""
            // "If the current node is an option element, pop that node from the
            // stack of open elements. Insert an HTML element for the token."
            G::Option => {
                if self.current_is(G::Option) {
                    let _ = self.pop();
                }
                let _ = self.insert_html_element(tag);
            }

            // "A start tag whose tag name is "optgroup""
            // "If the current node is an option element, pop that node from the
            // stack of open elements. If the current node is an optgroup
            // element, pop that node from the stack of open elements. Insert an
            // HTML element for the token."
            G::Optgroup => {
                if self.current_is(G::Option) {
                    let _ = self.pop();
                }
                if self.current_is(G::Optgroup) {
                    let _ = self.pop();
                }
                let _ = self.insert_html_element(tag);
            }

            // "A start tag whose tag name is "hr""
            // "If the current node is an option element, pop that node from the
            // stack of open elements. If the current node is an optgroup
            // element, pop that node from the stack of open elements. Insert an
            // HTML element for the token. Immediately pop the current node off
            // the stack of open elements. Acknowledge the token's self-closing
            // flag, if it is set."
            G::Hr => {
                if self.current_is(G::Option) {
                    let _ = self.pop();
                }
                if self.current_is(G::Optgroup) {
                    let _ = self.pop();
                }
                let _ = self.insert_void_element(tag);
            }

            // "A start tag whose tag name is "select""
            // "Parse error. If the stack of open elements does not have a
            // select element in select scope, ignore the token. (fragment case)
            // Otherwise: Pop elements from the stack of open elements until a
            // select element has been popped from the stack. Reset the
            // insertion mode appropriately."
            G::Select => {
                self.error(TreeErrorCode::NestedElement, "<select>");
                let _ = self.close_select();
            }

            // "A start tag whose tag name is one of: "input", "keygen",
            // "textarea""
            // "Parse error. If the stack of open elements does not have a
            // select element in select scope, ignore the token. (fragment case)
            // Otherwise: ... Reprocess the token."
            G::Input | G::Textarea => self.break_out_of_select(tag),
            G::Void if tag.name.name() == "keygen" => self.break_out_of_select(tag),

            // "A start tag whose tag name is one of: "script", "template""
            // "Process the token using the rules for the "in head" insertion
            // mode."
            G::Script | G::Template => self.process(InsertionMode::InHead, Token::StartTag(tag)),

            // "Anything else"
            // "Parse error. Ignore the token."
            _ => self.ignore_start_tag(&tag),
        }
    }

    fn break_out_of_select(&mut self, tag: Tag) {
        self.error(TreeErrorCode::StrayStartTag, format_args!("<{}> in <select>", tag.name));
        if self.close_select() {
            self.process(self.mode, Token::StartTag(tag));
        }
    }

    /// Pop through the `select` and reset the insertion mode. False when no
    /// `select` is in select scope.
    fn close_select(&mut self) -> bool {
        if !self.has_in_scope(ScopeKind::Select, G::Select) {
            return false;
        }
        self.pop_until_group(G::Select);
        self.reset_insertion_mode_appropriately();
        true
    }

    /// [§ 13.2.6.4.17 The "in select in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselectintable)
    pub(super) fn in_select_in_table_mode(&mut self, token: Token<'_>) {
        match token {
            // "A start tag whose tag name is one of: "caption", "table",
            // "tbody", "tfoot", "thead", "tr", "td", "th""
            // "Parse error. Pop elements from the stack of open elements until a
            // select element has been popped from the stack. Reset the
            // insertion mode appropriately. Reprocess the token."
            Token::StartTag(tag) if is_table_part(&tag.name) => {
                self.error(TreeErrorCode::StrayStartTag, format_args!("<{}> in <select>", tag.name));
                self.pop_until_group(G::Select);
                self.reset_insertion_mode_appropriately();
                self.process(self.mode, Token::StartTag(tag));
            }

            // "An end tag whose tag name is one of: "caption", "table",
            // "tbody", "tfoot", "thead", "tr", "td", "th""
            // "Parse error. If the stack of open elements does not have an
            // element in table scope that is an HTML element with the same tag
            // name as that of the token, then ignore the token. Otherwise: Pop
            // elements from the stack of open elements until a select element
            // has been popped from the stack. Reset the insertion mode
            // appropriately. Reprocess the token."
            Token::EndTag(name) if is_table_part(&name) => {
                self.error(TreeErrorCode::StrayEndTag, format_args!("</{name}> in <select>"));
                if !self.has_named_in_scope(ScopeKind::Table, &name) {
                    return;
                }
                self.pop_until_group(G::Select);
                self.reset_insertion_mode_appropriately();
                self.process(self.mode, Token::EndTag(name));
            }

            // "Anything else"
            // "Process the token using the rules for the "in select" insertion
            // mode."
            token => self.in_select_mode(token),
        }
    }

    /// [§ 13.2.6.4.18 The "in template" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intemplate)
    pub(super) fn in_template_mode(&mut self, token: Token<'_>) {
        match token {
            // "A character token; A comment token; A DOCTYPE token"
            // "Process the token using the rules for the "in body" insertion
            // mode."
            Token::Characters(_) | Token::Comment(_) | Token::Doctype(_) => {
                self.process(InsertionMode::InBody, token);
            }

            Token::StartTag(tag) => {
                let mode = match tag.name.group() {
                    // "A start tag whose tag name is one of: "base", "basefont",
                    // "bgsound", "link", "meta", "noframes", "script", "style",
                    // "template", "title""
                    // "Process the token using the rules for the "in head"
                    // insertion mode."
                    G::Base
                    | G::Meta
                    | G::Noframes
                    | G::Script
                    | G::Style
                    | G::Template
                    | G::Title => {
                        self.process(InsertionMode::InHead, Token::StartTag(tag));
                        return;
                    }
                    // "A start tag whose tag name is one of: "caption",
                    // "colgroup", "tbody", "tfoot", "thead""
                    G::Caption | G::Colgroup | G::TbodyGroup => InsertionMode::InTable,
                    // "A start tag whose tag name is "col""
                    G::Col => InsertionMode::InColumnGroup,
                    // "A start tag whose tag name is "tr""
                    G::Tr => InsertionMode::InTableBody,
                    // "A start tag whose tag name is one of: "td", "th""
                    G::TdTh => InsertionMode::InRow,
                    // "Any other start tag"
                    _ => InsertionMode::InBody,
                };
                // "Pop the current template insertion mode off the stack of
                // template insertion modes. Push mode onto the stack of
                // template insertion modes so that it is the new current
                // template insertion mode. Switch the insertion mode to mode,
                // and reprocess the token."
                let _ = self.template_modes.pop();
                self.template_modes.push(mode);
                self.switch_to(mode);
                self.process(mode, Token::StartTag(tag));
            }

            // "An end tag whose tag name is "template""
            Token::EndTag(name) if name.group() == G::Template => {
                self.process(InsertionMode::InHead, Token::EndTag(name));
            }

            // "Any other end tag"
            // "Parse error. Ignore the token."
            Token::EndTag(name) => self.ignore_end_tag(&name),

            // "An end-of-file token"
            Token::Eof => {
                // "If there is no template element on the stack of open
                // elements, then stop parsing. (fragment case)"
                if !self.has_template_on_stack() {
                    self.stop_parsing();
                    return;
                }
                // "Otherwise, this is a parse error. Pop elements from the
                // stack of open elements until a template element has been
                // popped from the stack. Clear the list of active formatting
                // elements up to the last marker. Pop the current template
                // insertion mode off the stack of template insertion modes.
                // Reset the insertion mode appropriately. Reprocess the token."
                self.error(TreeErrorCode::EofWithOpenElements, "<template>");
                self.pop_until_group(G::Template);
                self.clear_formatting_to_last_marker();
                let _ = self.template_modes.pop();
                self.reset_insertion_mode_appropriately();
                self.process(self.mode, Token::Eof);
            }
        }
    }
}

/// `caption`, `table`, `tbody`, `tfoot`, `thead`, `tr`, `td` or `th`.
fn is_table_part(name: &ElementName) -> bool {
    matches!(
        name.group(),
        G::Caption | G::Table | G::TbodyGroup | G::Tr | G::TdTh
    )
}
