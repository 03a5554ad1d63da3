//! [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)

use std::rc::Rc;

use crate::error::TreeErrorCode;
use crate::names::{DispatchGroup as G, DocumentMode, ElementName, Namespace};
use crate::tokenizer::{Attributes, Tag, TokenizerState};

use super::insertion_mode::InsertionMode;
use super::sink::TreeSink;
use super::stack::{FormattingEntry, ScopeKind};
use super::tree_builder::{RunKind, Token, TreeBuilder};

impl<S: TreeSink> TreeBuilder<S> {
    pub(super) fn in_body_mode(&mut self, token: Token<'_>) {
        match token {
            Token::Characters(text) => self.in_body_characters(text),

            // "A comment token"
            // "Insert a comment."
            Token::Comment(text) => self.insert_comment(text),

            // "A DOCTYPE token"
            // "Parse error. Ignore the token."
            Token::Doctype(_) => self.error(TreeErrorCode::UnexpectedDoctype, "in <body>"),

            Token::StartTag(tag) => self.in_body_start_tag(tag),
            Token::EndTag(name) => self.in_body_end_tag(name),

            // "An end-of-file token"
            Token::Eof => {
                // "If the stack of template insertion modes is not empty, then
                // process the token using the rules for the "in template"
                // insertion mode."
                if !self.template_modes.is_empty() {
                    self.process(InsertionMode::InTemplate, Token::Eof);
                    return;
                }
                // "Otherwise, follow these steps: If there is a node in the
                // stack of open elements that is not either a dd element, a dt
                // element, an li element, an optgroup element, an option
                // element, a p element, an rb element, an rp element, an rt
                // element, an rtc element, a tbody element, a td element, a
                // tfoot element, a th element, a thead element, a tr element,
                // the body element, or the html element, then this is a parse
                // error. Stop parsing."
                self.report_unclosed_elements(TreeErrorCode::EofWithOpenElements);
                self.stop_parsing();
            }
        }
    }

    fn in_body_characters(&mut self, text: &str) {
        match RunKind::of_run(text) {
            // "A character token that is U+0000 NULL"
            // "Parse error. Ignore the token."
            RunKind::Null => {
                self.error(TreeErrorCode::UnexpectedNullCharacter, "in <body>");
            }
            // "Reconstruct the active formatting elements, if any. Insert the
            // token's character."
            RunKind::Whitespace => {
                self.reconstruct_formatting();
                self.insert_characters(text);
            }
            // "Any other character token"
            // "Reconstruct the active formatting elements, if any. Insert the
            // token's character. Set the frameset-ok flag to "not ok"."
            RunKind::Text => {
                self.reconstruct_formatting();
                self.insert_characters(text);
                self.frameset_ok = false;
            }
        }
    }

    /// Report `code` once if an element other than those that may be left
    /// open at the end of the body is on the stack.
    pub(super) fn report_unclosed_elements(&mut self, code: TreeErrorCode) {
        let unclosed = self.stack.iter().find(|node| {
            !(node.is_html()
                && (node.has_optional_end_tag()
                    || matches!(
                        node.name.group(),
                        G::TbodyGroup | G::TdTh | G::Tr | G::Body | G::Html
                    )))
        });
        if let Some(node) = unclosed {
            let name = node.name.clone();
            self.error(code, format_args!("<{name}>"));
        }
    }

    fn in_body_start_tag(&mut self, tag: Tag) {
        match tag.name.group() {
            // "A start tag whose tag name is "html""
            // "Parse error. If there is a template element on the stack of open
            // elements, then ignore the token. Otherwise, for each attribute on
            // the token, check to see if the attribute is already present on
            // the top element of the stack of open elements. If it is not, add
            // the attribute and its corresponding value to that element."
            G::Html => {
                self.error(TreeErrorCode::NestedElement, "<html>");
                if self.has_template_on_stack() {
                    return;
                }
                if let Some(html) = self.stack.first().cloned() {
                    self.merge_attributes(&html, &tag.attributes);
                }
            }

            // "A start tag whose tag name is one of: "base", "basefont",
            // "bgsound", "link", "meta", "noframes", "script", "style",
            // "template", "title""
            // "Process the token using the rules for the "in head" insertion
            // mode."
            G::Base | G::Meta | G::Noframes | G::Script | G::Style | G::Template | G::Title => {
                self.process(InsertionMode::InHead, Token::StartTag(tag));
            }

            // "A start tag whose tag name is "body""
            // "Parse error. If the second element on the stack of open elements
            // is not a body element, if the stack of open elements has only one
            // node on it, or if there is a template element on the stack of
            // open elements, then ignore the token. (fragment case or there is
            // a template element on the stack) Otherwise, set the frameset-ok
            // flag to "not ok"; then, for each attribute on the token, check to
            // see if the attribute is already present on the body element (the
            // second element) on the stack of open elements, and if it is not,
            // add the attribute and its corresponding value to that element."
            G::Body => {
                self.error(TreeErrorCode::NestedElement, "<body>");
                let body = self.stack.get(1).filter(|node| node.is(G::Body)).cloned();
                let Some(body) = body else {
                    return;
                };
                if self.has_template_on_stack() {
                    return;
                }
                self.frameset_ok = false;
                self.merge_attributes(&body, &tag.attributes);
            }

            // "A start tag whose tag name is "frameset""
            G::Frameset => {
                self.error(TreeErrorCode::StrayStartTag, "<frameset> in <body>");
                // "If the stack of open elements has only one node on it, or if
                // the second element on the stack of open elements is not a body
                // element, then ignore the token. (fragment case or there is a
                // template element on the stack) If the frameset-ok flag is set
                // to "not ok", ignore the token."
                let body = self.stack.get(1).filter(|node| node.is(G::Body)).cloned();
                let Some(body) = body else {
                    return;
                };
                if !self.frameset_ok {
                    return;
                }
                // "Otherwise, run the following steps: Remove the second element
                // on the stack of open elements from its parent node, if it has
                // one. Pop all the nodes from the bottom of the stack of open
                // elements, from the current node up to, but not including, the
                // root html element. Insert an HTML element for the token.
                // Switch the insertion mode to "in frameset"."
                self.sink.detach_from_parent(&body.handle);
                while self.stack.len() > 1 {
                    let _ = self.pop();
                }
                let _ = self.insert_html_element(tag);
                self.switch_to(InsertionMode::InFrameset);
            }

            // "A start tag whose tag name is one of: "address", "article",
            // "aside", "blockquote", "center", "details", "dialog", "dir",
            // "div", "dl", "fieldset", "figcaption", "figure", "footer",
            // "header", "hgroup", "main", "menu", "nav", "ol", "p", "search",
            // "section", "summary", "ul""
            // "If the stack of open elements has a p element in button scope,
            // then close a p element. Insert an HTML element for the token."
            G::Block | G::List | G::P => {
                self.close_p_in_button_scope();
                let _ = self.insert_html_element(tag);
            }

            // "A start tag whose tag name is one of: "h1", "h2", "h3", "h4",
            // "h5", "h6""
            // "If the stack of open elements has a p element in button scope,
            // then close a p element. If the current node is an HTML element
            // whose tag name is one of "h1", "h2", "h3", "h4", "h5", or "h6",
            // then this is a parse error; pop the current node off the stack of
            // open elements. Insert an HTML element for the token."
            G::Heading => {
                self.close_p_in_button_scope();
                if self.current_is(G::Heading) {
                    self.error(TreeErrorCode::NestedElement, format_args!("<{}>", tag.name));
                    let _ = self.pop();
                }
                let _ = self.insert_html_element(tag);
            }

            // "A start tag whose tag name is one of: "pre", "listing""
            // "If the stack of open elements has a p element in button scope,
            // then close a p element. Insert an HTML element for the token. If
            // the next token is a U+000A LINE FEED (LF) character token, then
            // ignore that token and move on to the next one. (Newlines at the
            // start of pre blocks are ignored as an authoring convenience.) Set
            // the frameset-ok flag to "not ok"."
            G::Pre => {
                self.close_p_in_button_scope();
                let _ = self.insert_html_element(tag);
                self.drop_next_lf = true;
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "form""
            G::Form => {
                // "If the form element pointer is not null, and there is no
                // template element on the stack of open elements, then this is a
                // parse error; ignore the token."
                let has_template = self.has_template_on_stack();
                if self.form.is_some() && !has_template {
                    self.error(TreeErrorCode::NestedElement, "<form>");
                    return;
                }
                // "Otherwise: If the stack of open elements has a p element in
                // button scope, then close a p element. Insert an HTML element
                // for the token, and, if there is no template element on the
                // stack of open elements, set the form element pointer to point
                // to the element created."
                self.close_p_in_button_scope();
                let form = self.insert_html_element(tag);
                if !has_template {
                    self.form = Some(form);
                }
            }

            // "A start tag whose tag name is "li""
            G::Li => self.start_list_item(tag, |name| name.group() == G::Li),

            // "A start tag whose tag name is one of: "dd", "dt""
            G::DdDt => self.start_list_item(tag, |name| name.group() == G::DdDt),

            // "A start tag whose tag name is "plaintext""
            // "If the stack of open elements has a p element in button scope,
            // then close a p element. Insert an HTML element for the token.
            // Switch the tokenizer to the PLAINTEXT state."
            G::Plaintext => {
                self.close_p_in_button_scope();
                let _ = self.insert_html_element(tag);
                self.switch_tokenizer(TokenizerState::PLAINTEXT, None);
            }

            // "A start tag whose tag name is "button""
            G::Button => {
                // "If the stack of open elements has a button element in scope,
                // then run these substeps: Parse error. Generate implied end
                // tags. Pop elements from the stack of open elements until a
                // button element has been popped from the stack."
                if self.has_in_scope(ScopeKind::Default, G::Button) {
                    self.error(TreeErrorCode::NestedElement, "<button>");
                    self.generate_implied_end_tags(None);
                    self.pop_until_group(G::Button);
                }
                // "Reconstruct the active formatting elements, if any. Insert an
                // HTML element for the token. Set the frameset-ok flag to "not
                // ok"."
                self.reconstruct_formatting();
                let _ = self.insert_html_element(tag);
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "a""
            G::A => {
                // "If the list of active formatting elements contains an a
                // element between the end of the list and the last marker on the
                // list (or the start of the list if there is no marker on the
                // list), then this is a parse error; run the adoption agency
                // algorithm for the token, then remove that element from the
                // list of active formatting elements and the stack of open
                // elements if the adoption agency algorithm didn't already
                // remove it (it might not have if the element is not in table
                // scope)."
                let open_a = self
                    .formatting
                    .iter()
                    .rev()
                    .map_while(FormattingEntry::element)
                    .find(|node| node.is(G::A))
                    .cloned();
                if let Some(open_a) = open_a {
                    self.error(TreeErrorCode::NestedElement, "<a>");
                    self.adoption_agency(&tag.name);
                    self.remove_from_formatting(&open_a);
                    self.remove_from_stack(&open_a);
                }
                // "Reconstruct the active formatting elements, if any. Insert an
                // HTML element for the token. Push onto the list of active
                // formatting elements that element."
                self.reconstruct_formatting();
                let a = self.insert_html_element(tag);
                self.push_formatting(a);
            }

            // "A start tag whose tag name is one of: "b", "big", "code", "em",
            // "font", "i", "s", "small", "strike", "strong", "tt", "u""
            G::Formatting | G::Font => {
                self.reconstruct_formatting();
                let element = self.insert_html_element(tag);
                self.push_formatting(element);
            }

            // "A start tag whose tag name is "nobr""
            // "Reconstruct the active formatting elements, if any. If the stack
            // of open elements has a nobr element in scope, then this is a
            // parse error; run the adoption agency algorithm for the token,
            // then once again reconstruct the active formatting elements, if
            // any. Insert an HTML element for the token. Push onto the list of
            // active formatting elements that element."
            G::Nobr => {
                self.reconstruct_formatting();
                if self.has_in_scope(ScopeKind::Default, G::Nobr) {
                    self.error(TreeErrorCode::NestedElement, "<nobr>");
                    self.adoption_agency(&tag.name);
                    self.reconstruct_formatting();
                }
                let nobr = self.insert_html_element(tag);
                self.push_formatting(nobr);
            }

            // "A start tag whose tag name is one of: "applet", "marquee",
            // "object""
            // "Reconstruct the active formatting elements, if any. Insert an
            // HTML element for the token. Insert a marker at the end of the
            // list of active formatting elements. Set the frameset-ok flag to
            // "not ok"."
            G::Applet => {
                self.reconstruct_formatting();
                let _ = self.insert_html_element(tag);
                self.push_marker();
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "table""
            // "If the Document is not set to quirks mode, and the stack of open
            // elements has a p element in button scope, then close a p element.
            // Insert an HTML element for the token. Set the frameset-ok flag to
            // "not ok". Switch the insertion mode to "in table"."
            G::Table => {
                if self.document_mode != DocumentMode::Quirks {
                    self.close_p_in_button_scope();
                }
                let _ = self.insert_html_element(tag);
                self.frameset_ok = false;
                self.switch_to(InsertionMode::InTable);
            }

            // "A start tag whose tag name is one of: "area", "br", "embed",
            // "img", "keygen", "wbr""
            // "Reconstruct the active formatting elements, if any. Insert an
            // HTML element for the token. Immediately pop the current node off
            // the stack of open elements. Acknowledge the token's self-closing
            // flag, if it is set. Set the frameset-ok flag to "not ok"."
            G::Void | G::Br => {
                self.reconstruct_formatting();
                let _ = self.insert_void_element(tag);
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "input""
            // "... If the token does not have an attribute with the name "type",
            // or if it does, but that attribute's value is not an ASCII
            // case-insensitive match for the string "hidden", then: set the
            // frameset-ok flag to "not ok"."
            G::Input => {
                let hidden = tag
                    .attributes
                    .get("type")
                    .is_some_and(|kind| kind.eq_ignore_ascii_case("hidden"));
                self.reconstruct_formatting();
                let _ = self.insert_void_element(tag);
                if !hidden {
                    self.frameset_ok = false;
                }
            }

            // "A start tag whose tag name is one of: "param", "source", "track""
            // "Insert an HTML element for the token. Immediately pop the current
            // node off the stack of open elements. Acknowledge the token's
            // self-closing flag, if it is set."
            G::Param => {
                let _ = self.insert_void_element(tag);
            }

            // "A start tag whose tag name is "hr""
            // "If the stack of open elements has a p element in button scope,
            // then close a p element. Insert an HTML element for the token.
            // Immediately pop the current node off the stack of open elements.
            // Acknowledge the token's self-closing flag, if it is set. Set the
            // frameset-ok flag to "not ok"."
            G::Hr => {
                self.close_p_in_button_scope();
                let _ = self.insert_void_element(tag);
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "image""
            // "Parse error. Change the token's tag name to "img" and reprocess
            // it. (Don't ask.)"
            G::Image => {
                self.error(TreeErrorCode::StrayStartTag, "<image>");
                let img = Tag {
                    name: ElementName::classify("img"),
                    ..tag
                };
                self.in_body_start_tag(img);
            }

            // "A start tag whose tag name is "textarea""
            // "Insert an HTML element for the token. If the next token is a
            // U+000A LINE FEED (LF) character token, then ignore that token and
            // move on to the next one. Switch the tokenizer to the RCDATA
            // state. Let the original insertion mode be the current insertion
            // mode. Set the frameset-ok flag to "not ok". Switch the insertion
            // mode to "text"."
            G::Textarea => {
                self.parse_text_element(tag, TokenizerState::RCDATA);
                self.drop_next_lf = true;
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "xmp""
            // "If the stack of open elements has a p element in button scope,
            // then close a p element. Reconstruct the active formatting
            // elements, if any. Set the frameset-ok flag to "not ok". Follow the
            // generic raw text element parsing algorithm."
            G::Xmp => {
                self.close_p_in_button_scope();
                self.reconstruct_formatting();
                self.frameset_ok = false;
                self.parse_text_element(tag, TokenizerState::RAWTEXT);
            }

            // "A start tag whose tag name is "iframe""
            // "Set the frameset-ok flag to "not ok". Follow the generic raw text
            // element parsing algorithm."
            G::Iframe => {
                self.frameset_ok = false;
                self.parse_text_element(tag, TokenizerState::RAWTEXT);
            }

            // "A start tag whose tag name is "noembed"; A start tag whose tag
            // name is "noscript", if the scripting flag is enabled"
            // "Follow the generic raw text element parsing algorithm."
            G::Noembed => self.parse_text_element(tag, TokenizerState::RAWTEXT),
            G::Noscript if self.options.scripting_enabled => {
                self.parse_text_element(tag, TokenizerState::RAWTEXT);
            }

            // "A start tag whose tag name is "select""
            G::Select => {
                // "Reconstruct the active formatting elements, if any. Insert an
                // HTML element for the token. Set the frameset-ok flag to "not
                // ok". If the insertion mode is one of "in table", "in caption",
                // "in table body", "in row", or "in cell", then switch the
                // insertion mode to "in select in table". Otherwise, switch the
                // insertion mode to "in select"."
                self.reconstruct_formatting();
                let _ = self.insert_html_element(tag);
                self.frameset_ok = false;
                let mode = match self.mode {
                    InsertionMode::InTable
                    | InsertionMode::InCaption
                    | InsertionMode::InTableBody
                    | InsertionMode::InRow
                    | InsertionMode::InCell => InsertionMode::InSelectInTable,
                    _ => InsertionMode::InSelect,
                };
                self.switch_to(mode);
            }

            // "A start tag whose tag name is one of: "optgroup", "option""
            // "If the current node is an option element, then pop the current
            // node off the stack of open elements. Reconstruct the active
            // formatting elements, if any. Insert an HTML element for the
            // token."
            G::Optgroup | G::Option => {
                if self.current_is(G::Option) {
                    let _ = self.pop();
                }
                self.reconstruct_formatting();
                let _ = self.insert_html_element(tag);
            }

            // "A start tag whose tag name is one of: "rb", "rtc""
            // "If the stack of open elements has a ruby element in scope, then
            // generate implied end tags. If the current node is not now a ruby
            // element, this is a parse error. Insert an HTML element for the
            // token."
            G::RbRtc => {
                if self.has_in_scope(ScopeKind::Default, G::Ruby) {
                    self.generate_implied_end_tags(None);
                    if !self.current_is(G::Ruby) {
                        self.error(TreeErrorCode::UnclosedElements, format_args!("<{}>", tag.name));
                    }
                }
                let _ = self.insert_html_element(tag);
            }

            // "A start tag whose tag name is one of: "rp", "rt""
            // "If the stack of open elements has a ruby element in scope, then
            // generate implied end tags, except for rtc elements. If the
            // current node is not now a rtc element or a ruby element, this is
            // a parse error. Insert an HTML element for the token."
            G::RpRt => {
                if self.has_in_scope(ScopeKind::Default, G::Ruby) {
                    let rtc = ElementName::classify("rtc");
                    self.generate_implied_end_tags(Some(&rtc));
                    if !(self.current_is(G::Ruby) || self.current_is_named(&rtc)) {
                        self.error(TreeErrorCode::UnclosedElements, format_args!("<{}>", tag.name));
                    }
                }
                let _ = self.insert_html_element(tag);
            }

            // "A start tag whose tag name is "math""
            // "Reconstruct the active formatting elements, if any. Adjust MathML
            // attributes for the token. Adjust foreign attributes for the
            // token. Insert a foreign element for the token, with MathML
            // namespace and false. If the token has its self-closing flag set,
            // pop the current node off the stack of open elements and
            // acknowledge the token's self-closing flag."
            G::Math => {
                self.reconstruct_formatting();
                self.insert_foreign_element(tag, Namespace::MathMl);
            }

            // "A start tag whose tag name is "svg""
            G::Svg => {
                self.reconstruct_formatting();
                self.insert_foreign_element(tag, Namespace::Svg);
            }

            // "A start tag whose tag name is one of: "caption", "col",
            // "colgroup", "frame", "head", "tbody", "td", "tfoot", "th",
            // "thead", "tr""
            // "Parse error. Ignore the token."
            G::Caption
            | G::Col
            | G::Colgroup
            | G::Frame
            | G::Head
            | G::TbodyGroup
            | G::TdTh
            | G::Tr => self.ignore_start_tag(&tag),

            // "Any other start tag"
            // "Reconstruct the active formatting elements, if any. Insert an
            // HTML element for the token."
            _ => {
                self.reconstruct_formatting();
                let _ = self.insert_html_element(tag);
            }
        }
    }

    /// Insert an element in `namespace`, popping it right away if the tag is
    /// self-closing.
    pub(super) fn insert_foreign_element(&mut self, tag: Tag, namespace: Namespace) {
        let self_closing = tag.self_closing;
        let _ = self.insert_element(namespace, tag.name, tag.attributes);
        if self_closing {
            let _ = self.pop();
            self.acknowledge_self_closing();
        }
    }

    /// The shared steps of "li" and "dd"/"dt".
    fn start_list_item(&mut self, tag: Tag, closes: impl Fn(&ElementName) -> bool) {
        // STEP 1: "Set the frameset-ok flag to "not ok"."
        self.frameset_ok = false;

        // STEP 2-5: "Initialize node to be the current node (the bottommost
        //            node of the stack). Loop: If node is an li element, then
        //            run these substeps: Generate implied end tags, except for
        //            li elements. If the current node is not an li element,
        //            then this is a parse error. Pop elements from the stack of
        //            open elements until an li element has been popped from the
        //            stack. Jump to the step labeled done below. If node is in
        //            the special category, but is not an address, div, or p
        //            element, then jump to the step labeled done below.
        //            Otherwise, set node to the previous entry in the stack of
        //            open elements and return to the step labeled loop."
        let mut close = None;
        for node in self.stack.iter().rev() {
            if node.is_html() && closes(&node.name) {
                close = Some(node.name.clone());
                break;
            }
            if node.is_special()
                && !(node.is(G::P) || matches!(node.name.name(), "address" | "div"))
            {
                break;
            }
        }
        if let Some(name) = close {
            self.generate_implied_end_tags(Some(&name));
            if !self.current_is_named(&name) {
                self.error(TreeErrorCode::UnclosedElements, format_args!("<{name}>"));
            }
            self.pop_until_named(&name);
        }

        // STEP 6: "Done: If the stack of open elements has a p element in
        //          button scope, then close a p element."
        self.close_p_in_button_scope();

        // STEP 7: "Finally, insert an HTML element for the token."
        let _ = self.insert_html_element(tag);
    }

    fn in_body_end_tag(&mut self, name: ElementName) {
        match name.group() {
            // "An end tag whose tag name is "template""
            // "Process the token using the rules for the "in head" insertion
            // mode."
            G::Template => self.process(InsertionMode::InHead, Token::EndTag(name)),

            // "An end tag whose tag name is "body""
            // "If the stack of open elements does not have a body element in
            // scope, this is a parse error; ignore the token. Otherwise, if
            // there is a node in the stack of open elements that is not either
            // a dd element, ... or the html element, then this is a parse
            // error. Switch the insertion mode to "after body"."
            G::Body => {
                if self.close_body() {
                    self.switch_to(InsertionMode::AfterBody);
                }
            }

            // "An end tag whose tag name is "html""
            // "... Switch the insertion mode to "after body". Reprocess the
            // token."
            G::Html => {
                if self.close_body() {
                    self.switch_to(InsertionMode::AfterBody);
                    self.process(InsertionMode::AfterBody, Token::EndTag(name));
                }
            }

            // "An end tag whose tag name is one of: "address", "article",
            // "aside", "blockquote", "button", "center", "details", "dialog",
            // "dir", "div", "dl", "fieldset", "figcaption", "figure", "footer",
            // "header", "hgroup", "listing", "main", "menu", "nav", "ol",
            // "pre", "search", "section", "summary", "ul""
            // "If the stack of open elements does not have an element in scope
            // that is an HTML element with the same tag name as that of the
            // token, then this is a parse error; ignore the token. Otherwise,
            // run these steps: Generate implied end tags. If the current node is
            // not an HTML element with the same tag name as that of the token,
            // then this is a parse error. Pop elements from the stack of open
            // elements until an HTML element with the same tag name as the
            // token has been popped from the stack."
            G::Block | G::List | G::Pre | G::Button => {
                if !self.has_named_in_scope(ScopeKind::Default, &name) {
                    self.ignore_end_tag(&name);
                    return;
                }
                self.close_named(&name, None);
            }

            // "An end tag whose tag name is "form""
            G::Form => self.end_form(),

            // "An end tag whose tag name is "p""
            // "If the stack of open elements does not have a p element in
            // button scope, then this is a parse error; insert an HTML element
            // for a "p" start tag token with no attributes. Close a p element."
            G::P => {
                if !self.has_in_scope(ScopeKind::Button, G::P) {
                    self.error(TreeErrorCode::StrayEndTag, "</p>");
                    let _ = self.insert_synthetic_element("p");
                }
                self.close_p_element();
            }

            // "An end tag whose tag name is "li""
            // "If the stack of open elements does not have an li element in
            // list item scope, then this is a parse error; ignore the token.
            // Otherwise, run these steps: Generate implied end tags, except for
            // li elements. ..."
            G::Li => {
                if !self.has_in_scope(ScopeKind::ListItem, G::Li) {
                    self.ignore_end_tag(&name);
                    return;
                }
                self.close_named(&name, Some(&name));
            }

            // "An end tag whose tag name is one of: "dd", "dt""
            G::DdDt => {
                if !self.has_named_in_scope(ScopeKind::Default, &name) {
                    self.ignore_end_tag(&name);
                    return;
                }
                self.close_named(&name, Some(&name));
            }

            // "An end tag whose tag name is one of: "h1", "h2", "h3", "h4",
            // "h5", "h6""
            // "If the stack of open elements does not have an element in scope
            // that is an HTML element and whose tag name is one of "h1", "h2",
            // "h3", "h4", "h5", or "h6", then this is a parse error; ignore the
            // token. Otherwise, run these steps: Generate implied end tags. If
            // the current node is not an HTML element with the same tag name as
            // that of the token, then this is a parse error. Pop elements from
            // the stack of open elements until an HTML element whose tag name is
            // one of "h1", "h2", "h3", "h4", "h5", or "h6" has been popped from
            // the stack."
            G::Heading => {
                if !self.has_in_scope(ScopeKind::Default, G::Heading) {
                    self.ignore_end_tag(&name);
                    return;
                }
                self.generate_implied_end_tags(None);
                if !self.current_is_named(&name) {
                    self.error(TreeErrorCode::EndTagMismatch, format_args!("</{name}>"));
                }
                self.pop_until_group(G::Heading);
            }

            // "An end tag whose tag name is one of: "a", "b", "big", "code",
            // "em", "font", "i", "nobr", "s", "small", "strike", "strong",
            // "tt", "u""
            // "Run the adoption agency algorithm for the token."
            G::A | G::Formatting | G::Font | G::Nobr => self.adoption_agency(&name),

            // "An end tag token whose tag name is one of: "applet", "marquee",
            // "object""
            // "If the stack of open elements does not have an element in scope
            // that is an HTML element with the same tag name as that of the
            // token, then this is a parse error; ignore the token. Otherwise,
            // run these steps: Generate implied end tags. If the current node is
            // not an HTML element with the same tag name as that of the token,
            // then this is a parse error. Pop elements from the stack of open
            // elements until an HTML element with the same tag name as the
            // token has been popped from the stack. Clear the list of active
            // formatting elements up to the last marker."
            G::Applet => {
                if !self.has_named_in_scope(ScopeKind::Default, &name) {
                    self.ignore_end_tag(&name);
                    return;
                }
                self.close_named(&name, None);
                self.clear_formatting_to_last_marker();
            }

            // "An end tag whose tag name is "br""
            // "Parse error. Drop the attributes from the token, and act as
            // described in the next entry; i.e. act as if this was a "br" start
            // tag token with no attributes, rather than the end tag token that
            // it actually is."
            G::Br => {
                self.error(TreeErrorCode::StrayEndTag, "</br>");
                self.reconstruct_formatting();
                let _ = self.insert_void_element(Tag {
                    name,
                    attributes: Attributes::empty(),
                    self_closing: false,
                });
                self.frameset_ok = false;
            }

            // "Any other end tag"
            _ => self.any_other_end_tag(&name),
        }
    }

    /// The checks shared by `</body>` and `</html>`. False when the token is
    /// ignored.
    fn close_body(&mut self) -> bool {
        if !self.has_in_scope(ScopeKind::Default, G::Body) {
            self.error(TreeErrorCode::StrayEndTag, "</body>");
            return false;
        }
        self.report_unclosed_elements(TreeErrorCode::UnclosedElements);
        true
    }

    /// Generate implied end tags (sparing `except`), complain if the current
    /// node is not `name`, then pop through `name`.
    fn close_named(&mut self, name: &ElementName, except: Option<&ElementName>) {
        self.generate_implied_end_tags(except);
        if !self.current_is_named(name) {
            self.error(TreeErrorCode::EndTagMismatch, format_args!("</{name}>"));
        }
        self.pop_until_named(name);
    }

    /// "An end tag whose tag name is "form""
    fn end_form(&mut self) {
        if !self.has_template_on_stack() {
            // "If there is no template element on the stack of open elements,
            // then run these substeps: Let node be the element that the form
            // element pointer is set to, or null if it is not set to an
            // element. Set the form element pointer to null. If node is null or
            // if the stack of open elements does not have node in scope, then
            // this is a parse error; return and ignore the token. Generate
            // implied end tags. If the current node is not node, then this is a
            // parse error. Remove node from the stack of open elements."
            let node = self.form.take();
            let Some(node) = node.filter(|form| {
                self.in_scope(ScopeKind::Default, |open| Rc::ptr_eq(open, form))
            }) else {
                self.error(TreeErrorCode::StrayEndTag, "</form>");
                return;
            };
            self.generate_implied_end_tags(None);
            if !self.current_node().is_some_and(|current| Rc::ptr_eq(current, &node)) {
                self.error(TreeErrorCode::EndTagMismatch, "</form>");
            }
            self.remove_from_stack(&node);
        } else {
            // "If there is a template element on the stack of open elements,
            // then run these substeps instead: If the stack of open elements
            // does not have a form element in scope, then this is a parse
            // error; return and ignore the token. Generate implied end tags. If
            // the current node is not a form element, then this is a parse
            // error. Pop elements from the stack of open elements until a form
            // element has been popped from the stack."
            if !self.has_in_scope(ScopeKind::Default, G::Form) {
                self.error(TreeErrorCode::StrayEndTag, "</form>");
                return;
            }
            self.generate_implied_end_tags(None);
            if !self.current_is(G::Form) {
                self.error(TreeErrorCode::EndTagMismatch, "</form>");
            }
            self.pop_until_group(G::Form);
        }
    }
}
