//! The insertion modes outside the body: document start, `head`, text,
//! the "after" modes and framesets.

use crate::error::TreeErrorCode;
use crate::names::{DispatchGroup as G, DocumentMode, ElementName, Namespace};
use crate::tokenizer::{Attributes, Doctype, Tag, TokenizerState};

use super::insertion_mode::InsertionMode;
use super::quirks::{document_mode_for, is_legacy_doctype};
use super::sink::TreeSink;
use super::stack::StackNode;
use super::tree_builder::{Token, TreeBuilder};

use std::rc::Rc;

impl<S: TreeSink> TreeBuilder<S> {
    pub(super) fn set_document_mode(&mut self, mode: DocumentMode) {
        self.document_mode = mode;
        self.sink.set_document_mode(mode);
    }

    /// Report a DOCTYPE the mode ignores.
    fn ignore_doctype(&mut self, doctype: &Doctype) {
        self.error(
            TreeErrorCode::UnexpectedDoctype,
            format_args!("<!DOCTYPE {}>", doctype.name.as_deref().unwrap_or_default()),
        );
    }

    pub(super) fn ignore_start_tag(&mut self, tag: &Tag) {
        self.error(TreeErrorCode::StrayStartTag, format_args!("<{}>", tag.name));
    }

    pub(super) fn ignore_end_tag(&mut self, name: &ElementName) {
        self.error(TreeErrorCode::StrayEndTag, format_args!("</{name}>"));
    }

    /// [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    pub(super) fn initial_mode(&mut self, token: Token<'_>) {
        match token {
            // "A character token that is one of U+0009 CHARACTER TABULATION, U+000A
            // LINE FEED (LF), U+000C FORM FEED (FF), U+000D CARRIAGE RETURN (CR),
            // or U+0020 SPACE"
            // "Ignore the token."
            _ if token.is_whitespace() => {}

            // "A comment token"
            // "Insert a comment as the last child of the Document object."
            Token::Comment(text) => self.sink.append_comment_to_document(text),

            // "A DOCTYPE token"
            Token::Doctype(doctype) => {
                if is_legacy_doctype(&doctype) {
                    self.error(
                        TreeErrorCode::LegacyDoctype,
                        format_args!("<!DOCTYPE {}>", doctype.name.as_deref().unwrap_or_default()),
                    );
                }

                // "Append a DocumentType node to the Document node, with its name
                // set to the name given in the DOCTYPE token, or the empty string
                // if the name was missing; its public ID set to the public
                // identifier given in the DOCTYPE token, or the empty string if the
                // public identifier was missing; and its system ID set to the
                // system identifier given in the DOCTYPE token, or the empty string
                // if the system identifier was missing."
                self.sink.append_doctype_to_document(
                    doctype.name.as_deref().unwrap_or_default(),
                    doctype.public_id.as_deref().unwrap_or_default(),
                    doctype.system_id.as_deref().unwrap_or_default(),
                );

                let mode = document_mode_for(&doctype, self.options.iframe_srcdoc);
                if mode != DocumentMode::NoQuirks {
                    self.warning(TreeErrorCode::QuirkyDoctype, format_args!("{mode:?}"));
                }
                self.set_document_mode(mode);

                // "Then, switch the insertion mode to "before html"."
                self.switch_to(InsertionMode::BeforeHtml);
            }

            // "Anything else"
            // "If the document is not an iframe srcdoc document, then this is a
            // parse error; if the parser cannot change the mode flag is false, set
            // the Document to quirks mode. In any case, switch the insertion mode
            // to "before html", then reprocess the token."
            token => {
                if !self.options.iframe_srcdoc {
                    self.error(TreeErrorCode::MissingDoctype, "expected <!DOCTYPE html>");
                    self.set_document_mode(DocumentMode::Quirks);
                }
                self.switch_to(InsertionMode::BeforeHtml);
                self.process(InsertionMode::BeforeHtml, token);
            }
        }
    }

    /// [§ 13.2.6.4.2 The "before html" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    pub(super) fn before_html_mode(&mut self, token: Token<'_>) {
        match token {
            // "A DOCTYPE token"
            // "Parse error. Ignore the token."
            Token::Doctype(doctype) => self.ignore_doctype(&doctype),

            // "A comment token"
            // "Insert a comment as the last child of the Document object."
            Token::Comment(text) => self.sink.append_comment_to_document(text),

            // "A character token that is one of U+0009 CHARACTER TABULATION, ..."
            // "Ignore the token."
            _ if token.is_whitespace() => {}

            // "A start tag whose tag name is "html""
            // "Create an element for the token in the HTML namespace, with the
            // Document as the intended parent. Append it to the Document object.
            // Put this element in the stack of open elements. Switch the
            // insertion mode to "before head"."
            Token::StartTag(tag) if tag.name.group() == G::Html => {
                self.insert_root(tag.attributes);
                self.switch_to(InsertionMode::BeforeHead);
            }

            // "Any other end tag"
            // "Parse error. Ignore the token."
            Token::EndTag(name)
                if !matches!(name.group(), G::Head | G::Body | G::Html | G::Br) =>
            {
                self.ignore_end_tag(&name);
            }

            // "Anything else"
            // "Create an html element whose node document is the Document object.
            // Append it to the Document object. Put this element in the stack of
            // open elements. Switch the insertion mode to "before head", then
            // reprocess the token."
            token => {
                self.insert_root(Attributes::empty());
                self.switch_to(InsertionMode::BeforeHead);
                self.process(InsertionMode::BeforeHead, token);
            }
        }
    }

    fn insert_root(&mut self, attributes: Attributes) {
        let handle = self.sink.create_html_element_set_as_root(&attributes);
        self.push(Rc::new(StackNode::new(
            ElementName::classify("html"),
            Namespace::Html,
            handle,
            attributes,
        )));
    }

    /// [§ 13.2.6.4.3 The "before head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode)
    pub(super) fn before_head_mode(&mut self, token: Token<'_>) {
        match token {
            _ if token.is_whitespace() => {}
            Token::Comment(text) => self.insert_comment(text),
            Token::Doctype(doctype) => self.ignore_doctype(&doctype),

            // "A start tag whose tag name is "html""
            // "Process the token using the rules for the "in body" insertion mode."
            Token::StartTag(tag) if tag.name.group() == G::Html => {
                self.process(InsertionMode::InBody, Token::StartTag(tag));
            }

            // "A start tag whose tag name is "head""
            // "Insert an HTML element for the token. Set the head element pointer
            // to the newly created head element. Switch the insertion mode to "in
            // head"."
            Token::StartTag(tag) if tag.name.group() == G::Head => {
                let head = self.insert_html_element(tag);
                self.head = Some(head);
                self.switch_to(InsertionMode::InHead);
            }

            // "Any other end tag"
            // "Parse error. Ignore the token."
            Token::EndTag(name)
                if !matches!(name.group(), G::Head | G::Body | G::Html | G::Br) =>
            {
                self.ignore_end_tag(&name);
            }

            // "Anything else"
            // "Insert an HTML element for a "head" start tag token with no
            // attributes. Set the head element pointer to the newly created head
            // element. Switch the insertion mode to "in head". Reprocess the
            // current token."
            token => {
                let head = self.insert_synthetic_element("head");
                self.head = Some(head);
                self.switch_to(InsertionMode::InHead);
                self.process(InsertionMode::InHead, token);
            }
        }
    }

    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    pub(super) fn in_head_mode(&mut self, token: Token<'_>) {
        match token {
            // "Insert the character."
            Token::Characters(text) if token_is_whitespace(text) => self.insert_characters(text),
            Token::Comment(text) => self.insert_comment(text),
            Token::Doctype(doctype) => self.ignore_doctype(&doctype),
            Token::StartTag(tag) => self.in_head_start_tag(tag),

            // "An end tag whose tag name is "head""
            // "Pop the current node (which will be the head element) off the stack
            // of open elements. Switch the insertion mode to "after head"."
            Token::EndTag(name) if name.group() == G::Head => {
                let _ = self.pop();
                self.switch_to(InsertionMode::AfterHead);
            }

            // "An end tag whose tag name is "template""
            Token::EndTag(name) if name.group() == G::Template => self.close_template(),

            // "Any other end tag"
            // "Parse error. Ignore the token."
            Token::EndTag(name) if !matches!(name.group(), G::Body | G::Html | G::Br) => {
                self.ignore_end_tag(&name);
            }

            token => self.in_head_anything_else(token),
        }
    }

    fn in_head_start_tag(&mut self, tag: Tag) {
        match tag.name.group() {
            // "A start tag whose tag name is "html""
            G::Html => self.process(InsertionMode::InBody, Token::StartTag(tag)),

            // "A start tag whose tag name is one of: "base", "basefont",
            // "bgsound", "link""
            // "Insert an HTML element for the token. Immediately pop the current
            // node off the stack of open elements. Acknowledge the token's
            // self-closing flag, if it is set."
            G::Base => {
                let _ = self.insert_void_element(tag);
            }

            // "A start tag whose tag name is "meta""
            G::Meta => {
                let charset = declared_charset(&tag.attributes);
                let _ = self.insert_void_element(tag);
                // "If the active speculative HTML parser is null, then: If the
                // element has a charset attribute, and getting an encoding from
                // its value results in an encoding, and the confidence is
                // currently tentative, then change the encoding to the resulting
                // encoding. Otherwise, if the element has an http-equiv attribute
                // whose value is an ASCII case-insensitive match for the string
                // "Content-Type", and the element has a content attribute, and
                // applying the algorithm for extracting a character encoding from
                // a meta element to that attribute's value returns an encoding,
                // and the confidence is currently tentative, then change the
                // encoding to the extracted encoding."
                if let Some(charset) = charset
                    && self.sink.internal_encoding_declaration(&charset)
                {
                    log::debug!("tree builder: suspending for charset {charset:?}");
                    self.request_suspension();
                }
            }

            // "A start tag whose tag name is "title""
            // "Follow the generic RCDATA element parsing algorithm."
            G::Title => self.parse_text_element(tag, TokenizerState::RCDATA),

            // "A start tag whose tag name is "noscript", if the scripting flag is
            // enabled; A start tag whose tag name is one of: "noframes", "style""
            // "Follow the generic raw text element parsing algorithm."
            G::Noscript if self.options.scripting_enabled => {
                self.parse_text_element(tag, TokenizerState::RAWTEXT);
            }
            G::Noframes | G::Style => self.parse_text_element(tag, TokenizerState::RAWTEXT),

            // "A start tag whose tag name is "noscript", if the scripting flag is
            // disabled"
            // "Insert an HTML element for the token. Switch the insertion mode to
            // "in head noscript"."
            G::Noscript => {
                let _ = self.insert_html_element(tag);
                self.switch_to(InsertionMode::InHeadNoscript);
            }

            // "A start tag whose tag name is "script""
            // "Insert the newly created element at the adjusted insertion
            // location. Push the element onto the stack of open elements so that
            // it is the new current node. Switch the tokenizer to the script data
            // state. Let the original insertion mode be the current insertion
            // mode. Switch the insertion mode to "text"."
            G::Script => self.parse_text_element(tag, TokenizerState::ScriptData),

            // "A start tag whose tag name is "template""
            // "Insert a marker at the end of the list of active formatting
            // elements. Set the frameset-ok flag to "not ok". Switch the insertion
            // mode to "in template". Push "in template" onto the stack of template
            // insertion modes so that it is the new current template insertion
            // mode."
            G::Template => {
                let _ = self.insert_html_element(tag);
                self.push_marker();
                self.frameset_ok = false;
                self.switch_to(InsertionMode::InTemplate);
                self.template_modes.push(InsertionMode::InTemplate);
            }

            // "A start tag whose tag name is "head""
            // "Parse error. Ignore the token."
            G::Head => self.ignore_start_tag(&tag),

            _ => self.in_head_anything_else(Token::StartTag(tag)),
        }
    }

    /// "Anything else": "Pop the current node (which will be the head element)
    /// off the stack of open elements. Switch the insertion mode to "after
    /// head". Reprocess the token."
    fn in_head_anything_else(&mut self, token: Token<'_>) {
        let _ = self.pop();
        self.switch_to(InsertionMode::AfterHead);
        self.process(InsertionMode::AfterHead, token);
    }

    /// "An end tag whose tag name is "template""
    pub(super) fn close_template(&mut self) {
        // "If there is no template element on the stack of open elements, then
        // this is a parse error; ignore the token."
        if !self.has_template_on_stack() {
            self.error(TreeErrorCode::StrayEndTag, "</template>");
            return;
        }
        // "Generate all implied end tags thoroughly. If the current node is not
        // a template element, then this is a parse error. Pop elements from the
        // stack of open elements until a template element has been popped from
        // the stack. Clear the list of active formatting elements up to the last
        // marker. Pop the current template insertion mode off the stack of
        // template insertion modes. Reset the insertion mode appropriately."
        self.generate_implied_end_tags_thoroughly();
        if !self.current_is(G::Template) {
            self.error(TreeErrorCode::UnclosedElements, "</template>");
        }
        self.pop_until_group(G::Template);
        self.clear_formatting_to_last_marker();
        let _ = self.template_modes.pop();
        self.reset_insertion_mode_appropriately();
    }

    /// [§ 13.2.6.4.5 The "in head noscript" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inheadnoscript)
    pub(super) fn in_head_noscript_mode(&mut self, token: Token<'_>) {
        match token {
            Token::Doctype(doctype) => self.ignore_doctype(&doctype),
            Token::StartTag(tag) if tag.name.group() == G::Html => {
                self.process(InsertionMode::InBody, Token::StartTag(tag));
            }

            // "An end tag whose tag name is "noscript""
            // "Pop the current node (which will be a noscript element) from the
            // stack of open elements; the new current node will be a head element.
            // Switch the insertion mode to "in head"."
            Token::EndTag(name) if name.group() == G::Noscript => {
                let _ = self.pop();
                self.switch_to(InsertionMode::InHead);
            }

            // "A character token that is one of U+0009 CHARACTER TABULATION, ...;
            // A comment token; A start tag whose tag name is one of: "basefont",
            // "bgsound", "link", "meta", "noframes", "style""
            // "Process the token using the rules for the "in head" insertion mode."
            _ if token.is_whitespace() => self.process(InsertionMode::InHead, token),
            Token::Comment(_) => self.process(InsertionMode::InHead, token),
            Token::StartTag(tag)
                if matches!(
                    tag.name.group(),
                    G::Base | G::Meta | G::Noframes | G::Style
                ) && tag.name.name() != "base" =>
            {
                self.process(InsertionMode::InHead, Token::StartTag(tag));
            }

            // "A start tag whose tag name is one of: "head", "noscript""
            // "Parse error. Ignore the token."
            Token::StartTag(tag) if matches!(tag.name.group(), G::Head | G::Noscript) => {
                self.ignore_start_tag(&tag);
            }

            // "Any other end tag"
            // "Parse error. Ignore the token."
            Token::EndTag(name) if name.group() != G::Br => self.ignore_end_tag(&name),

            // "Anything else"
            // "Parse error. Pop the current node (which will be a noscript
            // element) from the stack of open elements; the new current node will
            // be a head element. Switch the insertion mode to "in head". Reprocess
            // the token."
            token => {
                self.error(TreeErrorCode::UnclosedElements, "<noscript>");
                let _ = self.pop();
                self.switch_to(InsertionMode::InHead);
                self.process(InsertionMode::InHead, token);
            }
        }
    }

    /// [§ 13.2.6.4.6 The "after head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    pub(super) fn after_head_mode(&mut self, token: Token<'_>) {
        match token {
            Token::Characters(text) if token_is_whitespace(text) => self.insert_characters(text),
            Token::Comment(text) => self.insert_comment(text),
            Token::Doctype(doctype) => self.ignore_doctype(&doctype),
            Token::StartTag(tag) => match tag.name.group() {
                G::Html => self.process(InsertionMode::InBody, Token::StartTag(tag)),

                // "A start tag whose tag name is "body""
                // "Insert an HTML element for the token. Set the frameset-ok flag
                // to "not ok". Switch the insertion mode to "in body"."
                G::Body => {
                    let _ = self.insert_html_element(tag);
                    self.frameset_ok = false;
                    self.switch_to(InsertionMode::InBody);
                }

                // "A start tag whose tag name is "frameset""
                // "Insert an HTML element for the token. Switch the insertion mode
                // to "in frameset"."
                G::Frameset => {
                    let _ = self.insert_html_element(tag);
                    self.switch_to(InsertionMode::InFrameset);
                }

                // "A start tag whose tag name is one of: "base", "basefont",
                // "bgsound", "link", "meta", "noframes", "script", "style",
                // "template", "title""
                // "Parse error. Push the node pointed to by the head element
                // pointer onto the stack of open elements. Process the token using
                // the rules for the "in head" insertion mode. Remove the node
                // pointed to by the head element pointer from the stack of open
                // elements. (It might not be the current node at this point.)"
                G::Base
                | G::Meta
                | G::Noframes
                | G::Script
                | G::Style
                | G::Template
                | G::Title => {
                    self.error(TreeErrorCode::StrayStartTag, format_args!("<{}> after </head>", tag.name));
                    let Some(head) = self.head.clone() else {
                        self.process(InsertionMode::InHead, Token::StartTag(tag));
                        return;
                    };
                    self.push(Rc::clone(&head));
                    self.process(InsertionMode::InHead, Token::StartTag(tag));
                    self.remove_from_stack(&head);
                }

                // "A start tag whose tag name is "head""
                // "Parse error. Ignore the token."
                G::Head => self.ignore_start_tag(&tag),

                _ => self.after_head_anything_else(Token::StartTag(tag)),
            },

            // "An end tag whose tag name is "template""
            // "Process the token using the rules for the "in head" insertion mode."
            Token::EndTag(name) if name.group() == G::Template => {
                self.process(InsertionMode::InHead, Token::EndTag(name));
            }

            // "Any other end tag"
            Token::EndTag(name) if !matches!(name.group(), G::Body | G::Html | G::Br) => {
                self.ignore_end_tag(&name);
            }

            token => self.after_head_anything_else(token),
        }
    }

    /// "Insert an HTML element for a "body" start tag token with no attributes.
    /// Switch the insertion mode to "in body". Reprocess the current token."
    fn after_head_anything_else(&mut self, token: Token<'_>) {
        let _ = self.insert_synthetic_element("body");
        self.switch_to(InsertionMode::InBody);
        self.process(InsertionMode::InBody, token);
    }

    /// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    pub(super) fn text_mode(&mut self, token: Token<'_>) {
        match token {
            // "A character token"
            // "Insert the token's character."
            Token::Characters(text) => self.insert_characters(text),

            // "An end-of-file token"
            // "Parse error. If the current node is a script element, then set its
            // already started to true. Pop the current node off the stack of open
            // elements. Switch the insertion mode to the original insertion mode
            // and reprocess the token."
            Token::Eof => {
                let name = self
                    .current_node()
                    .map(|node| node.name.to_string())
                    .unwrap_or_default();
                self.error(TreeErrorCode::EofWithOpenElements, format_args!("<{name}>"));
                let _ = self.pop();
                let original = self.original_mode;
                self.switch_to(original);
                self.process(original, Token::Eof);
            }

            // "An end tag whose tag name is "script"; Any other end tag"
            // "Pop the current node off the stack of open elements. Switch the
            // insertion mode to the original insertion mode."
            Token::EndTag(_) => {
                let _ = self.pop();
                let original = self.original_mode;
                self.switch_to(original);
            }

            // The tokenizer produces nothing else in these content models.
            _ => {}
        }
    }

    /// [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
    pub(super) fn after_body_mode(&mut self, token: Token<'_>) {
        match token {
            // "Process the token using the rules for the "in body" insertion mode."
            _ if token.is_whitespace() => self.process(InsertionMode::InBody, token),

            // "A comment token"
            // "Insert a comment as the last child of the first element in the
            // stack of open elements (the html element)."
            Token::Comment(text) => self.insert_comment_in_html(text),

            Token::Doctype(doctype) => self.ignore_doctype(&doctype),
            Token::StartTag(tag) if tag.name.group() == G::Html => {
                self.process(InsertionMode::InBody, Token::StartTag(tag));
            }

            // "An end tag whose tag name is "html""
            // "If the parser was created as part of the HTML fragment parsing
            // algorithm, this is a parse error; ignore the token. (fragment case)
            // Otherwise, switch the insertion mode to "after after body"."
            Token::EndTag(name) if name.group() == G::Html => {
                if self.context.is_some() {
                    self.ignore_end_tag(&name);
                } else {
                    self.switch_to(InsertionMode::AfterAfterBody);
                }
            }

            // "An end-of-file token"
            // "Stop parsing."
            Token::Eof => self.stop_parsing(),

            // "Anything else"
            // "Parse error. Switch the insertion mode to "in body" and reprocess
            // the token."
            token => {
                self.error(TreeErrorCode::UnexpectedContentAfterBody, "content after </body>");
                self.switch_to(InsertionMode::InBody);
                self.process(InsertionMode::InBody, token);
            }
        }
    }

    /// [§ 13.2.6.4.20 The "in frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inframeset)
    pub(super) fn in_frameset_mode(&mut self, token: Token<'_>) {
        match token {
            Token::Characters(text) if token_is_whitespace(text) => self.insert_characters(text),
            Token::Comment(text) => self.insert_comment(text),
            Token::Doctype(doctype) => self.ignore_doctype(&doctype),
            Token::StartTag(tag) => match tag.name.group() {
                G::Html => self.process(InsertionMode::InBody, Token::StartTag(tag)),
                // "A start tag whose tag name is "frameset""
                // "Insert an HTML element for the token."
                G::Frameset => {
                    let _ = self.insert_html_element(tag);
                }
                // "A start tag whose tag name is "frame""
                // "Insert an HTML element for the token. Immediately pop the
                // current node off the stack of open elements. Acknowledge the
                // token's self-closing flag, if it is set."
                G::Frame => {
                    let _ = self.insert_void_element(tag);
                }
                G::Noframes => self.process(InsertionMode::InHead, Token::StartTag(tag)),
                _ => self.ignore_start_tag(&tag),
            },

            // "An end tag whose tag name is "frameset""
            // "If the current node is the root html element, then this is a parse
            // error; ignore the token. (fragment case) Otherwise, pop the current
            // node from the stack of open elements. If the parser was not created
            // as part of the HTML fragment parsing algorithm (fragment case), and
            // the current node is no longer a frameset element, then switch the
            // insertion mode to "after frameset"."
            Token::EndTag(name) if name.group() == G::Frameset => {
                if self.stack.len() <= 1 {
                    self.ignore_end_tag(&name);
                    return;
                }
                let _ = self.pop();
                if self.context.is_none() && !self.current_is(G::Frameset) {
                    self.switch_to(InsertionMode::AfterFrameset);
                }
            }

            // "An end-of-file token"
            // "If the current node is not the root html element, then this is a
            // parse error. Note: The current node can only be the root html
            // element in the fragment case. Stop parsing."
            Token::Eof => {
                if self.stack.len() > 1 {
                    self.error(TreeErrorCode::EofWithOpenElements, "<frameset>");
                }
                self.stop_parsing();
            }

            // "Anything else"
            // "Parse error. Ignore the token."
            Token::EndTag(name) => self.ignore_end_tag(&name),
            Token::Characters(_) => {
                self.error(TreeErrorCode::NonSpaceCharacters, "text in <frameset>");
            }
        }
    }

    /// [§ 13.2.6.4.21 The "after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterframeset)
    pub(super) fn after_frameset_mode(&mut self, token: Token<'_>) {
        match token {
            Token::Characters(text) if token_is_whitespace(text) => self.insert_characters(text),
            Token::Comment(text) => self.insert_comment(text),
            Token::Doctype(doctype) => self.ignore_doctype(&doctype),
            Token::StartTag(tag) => match tag.name.group() {
                G::Html => self.process(InsertionMode::InBody, Token::StartTag(tag)),
                G::Noframes => self.process(InsertionMode::InHead, Token::StartTag(tag)),
                _ => self.ignore_start_tag(&tag),
            },
            // "An end tag whose tag name is "html""
            // "Switch the insertion mode to "after after frameset"."
            Token::EndTag(name) if name.group() == G::Html => {
                self.switch_to(InsertionMode::AfterAfterFrameset);
            }
            Token::EndTag(name) => self.ignore_end_tag(&name),
            Token::Eof => self.stop_parsing(),
            Token::Characters(_) => {
                self.error(TreeErrorCode::NonSpaceCharacters, "text after </frameset>");
            }
        }
    }

    /// [§ 13.2.6.4.22 The "after after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-body-insertion-mode)
    pub(super) fn after_after_body_mode(&mut self, token: Token<'_>) {
        match token {
            // "A comment token"
            // "Insert a comment as the last child of the Document object."
            Token::Comment(text) => self.sink.append_comment_to_document(text),

            // "A DOCTYPE token; A character token that is one of U+0009 CHARACTER
            // TABULATION, ...; A start tag whose tag name is "html""
            // "Process the token using the rules for the "in body" insertion mode."
            _ if token.is_whitespace() => self.process(InsertionMode::InBody, token),
            Token::Doctype(_) => self.process(InsertionMode::InBody, token),
            Token::StartTag(tag) if tag.name.group() == G::Html => {
                self.process(InsertionMode::InBody, Token::StartTag(tag));
            }

            Token::Eof => self.stop_parsing(),

            // "Anything else"
            // "Parse error. Switch the insertion mode to "in body" and reprocess
            // the token."
            token => {
                self.error(TreeErrorCode::UnexpectedContentAfterBody, "content after </html>");
                self.switch_to(InsertionMode::InBody);
                self.process(InsertionMode::InBody, token);
            }
        }
    }

    /// [§ 13.2.6.4.23 The "after after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-frameset-insertion-mode)
    pub(super) fn after_after_frameset_mode(&mut self, token: Token<'_>) {
        match token {
            Token::Comment(text) => self.sink.append_comment_to_document(text),
            _ if token.is_whitespace() => self.process(InsertionMode::InBody, token),
            Token::Doctype(_) => self.process(InsertionMode::InBody, token),
            Token::StartTag(tag) => match tag.name.group() {
                G::Html => self.process(InsertionMode::InBody, Token::StartTag(tag)),
                G::Noframes => self.process(InsertionMode::InHead, Token::StartTag(tag)),
                _ => self.ignore_start_tag(&tag),
            },
            Token::Eof => self.stop_parsing(),
            Token::EndTag(name) => self.ignore_end_tag(&name),
            Token::Characters(_) => {
                self.error(TreeErrorCode::NonSpaceCharacters, "text after </html>");
            }
        }
    }
}

fn token_is_whitespace(text: &str) -> bool {
    Token::Characters(text).is_whitespace()
}

/// The encoding a `meta` element declares, through `charset` or through
/// `http-equiv="content-type"` with a `content` attribute.
fn declared_charset(attributes: &Attributes) -> Option<String> {
    if let Some(charset) = attributes.get("charset") {
        let charset = charset.trim_matches(|c: char| c.is_ascii_whitespace());
        return (!charset.is_empty()).then(|| charset.to_string());
    }
    let is_content_type = attributes
        .get("http-equiv")
        .is_some_and(|value| value.eq_ignore_ascii_case("content-type"));
    if !is_content_type {
        return None;
    }
    attributes.get("content").and_then(charset_from_content)
}

/// [§ 2.5.9 Extracting character encodings from meta elements](https://html.spec.whatwg.org/multipage/urls-and-fetching.html#algorithm-for-extracting-a-character-encoding-from-a-meta-element)
fn charset_from_content(content: &str) -> Option<String> {
    let bytes = content.as_bytes();
    let mut position = 0;
    loop {
        // STEP 2: "Loop: Find the first seven characters in s after position
        //          that are an ASCII case-insensitive match for the word
        //          "charset". If no such match is found, return nothing."
        let found = bytes
            .get(position..)?
            .windows(7)
            .position(|window| window.eq_ignore_ascii_case(b"charset"))?;
        position += found + 7;

        // STEP 3: "Skip any ASCII whitespace that immediately follow the word
        //          "charset" (there might not be any)."
        while bytes.get(position).is_some_and(u8::is_ascii_whitespace) {
            position += 1;
        }

        // STEP 4: "If the next character is not a U+003D EQUALS SIGN (=), then
        //          move position to point just before that next character, and
        //          jump back to the step labeled loop."
        if bytes.get(position) == Some(&b'=') {
            position += 1;
            break;
        }
    }

    // STEP 5: "Skip any ASCII whitespace that immediately follow the equals
    //          sign (there might not be any)."
    while bytes.get(position).is_some_and(u8::is_ascii_whitespace) {
        position += 1;
    }

    // STEP 6: "Process the next character as follows"
    let rest = content.get(position..)?;
    let value = match rest.chars().next()? {
        // "If it is a U+0022 QUOTATION MARK character (") and there is a later
        // U+0022 QUOTATION MARK character (") in s; If it is a U+0027
        // APOSTROPHE character (') and there is a later U+0027 APOSTROPHE
        // character (') in s: Return the result of getting an encoding from
        // the substring that is between this character and the next earliest
        // occurrence of this character."
        quote @ ('"' | '\'') => {
            let inner = &rest[1..];
            &inner[..inner.find(quote)?]
        }
        // "Otherwise: Return the result of getting an encoding from the
        // substring that consists of this character up to but not including
        // the first ASCII whitespace or U+003B SEMICOLON character (;), or the
        // end of s, whichever comes first."
        _ => {
            let end = rest
                .find(|c: char| c.is_ascii_whitespace() || c == ';')
                .unwrap_or(rest.len());
            &rest[..end]
        }
    };
    let value = value.trim_matches(|c: char| c.is_ascii_whitespace());
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charset_from_http_equiv_content() {
        assert_eq!(
            charset_from_content("text/html; charset=windows-1252").as_deref(),
            Some("windows-1252")
        );
        assert_eq!(
            charset_from_content("text/html; CHARSET = \"utf-8\"").as_deref(),
            Some("utf-8")
        );
        assert_eq!(charset_from_content("text/html; charset='koi8-r"), None);
        assert_eq!(charset_from_content("text/html"), None);
        assert_eq!(
            charset_from_content("charsetcharset=latin1;x").as_deref(),
            Some("latin1")
        );
    }

    #[test]
    fn charset_attribute_wins() {
        let attributes: Attributes = [
            ("charset".to_string(), " utf-8 ".to_string()),
            ("http-equiv".to_string(), "content-type".to_string()),
            ("content".to_string(), "text/html; charset=ascii".to_string()),
        ]
        .into_iter()
        .collect();
        assert_eq!(declared_charset(&attributes).as_deref(), Some("utf-8"));
    }
}
