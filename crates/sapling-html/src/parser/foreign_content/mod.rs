//! Foreign content: SVG and MathML subtrees.
//!
//! [§ 13.2.6.5 The rules for parsing tokens in foreign content](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inforeign)
//!
//! Tag-name case fixing and foreign attribute adjustment happen where the
//! element is created, from [`ElementName::camel_case_name`] and
//! [`AttributeName`](crate::names::AttributeName); this module only decides
//! what the token does to the stack.

use crate::error::TreeErrorCode;
use crate::names::{DispatchGroup as G, ElementName, Namespace};
use crate::tokenizer::Tag;

use super::sink::TreeSink;
use super::tree_builder::{RunKind, Token, TreeBuilder};

impl<S: TreeSink> TreeBuilder<S> {
    pub(super) fn process_foreign_content(&mut self, token: Token<'_>) {
        match token {
            Token::Characters(text) => match RunKind::of_run(text) {
                // "A character token that is U+0000 NULL"
                // "Parse error. Insert a U+FFFD REPLACEMENT CHARACTER
                // character."
                RunKind::Null => {
                    self.error(TreeErrorCode::UnexpectedNullCharacter, "in foreign content");
                    let replacement = "\u{FFFD}".repeat(text.len());
                    self.insert_characters(&replacement);
                }
                // "A character token that is one of U+0009 CHARACTER
                // TABULATION, ..."
                // "Insert the token's character."
                RunKind::Whitespace => self.insert_characters(text),
                // "Any other character token"
                // "Insert the token's character. Set the frameset-ok flag to
                // "not ok"."
                RunKind::Text => {
                    self.insert_characters(text);
                    self.frameset_ok = false;
                }
            },

            // "A comment token"
            // "Insert a comment."
            Token::Comment(text) => self.insert_comment(text),

            // "A DOCTYPE token"
            // "Parse error. Ignore the token."
            Token::Doctype(_) => {
                self.error(TreeErrorCode::UnexpectedDoctype, "in foreign content");
            }

            // "A start tag whose tag name is one of: "b", "big",
            // "blockquote", "body", "br", ... "var"; A start tag whose tag
            // name is "font", if the token has any attributes named "color",
            // "face", or "size""
            Token::StartTag(tag) if breaks_out(&tag) => {
                self.break_out_of_foreign_content(Token::StartTag(tag));
            }

            // "An end tag whose tag name is "br", "p""
            // "Parse error. ... (same as the start tags above)"
            Token::EndTag(name) if matches!(name.group(), G::Br | G::P) => {
                self.break_out_of_foreign_content(Token::EndTag(name));
            }

            // "Any other start tag"
            Token::StartTag(tag) => self.foreign_start_tag(tag),

            // "An end tag whose tag name is "script", if the current node is an
            // SVG script element"
            // "Pop the current node off the stack of open elements."
            Token::EndTag(name)
                if name.group() == G::Script
                    && self.current_node().is_some_and(|node| {
                        node.namespace == Namespace::Svg && node.name == name
                    }) =>
            {
                let _ = self.pop();
            }

            // "Any other end tag"
            Token::EndTag(name) => self.foreign_end_tag(name),

            // The dispatcher sends end-of-file to the insertion mode.
            Token::Eof => self.process(self.mode, Token::Eof),
        }
    }

    /// "Parse error. While the current node is not a MathML text integration
    /// point, an HTML integration point, or an element in the HTML namespace,
    /// pop elements from the stack of open elements. Reprocess the token
    /// according to the rules given in the section corresponding to the
    /// current insertion mode in HTML content."
    fn break_out_of_foreign_content(&mut self, token: Token<'_>) {
        self.error(TreeErrorCode::HtmlStartTagInForeignContent, format_args!("{token}"));
        self.pop_while_not(|node| {
            node.is_html()
                || node.is_mathml_text_integration_point()
                || node.is_html_integration_point()
        });
        self.process(self.mode, token);
    }

    fn foreign_start_tag(&mut self, tag: Tag) {
        // "If the adjusted current node is an element in the MathML namespace,
        // adjust MathML attributes for the token. If the adjusted current node
        // is an element in the SVG namespace, and the token's tag name is one
        // of the ones in the first column of the following table, change the
        // tag name to the name given in the corresponding cell in the second
        // column. If the adjusted current node is an element in the SVG
        // namespace, adjust SVG attributes for the token. Adjust foreign
        // attributes for the token. Insert a foreign element for the token,
        // with the adjusted current node's namespace and false."
        let namespace = self
            .adjusted_current_node()
            .map_or(Namespace::Html, |node| node.namespace);
        let self_closing = tag.self_closing;
        let _ = self.insert_element(namespace, tag.name, tag.attributes);

        // "If the token has its self-closing flag set, then run the steps
        // below: If the token's tag name is "script", and the new current node
        // is in the SVG namespace, then acknowledge the token's self-closing
        // flag, and then act as described in the steps for a "script" end tag
        // below. Otherwise, pop the current node off the stack of open elements
        // and acknowledge the token's self-closing flag."
        if self_closing {
            let _ = self.pop();
            self.acknowledge_self_closing();
        }
    }

    fn foreign_end_tag(&mut self, name: ElementName) {
        let Some(top) = self.stack.len().checked_sub(1) else {
            return;
        };

        // STEP 1: "Initialize node to be the current node (the bottommost node
        //          of the stack)."
        // STEP 2: "If node's tag name, converted to ASCII lowercase, is not the
        //          same as the tag name of the token, then this is a parse
        //          error."
        if self.stack[top].name != name {
            self.error(TreeErrorCode::EndTagMismatch, format_args!("</{name}>"));
        }

        let mut index = top;
        loop {
            // STEP 3: "Loop: If node is the topmost element in the stack of
            //          open elements, then return. (fragment case)"
            if index == 0 {
                return;
            }

            // STEP 4: "If node's tag name, converted to ASCII lowercase, is the
            //          same as the tag name of the token, pop elements from the
            //          stack of open elements until node has been popped from
            //          the stack, and then return."
            if self.stack[index].name == name {
                while self.stack.len() > index {
                    let _ = self.pop();
                }
                return;
            }

            // STEP 5: "Set node to the previous entry in the stack of open
            //          elements."
            index -= 1;

            // STEP 6: "If node is not an element in the HTML namespace, return
            //          to the step labeled loop."
            // STEP 7: "Otherwise, process the token according to the rules
            //          given in the section corresponding to the current
            //          insertion mode in HTML content."
            if self.stack[index].is_html() {
                self.process(self.mode, Token::EndTag(name));
                return;
            }
        }
    }
}

/// "A start tag whose tag name is one of: "b", "big", "blockquote", "body",
/// "br", ... "var"; A start tag whose tag name is "font", if the token has
/// any attributes named "color", "face", or "size""
fn breaks_out(tag: &Tag) -> bool {
    if tag.name.group() == G::Font {
        return ["color", "face", "size"]
            .iter()
            .any(|attribute| tag.attributes.get(attribute).is_some());
    }
    tag.name.breaks_out_of_foreign_content()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::Attributes;

    #[test]
    fn font_breaks_out_only_with_presentational_attributes() {
        let plain = Tag::new("font");
        assert!(!breaks_out(&plain));
        let colored = Tag {
            attributes: [("color".to_string(), "red".to_string())]
                .into_iter()
                .collect::<Attributes>(),
            ..Tag::new("font")
        };
        assert!(breaks_out(&colored));
        assert!(breaks_out(&Tag::new("div")));
        assert!(!breaks_out(&Tag::new("mi")));
    }
}
