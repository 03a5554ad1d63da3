//! [§ 13.2.6.4.7 The adoption agency algorithm](https://html.spec.whatwg.org/multipage/parsing.html#adoption-agency-algorithm)
//!
//! Repairs misnested formatting elements such as `<b><p></b></p>`.

use std::rc::Rc;

use crate::error::TreeErrorCode;
use crate::names::ElementName;

use super::sink::TreeSink;
use super::stack::{FormattingEntry, ScopeKind};
use super::tree_builder::TreeBuilder;

impl<S: TreeSink> TreeBuilder<S> {
    /// Run the adoption agency algorithm for an end tag called `subject`.
    pub(super) fn adoption_agency(&mut self, subject: &ElementName) {
        // STEP 2: "If the current node is an HTML element whose tag name is
        //          subject, and the current node is not in the list of active
        //          formatting elements, then pop the current node off the stack
        //          of open elements and return."
        if let Some(current) = self.current_node()
            && current.is_named(subject)
            && self.formatting_index(current).is_none()
        {
            let _ = self.pop();
            return;
        }

        // STEP 3-6: "Let outer loop counter be 0. Outer loop: If outer loop
        //            counter is greater than or equal to 8, then return.
        //            Increment outer loop counter by 1."
        for _ in 0..8 {
            // STEP 7: "Let formatting element be the last element in the list
            //          of active formatting elements that: is between the end of
            //          the list and the last marker in the list, if any, or the
            //          start of the list otherwise, and has the tag name subject."
            let mut found = None;
            for (index, entry) in self.formatting.iter().enumerate().rev() {
                match entry {
                    FormattingEntry::Marker => break,
                    FormattingEntry::Element(node) if node.name == *subject => {
                        found = Some((index, Rc::clone(node)));
                        break;
                    }
                    FormattingEntry::Element(_) => {}
                }
            }

            // "If there is no such element, then return and instead act as
            // described in the "any other end tag" entry above."
            let Some((formatting_index, formatting_element)) = found else {
                self.any_other_end_tag(subject);
                return;
            };

            // STEP 8: "If formatting element is not in the stack of open
            //          elements, then this is a parse error; remove the element
            //          from the list, and return."
            let Some(stack_index) = self
                .stack
                .iter()
                .position(|node| Rc::ptr_eq(node, &formatting_element))
            else {
                self.error(TreeErrorCode::FormattingElementNotOpen, format_args!("</{subject}>"));
                let _ = self.formatting.remove(formatting_index);
                return;
            };

            // STEP 9: "If formatting element is in the stack of open elements,
            //          but the element is not in scope, then this is a parse
            //          error; return."
            if !self.in_scope(ScopeKind::Default, |node| Rc::ptr_eq(node, &formatting_element)) {
                self.error(
                    TreeErrorCode::FormattingElementNotInScope,
                    format_args!("</{subject}>"),
                );
                return;
            }

            // STEP 10: "If formatting element is not the current node, this is
            //           a parse error. (But do not return.)"
            if stack_index + 1 != self.stack.len() {
                self.error(TreeErrorCode::MisnestedFormatting, format_args!("</{subject}>"));
            }

            // STEP 11: "Let furthest block be the topmost node in the stack of
            //           open elements that is lower in the stack than formatting
            //           element, and is an element in the special category."
            let furthest_index = (stack_index + 1..self.stack.len())
                .find(|&index| self.stack[index].is_special());

            // STEP 12: "If there is no furthest block, then the UA must first
            //           pop all the nodes from the bottom of the stack of open
            //           elements, from the current node up to and including
            //           formatting element, then remove formatting element from
            //           the list of active formatting elements, and finally
            //           return."
            let Some(furthest_index) = furthest_index else {
                while self.stack.len() > stack_index {
                    let _ = self.pop();
                }
                let _ = self.formatting.remove(formatting_index);
                return;
            };
            let furthest_block = Rc::clone(&self.stack[furthest_index]);

            // STEP 13: "Let common ancestor be the element immediately above
            //           formatting element in the stack of open elements."
            let Some(common_ancestor) = stack_index
                .checked_sub(1)
                .map(|above| Rc::clone(&self.stack[above]))
            else {
                return;
            };

            // STEP 14: "Let a bookmark note the position of formatting element
            //           in the list of active formatting elements relative to
            //           the elements on either side of it in the list."
            let mut bookmark = formatting_index;

            // STEP 15: "Let node and last node be furthest block."
            let mut node_index = furthest_index;
            let mut last_node = Rc::clone(&furthest_block);

            // STEP 16-17: "Let inner loop counter be 0. Inner loop: Increment
            //              inner loop counter by 1."
            let mut inner = 0;
            loop {
                inner += 1;

                // "Let node be the element immediately above node in the stack
                // of open elements, or if node is no longer in the stack of
                // open elements (e.g. because it got removed by this
                // algorithm), the element that was immediately above node in
                // the stack of open elements before node was removed."
                node_index -= 1;
                let node = Rc::clone(&self.stack[node_index]);

                // "If node is formatting element, then break."
                if Rc::ptr_eq(&node, &formatting_element) {
                    break;
                }

                // "If inner loop counter is greater than 3 and node is in the
                // list of active formatting elements, then remove node from the
                // list of active formatting elements."
                let mut node_formatting_index = self.formatting_index(&node);
                if inner > 3
                    && let Some(index) = node_formatting_index.take()
                {
                    let _ = self.formatting.remove(index);
                    if index < bookmark {
                        bookmark -= 1;
                    }
                }

                // "If node is not in the list of active formatting elements,
                // then remove node from the stack of open elements and continue."
                let Some(node_formatting_index) = node_formatting_index else {
                    let removed = self.stack.remove(node_index);
                    self.sink.element_popped(&removed.handle);
                    continue;
                };

                // "Create an element for the token for which the element node
                // was created, in the HTML namespace, with common ancestor as
                // the intended parent; replace the entry for node in the list
                // of active formatting elements with an entry for the new
                // element, replace the entry for node in the stack of open
                // elements with an entry for the new element, and let node be
                // the new element."
                let new = self.create_element(node.namespace, node.name.clone(), node.attributes.clone());
                self.formatting[node_formatting_index] = FormattingEntry::Element(Rc::clone(&new));
                self.sink.element_popped(&node.handle);
                self.sink.element_pushed(&new.handle);
                self.stack[node_index] = Rc::clone(&new);

                // "If last node is furthest block, then move the aforementioned
                // bookmark to be immediately after the new node in the list of
                // active formatting elements."
                if Rc::ptr_eq(&last_node, &furthest_block) {
                    bookmark = node_formatting_index + 1;
                }

                // "Append last node to node."
                self.sink.append_element(&last_node.handle, &new.handle);

                // "Set last node to node."
                last_node = new;
            }

            // STEP 18: "Insert whatever last node ended up being in the previous
            //           step at the appropriate place for inserting a node, but
            //           using common ancestor as the override target."
            if let Some(place) = self.appropriate_place(Some(&common_ancestor)) {
                self.insert_at(place, &last_node.handle);
            }

            // STEP 19: "Create an element for the token for which formatting
            //           element was created, in the HTML namespace, with
            //           furthest block as the intended parent."
            let new = self.create_element(
                formatting_element.namespace,
                formatting_element.name.clone(),
                formatting_element.attributes.clone(),
            );

            // STEP 20: "Take all of the child nodes of furthest block and append
            //           them to the element created in the last step."
            self.sink
                .append_children_to_new_parent(&furthest_block.handle, &new.handle);

            // STEP 21: "Append that new element to furthest block."
            self.sink.append_element(&new.handle, &furthest_block.handle);

            // STEP 22: "Remove formatting element from the list of active
            //           formatting elements, and insert the new element into
            //           the list of active formatting elements at the position
            //           of the aforementioned bookmark."
            if let Some(old_index) = self.formatting_index(&formatting_element) {
                let _ = self.formatting.remove(old_index);
                if old_index < bookmark {
                    bookmark -= 1;
                }
            }
            let bookmark = bookmark.min(self.formatting.len());
            self.formatting
                .insert(bookmark, FormattingEntry::Element(Rc::clone(&new)));

            // STEP 23: "Remove formatting element from the stack of open
            //           elements, and insert the new element into the stack of
            //           open elements immediately below the position of furthest
            //           block in that stack."
            self.remove_from_stack(&formatting_element);
            let below_furthest = self
                .stack
                .iter()
                .position(|node| Rc::ptr_eq(node, &furthest_block))
                .map_or(self.stack.len(), |index| index + 1);
            self.sink.element_pushed(&new.handle);
            self.stack.insert(below_furthest, new);
        }
    }

    /// [§ 13.2.6.4.7](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    /// "Any other end tag"
    pub(super) fn any_other_end_tag(&mut self, name: &ElementName) {
        // STEP 1: "Initialize node to be the current node (the bottommost node
        //          of the stack)."
        for index in (0..self.stack.len()).rev() {
            let node = Rc::clone(&self.stack[index]);
            // STEP 2: "Loop: If node is an HTML element with the same tag name
            //          as the token, then: Generate implied end tags, except for
            //          HTML elements with the same tag name as the token. If node
            //          is not the current node, then this is a parse error. Pop
            //          all the nodes from the current node up to node, including
            //          node, then stop these steps."
            if node.is_named(name) {
                self.generate_implied_end_tags(Some(name));
                if !self.current_node().is_some_and(|current| Rc::ptr_eq(current, &node)) {
                    self.error(TreeErrorCode::EndTagMismatch, format_args!("</{name}>"));
                }
                while self.stack.len() > index {
                    let _ = self.pop();
                }
                return;
            }
            // STEP 3: "Otherwise, if node is in the special category, then this
            //          is a parse error; ignore the token, and return."
            if node.is_special() {
                self.error(TreeErrorCode::StrayEndTag, format_args!("</{name}>"));
                return;
            }
        }
    }
}
