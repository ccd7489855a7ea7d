//! Fragment tree builder.
//!
//! Consumes a token stream and constructs a [`Fragment`]. This is the
//! "in body" slice of the WHATWG tree construction algorithm, which is all
//! an inline payload needs: void elements, implied `</p>` and `</li>`,
//! nested-anchor closing, and the `</br>` quirk. Anything the algorithm
//! has to repair is recorded as a [`ParseIssue`] so configuration checks
//! can reject sloppy payloads.

use std::fmt;

use crate::dom::{Attribute, ElementData, Fragment, NodeId, NodeKind, TagName};
use crate::tokenizer::{StartTagToken, Token};

/// Something the builder had to repair while constructing the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseIssue {
    /// An end tag with no matching open element.
    StrayEndTag(String),
    /// An element closed implicitly (by an ancestor's end tag or by the
    /// end of input) although its end tag is required.
    Unclosed(String),
    /// `<tag/>` on a non-void element. The slash is ignored and the
    /// element stays open.
    SelfClosingNonVoid(String),
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StrayEndTag(name) => write!(f, "stray </{name}>"),
            Self::Unclosed(name) => write!(f, "unclosed <{name}>"),
            Self::SelfClosingNonVoid(name) => write!(f, "<{name}/> on a non-void element"),
        }
    }
}

/// Builds a [`Fragment`] from a token stream.
pub struct TreeBuilder {
    frag: Fragment,
    /// Stack of open element node IDs.
    open_elements: Vec<NodeId>,
    issues: Vec<ParseIssue>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            frag: Fragment::new(),
            open_elements: Vec::new(),
            issues: Vec::new(),
        }
    }

    /// Build a fragment, discarding repair diagnostics.
    pub fn build(tokens: Vec<Token>) -> Fragment {
        Self::build_with_issues(tokens).0
    }

    /// Build a fragment and report every repair the builder made.
    pub fn build_with_issues(tokens: Vec<Token>) -> (Fragment, Vec<ParseIssue>) {
        let mut builder = TreeBuilder::new();
        for token in tokens {
            builder.process_token(token);
        }
        builder.finish()
    }

    fn finish(mut self) -> (Fragment, Vec<ParseIssue>) {
        // Tokens normally end with Eof; close anything left regardless.
        self.close_all_open();
        (self.frag, self.issues)
    }

    // =============================================================
    // Token dispatch
    // =============================================================

    fn process_token(&mut self, token: Token) {
        match token {
            Token::Character(ref s) => self.insert_text(s),
            Token::Comment(text) => {
                let id = self.frag.add_node(NodeKind::Comment(text));
                let parent = self.current_node();
                self.frag.append_child(parent, id);
            },
            Token::StartTag(ref tag) => self.handle_start_tag(tag),
            Token::EndTag(ref tag) => {
                let tag_name = TagName::from_str(&tag.name);
                self.handle_end_tag(&tag_name);
            },
            Token::Eof => self.close_all_open(),
        }
    }

    fn handle_start_tag(&mut self, tag: &StartTagToken) {
        let tag_name = TagName::from_str(&tag.name);

        if tag_name.closes_paragraph() {
            self.close_p_if_in_scope();
        }
        match tag_name {
            TagName::Li => {
                if self.has_list_item_in_scope() {
                    self.close_to_tag(&TagName::Li);
                }
            },
            TagName::A => {
                if self.has_in_scope(&TagName::A) {
                    self.close_to_tag(&TagName::A);
                }
            },
            ref heading if heading.is_heading() => {
                if self.current_tag().is_some_and(TagName::is_heading) {
                    self.open_elements.pop();
                }
            },
            _ => {},
        }

        let id = self.create_element(tag_name.clone(), tag);
        if tag_name.is_void() {
            let parent = self.current_node();
            self.frag.append_child(parent, id);
            return;
        }
        if tag.self_closing {
            self.issues
                .push(ParseIssue::SelfClosingNonVoid(tag_name.as_str().to_string()));
        }
        self.insert_element(id);
    }

    fn handle_end_tag(&mut self, tag_name: &TagName) {
        match tag_name {
            // Browsers read `</br>` as `<br>`.
            TagName::Br => {
                let id = self.frag.add_node(NodeKind::Element(ElementData::new(TagName::Br)));
                let parent = self.current_node();
                self.frag.append_child(parent, id);
            },
            TagName::P if !self.has_in_scope(&TagName::P) => {
                // `</p>` without an open paragraph yields an empty one.
                self.issues.push(ParseIssue::StrayEndTag("p".into()));
                let id = self.frag.add_node(NodeKind::Element(ElementData::new(TagName::P)));
                let parent = self.current_node();
                self.frag.append_child(parent, id);
            },
            _ if tag_name.is_void() => {
                self.issues
                    .push(ParseIssue::StrayEndTag(tag_name.as_str().to_string()));
            },
            _ if self.has_in_scope(tag_name) => self.close_to_tag(tag_name),
            _ => {
                self.issues
                    .push(ParseIssue::StrayEndTag(tag_name.as_str().to_string()));
            },
        }
    }

    // =============================================================
    // Node creation
    // =============================================================

    fn create_element(&mut self, tag_name: TagName, tag: &StartTagToken) -> NodeId {
        let mut data = ElementData::new(tag_name);
        data.attributes = tag
            .attributes
            .iter()
            .map(|attr| Attribute {
                name: attr.name.clone(),
                value: attr.value.clone(),
            })
            .collect();
        self.frag.add_node(NodeKind::Element(data))
    }

    /// Insert an element as the last child of the current node and push
    /// it onto the open elements stack.
    fn insert_element(&mut self, id: NodeId) {
        let parent = self.current_node();
        self.frag.append_child(parent, id);
        self.open_elements.push(id);
    }

    /// Insert text, coalescing into a trailing text node when possible.
    fn insert_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let parent = self.current_node();
        if let Some(&last_child) = self.frag.nodes[parent].children.last()
            && let NodeKind::Text(ref mut existing) = self.frag.nodes[last_child].kind
        {
            existing.push_str(text);
            return;
        }
        let id = self.frag.add_node(NodeKind::Text(text.to_string()));
        self.frag.append_child(parent, id);
    }

    // =============================================================
    // Stack helpers
    // =============================================================

    fn current_node(&self) -> NodeId {
        self.open_elements.last().copied().unwrap_or(self.frag.root)
    }

    fn current_tag(&self) -> Option<&TagName> {
        self.tag_of(self.current_node())
    }

    fn tag_of(&self, node_id: NodeId) -> Option<&TagName> {
        self.frag.element(node_id).map(|e| &e.tag)
    }

    fn has_in_scope(&self, tag: &TagName) -> bool {
        self.open_elements
            .iter()
            .rev()
            .any(|&id| self.tag_of(id) == Some(tag))
    }

    /// Like [`has_in_scope`](Self::has_in_scope) but stops at the nearest
    /// list, so a nested list's first item does not close its parent item.
    fn has_list_item_in_scope(&self) -> bool {
        for &id in self.open_elements.iter().rev() {
            match self.tag_of(id) {
                Some(TagName::Li) => return true,
                Some(TagName::Ul | TagName::Ol) => return false,
                _ => {},
            }
        }
        false
    }

    fn close_p_if_in_scope(&mut self) {
        if self.has_in_scope(&TagName::P) {
            self.close_to_tag(&TagName::P);
        }
    }

    /// Pop elements until one with `tag` has been popped. Elements popped
    /// on the way are implicitly closed.
    fn close_to_tag(&mut self, tag: &TagName) {
        while let Some(id) = self.open_elements.pop() {
            match self.tag_of(id).cloned() {
                Some(t) if &t == tag => return,
                Some(t) => self.note_implicit_close(&t),
                None => {},
            }
        }
    }

    fn close_all_open(&mut self) {
        while let Some(id) = self.open_elements.pop() {
            if let Some(t) = self.tag_of(id).cloned() {
                self.note_implicit_close(&t);
            }
        }
    }

    /// `p` and `li` have optional end tags; anything else closed
    /// implicitly is worth reporting.
    fn note_implicit_close(&mut self, tag: &TagName) {
        if !matches!(tag, TagName::P | TagName::Li) {
            self.issues.push(ParseIssue::Unclosed(tag.as_str().to_string()));
        }
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
