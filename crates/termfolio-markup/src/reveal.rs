//! Partial reveal of plain text and HTML fragments.
//!
//! A reveal budget counts content units: characters of decoded text. An
//! HTML snapshot holds the first `budget` units in source order, wrapped
//! in every element that encloses or precedes them, with each element
//! closed after its (possibly partial) children. Snapshots are therefore
//! always well-formed, and re-parsing one reproduces the same tree.

use crate::dom::{Fragment, NodeId, NodeKind};
use crate::serialize::{escape_text, to_html, write_end_tag, write_start_tag};
use crate::parse_fragment;

/// Render the first `budget` units of `frag` as HTML.
///
/// A budget covering every unit serializes the whole fragment, including
/// elements that follow the last character (a trailing `<br>`, say).
pub fn reveal(frag: &Fragment, budget: usize) -> String {
    if budget >= frag.unit_count() {
        return to_html(frag);
    }
    let mut out = String::new();
    let mut remaining = budget;
    for &child in frag.top_level() {
        if remaining == 0 {
            break;
        }
        reveal_node(frag, child, &mut remaining, &mut out);
    }
    out
}

fn reveal_node(frag: &Fragment, id: NodeId, remaining: &mut usize, out: &mut String) {
    let node = frag.get(id);
    match &node.kind {
        NodeKind::Text(text) => {
            let len = text.chars().count();
            if len <= *remaining {
                escape_text(text, out);
                *remaining -= len;
            } else {
                let cut = char_boundary(text, *remaining);
                escape_text(&text[..cut], out);
                *remaining = 0;
            }
        },
        NodeKind::Comment(_) => {},
        NodeKind::Element(data) => {
            write_start_tag(data, out);
            for &child in &node.children {
                if *remaining == 0 {
                    break;
                }
                reveal_node(frag, child, remaining, out);
            }
            write_end_tag(data, out);
        },
        NodeKind::Root => {
            for &child in &node.children {
                if *remaining == 0 {
                    break;
                }
                reveal_node(frag, child, remaining, out);
            }
        },
    }
}

/// Byte offset of the `n`th char of `text` (or its length).
fn char_boundary(text: &str, n: usize) -> usize {
    text.char_indices().nth(n).map_or(text.len(), |(i, _)| i)
}

/// The first `budget` characters of plain text.
pub fn reveal_plain(text: &str, budget: usize) -> &str {
    &text[..char_boundary(text, budget)]
}

/// Visible text of an HTML string, markup removed and entities decoded.
pub fn strip_markup(html: &str) -> String {
    let frag = parse_fragment(html);
    frag.text_content(frag.root)
}

/// Number of content units in an HTML string.
pub fn visible_len(html: &str) -> usize {
    parse_fragment(html).unit_count()
}

// ------------------------------------------------------------------
// Content
// ------------------------------------------------------------------

/// Source material for a reveal, parsed once up front.
#[derive(Debug, Clone)]
pub enum Content {
    Plain(String),
    Html(Fragment),
}

impl Content {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::Plain(text.into())
    }

    pub fn html(source: &str) -> Self {
        Self::Html(parse_fragment(source))
    }

    pub fn is_html(&self) -> bool {
        matches!(self, Self::Html(_))
    }

    /// Total number of content units.
    pub fn unit_count(&self) -> usize {
        match self {
            Self::Plain(text) => text.chars().count(),
            Self::Html(frag) => frag.unit_count(),
        }
    }

    /// Snapshot with `budget` units revealed.
    pub fn render(&self, budget: usize) -> String {
        match self {
            Self::Plain(text) => reveal_plain(text, budget).to_string(),
            Self::Html(frag) => reveal(frag, budget),
        }
    }

    /// The full visible text, without markup.
    pub fn visible_text(&self) -> String {
        match self {
            Self::Plain(text) => text.clone(),
            Self::Html(frag) => frag.text_content(frag.root),
        }
    }
}
