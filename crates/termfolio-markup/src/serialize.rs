//! Fragment serialization back to HTML text.
//!
//! Output is normalized: tag names lowercase, attribute values
//! double-quoted, void elements written without an end tag, comments
//! dropped. Serializing the result of re-parsing serialized output yields
//! the same string.

use crate::dom::{ElementData, Fragment, NodeId, NodeKind};

/// Escape text-node content.
pub fn escape_text(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

/// Escape an attribute value for use inside double quotes.
pub fn escape_attr(value: &str, out: &mut String) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

/// Escape a string for embedding as HTML text.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_text(text, &mut out);
    out
}

/// Write an element's start tag with all of its attributes.
pub(crate) fn write_start_tag(data: &ElementData, out: &mut String) {
    out.push('<');
    out.push_str(data.tag.as_str());
    for attr in &data.attributes {
        out.push(' ');
        out.push_str(&attr.name);
        out.push_str("=\"");
        escape_attr(&attr.value, out);
        out.push('"');
    }
    out.push('>');
}

/// Write an element's end tag. Void elements have none.
pub(crate) fn write_end_tag(data: &ElementData, out: &mut String) {
    if data.tag.is_void() {
        return;
    }
    out.push_str("</");
    out.push_str(data.tag.as_str());
    out.push('>');
}

/// Serialize the whole fragment.
pub fn to_html(frag: &Fragment) -> String {
    let mut out = String::new();
    for &child in frag.top_level() {
        write_node(frag, child, &mut out);
    }
    out
}

/// Serialize a single node and its descendants.
pub fn write_node(frag: &Fragment, id: NodeId, out: &mut String) {
    let node = frag.get(id);
    match &node.kind {
        NodeKind::Text(text) => escape_text(text, out),
        NodeKind::Comment(_) => {},
        NodeKind::Element(data) => {
            write_start_tag(data, out);
            for &child in &node.children {
                write_node(frag, child, out);
            }
            write_end_tag(data, out);
        },
        NodeKind::Root => {
            for &child in &node.children {
                write_node(frag, child, out);
            }
        },
    }
}
