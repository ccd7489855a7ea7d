//! HTML fragment tokenizer, tree builder, serializer, and partial reveal.
//!
//! Payloads are small rich-text fragments (`<b>`, `<a href>`, `<br />`).
//! They are parsed once into an arena [`dom::Fragment`] and then revealed
//! one text character at a time with [`reveal::reveal`], which never
//! produces a dangling open tag.

pub mod dom;
pub mod entities;
pub mod reveal;
pub mod serialize;
pub mod tokenizer;
pub mod tree_builder;

pub use dom::Fragment;
pub use reveal::{Content, reveal, strip_markup, visible_len};
pub use serialize::escape_html;
pub use tree_builder::ParseIssue;

use termfolio_types::error::{Result, TermfolioError};

/// Parse an HTML fragment. Never fails; malformed markup is repaired.
pub fn parse_fragment(html: &str) -> Fragment {
    tree_builder::TreeBuilder::build(tokenizer::tokenize(html))
}

/// Parse an HTML fragment and report every repair the parser made.
pub fn parse_fragment_checked(html: &str) -> (Fragment, Vec<ParseIssue>) {
    tree_builder::TreeBuilder::build_with_issues(tokenizer::tokenize(html))
}

/// Reject markup that only parses after repair (stray or missing end
/// tags).
pub fn validate_markup(html: &str) -> Result<()> {
    let (_, issues) = parse_fragment_checked(html);
    if issues.is_empty() {
        return Ok(());
    }
    log::debug!("markup rejected with {} issue(s)", issues.len());
    let list: Vec<String> = issues.iter().map(ToString::to_string).collect();
    Err(TermfolioError::Markup(list.join(", ")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_markup_validates() {
        assert!(validate_markup("Skills:<br /><b>Rust</b>, <i>Go</i>").is_ok());
        assert!(validate_markup("").is_ok());
        assert!(validate_markup("<ul><li>one<li>two</ul>").is_ok());
    }

    #[test]
    fn repaired_markup_rejected() {
        let err = validate_markup("<i>Edunet<i/>").unwrap_err();
        assert!(matches!(err, TermfolioError::Markup(_)));
        assert!(err.to_string().contains("unclosed <i>"));

        let err = validate_markup("text</b>").unwrap_err();
        assert_eq!(err.to_string(), "markup error: stray </b>");
    }

    #[test]
    fn checked_parse_returns_tree() {
        let (frag, issues) = parse_fragment_checked("<b>x</b>");
        assert!(issues.is_empty());
        assert_eq!(frag.unit_count(), 1);
    }
}
