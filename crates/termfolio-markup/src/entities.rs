// Named character references.
//
// Payloads are hand-written portfolio text, so the table holds the XML
// predefined names plus the typography and symbol references that such text
// uses. Names are case-sensitive.

/// Sorted by name for [`lookup_entity`].
const ENTITIES: &[(&str, &str)] = &[
    ("amp", "&"),
    ("apos", "'"),
    ("bull", "\u{2022}"),
    ("check", "\u{2713}"),
    ("copy", "\u{00A9}"),
    ("darr", "\u{2193}"),
    ("deg", "\u{00B0}"),
    ("emsp", "\u{2003}"),
    ("ensp", "\u{2002}"),
    ("euro", "\u{20AC}"),
    ("gt", ">"),
    ("hellip", "\u{2026}"),
    ("laquo", "\u{00AB}"),
    ("larr", "\u{2190}"),
    ("ldquo", "\u{201C}"),
    ("lsquo", "\u{2018}"),
    ("lt", "<"),
    ("mdash", "\u{2014}"),
    ("middot", "\u{00B7}"),
    ("nbsp", "\u{00A0}"),
    ("ndash", "\u{2013}"),
    ("pound", "\u{00A3}"),
    ("quot", "\""),
    ("raquo", "\u{00BB}"),
    ("rarr", "\u{2192}"),
    ("rdquo", "\u{201D}"),
    ("reg", "\u{00AE}"),
    ("rsquo", "\u{2019}"),
    ("star", "\u{2606}"),
    ("thinsp", "\u{2009}"),
    ("times", "\u{00D7}"),
    ("trade", "\u{2122}"),
    ("uarr", "\u{2191}"),
    ("zwj", "\u{200D}"),
    ("zwnj", "\u{200C}"),
];

/// Expansion of `&name;`, given the bare name.
pub fn lookup_entity(name: &str) -> Option<&'static str> {
    ENTITIES
        .binary_search_by(|(key, _)| (*key).cmp(name))
        .ok()
        .map(|index| ENTITIES[index].1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted() {
        assert!(ENTITIES.windows(2).all(|pair| pair[0].0 < pair[1].0));
    }

    #[test]
    fn known_names() {
        assert_eq!(lookup_entity("amp"), Some("&"));
        assert_eq!(lookup_entity("quot"), Some("\""));
        assert_eq!(lookup_entity("nbsp"), Some("\u{00A0}"));
        assert_eq!(lookup_entity("ndash"), Some("\u{2013}"));
        assert_eq!(lookup_entity("zwnj"), Some("\u{200C}"));
    }

    #[test]
    fn unknown_or_wrong_case() {
        assert_eq!(lookup_entity("AMP"), None);
        assert_eq!(lookup_entity("Copy"), None);
        assert_eq!(lookup_entity("notareal"), None);
        assert_eq!(lookup_entity(""), None);
    }
}
