//! Fragment tokenizer.
//!
//! A forward-only scanner over the payload string. It understands what the
//! portfolio payloads contain: tags with quoted, unquoted and boolean
//! attributes, comments, and character references. Declarations such as
//! `<!DOCTYPE>` and processing instructions come out as comments. The
//! scanner accepts any input; a tag cut off by the end of input is dropped.

use crate::entities::lookup_entity;

const REPLACEMENT: char = '\u{FFFD}';

/// A single token.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    StartTag(StartTagToken),
    EndTag(EndTagToken),
    /// Decoded text. Adjacent runs are merged.
    Character(String),
    Comment(String),
    Eof,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StartTagToken {
    /// Lowercased.
    pub name: String,
    /// In source order; a repeated name keeps its first value.
    pub attributes: Vec<Attribute>,
    /// Written as `<name ... />`.
    pub self_closing: bool,
}

/// End tags carry no attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct EndTagToken {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    /// Character references already decoded.
    pub value: String,
}

/// Split `input` into tokens. The result always ends with [`Token::Eof`].
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut scanner = Scanner {
        src: input,
        pos: 0,
        out: Vec::new(),
    };
    scanner.run();
    scanner.out.push(Token::Eof);
    scanner.out
}

struct Scanner<'a> {
    src: &'a str,
    /// Byte offset, always on a char boundary.
    pos: usize,
    out: Vec<Token>,
}

impl<'a> Scanner<'a> {
    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn take_while(&mut self, keep: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let len = rest.find(|c: char| !keep(c)).unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    fn skip_whitespace(&mut self) {
        self.take_while(|c| c.is_ascii_whitespace());
    }

    fn text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.out.last_mut() {
            Some(Token::Character(run)) => run.push_str(text),
            _ => self.out.push(Token::Character(text.to_owned())),
        }
    }

    fn run(&mut self) {
        while let Some(offset) = self.rest().find(['<', '&']) {
            let plain = &self.rest()[..offset];
            self.text(plain);
            self.pos += offset;
            if self.eat('&') {
                let decoded = self.char_ref(false);
                self.text(&decoded);
            } else {
                self.pos += 1;
                self.markup();
            }
        }
        let tail = self.rest();
        self.text(tail);
        self.pos = self.src.len();
    }

    /// Dispatch on what follows a `<`.
    fn markup(&mut self) {
        match self.peek() {
            Some('!') => {
                self.pos += 1;
                if self.rest().starts_with("--") {
                    self.pos += 2;
                    self.comment();
                } else {
                    self.bogus_comment();
                }
            },
            Some('/') => {
                self.pos += 1;
                self.end_tag();
            },
            Some('?') => self.bogus_comment(),
            Some(c) if c.is_ascii_alphabetic() => {
                if let Some(tag) = self.tag(false) {
                    self.out.push(tag);
                }
            },
            _ => self.text("<"),
        }
    }

    fn end_tag(&mut self) {
        match self.peek() {
            Some(c) if c.is_ascii_alphabetic() => {
                if let Some(tag) = self.tag(true) {
                    self.out.push(tag);
                }
            },
            // `</>` is ignored.
            Some('>') => self.pos += 1,
            Some(_) => self.bogus_comment(),
            None => self.text("</"),
        }
    }

    /// Body of a `<!-- ... -->` comment; the opener is consumed.
    fn comment(&mut self) {
        let rest = self.rest();
        for abrupt in [">", "->"] {
            if rest.starts_with(abrupt) {
                self.pos += abrupt.len();
                self.out.push(Token::Comment(String::new()));
                return;
            }
        }
        let (body, consumed) = match rest.find("-->") {
            Some(end) => (&rest[..end], end + 3),
            None => (rest.trim_end_matches('-'), rest.len()),
        };
        self.pos += consumed;
        self.out.push(Token::Comment(body.to_owned()));
    }

    /// Everything up to the next `>` becomes a comment.
    fn bogus_comment(&mut self) {
        let rest = self.rest();
        let (body, consumed) = match rest.find('>') {
            Some(end) => (&rest[..end], end + 1),
            None => (rest, rest.len()),
        };
        self.pos += consumed;
        self.out.push(Token::Comment(body.to_owned()));
    }

    /// Read a tag whose name starts at the cursor. Returns `None` when the
    /// input ends before the closing `>`.
    fn tag(&mut self, end: bool) -> Option<Token> {
        let name = self
            .take_while(|c| !c.is_ascii_whitespace() && c != '/' && c != '>')
            .to_ascii_lowercase();
        let mut attributes: Vec<Attribute> = Vec::new();
        let mut self_closing = false;

        loop {
            self.skip_whitespace();
            match self.bump()? {
                '>' => break,
                '/' => {
                    if self.eat('>') {
                        self_closing = true;
                        break;
                    }
                },
                first => {
                    let attr = self.attribute(first)?;
                    if attributes.iter().all(|a| a.name != attr.name) {
                        attributes.push(attr);
                    }
                },
            }
        }

        Some(if end {
            Token::EndTag(EndTagToken { name })
        } else {
            Token::StartTag(StartTagToken {
                name,
                attributes,
                self_closing,
            })
        })
    }

    /// Read one attribute whose first name character is already consumed.
    fn attribute(&mut self, first: char) -> Option<Attribute> {
        let mut name = String::new();
        name.push(first.to_ascii_lowercase());
        let tail = self.take_while(|c| !c.is_ascii_whitespace() && !matches!(c, '/' | '>' | '='));
        name.push_str(&tail.to_ascii_lowercase());

        self.skip_whitespace();
        if !self.eat('=') {
            return Some(Attribute {
                name,
                value: String::new(),
            });
        }
        self.skip_whitespace();
        let value = match self.peek()? {
            quote @ ('"' | '\'') => {
                self.pos += 1;
                self.quoted_value(quote)?
            },
            '>' => String::new(),
            _ => self.unquoted_value(),
        };
        Some(Attribute { name, value })
    }

    fn quoted_value(&mut self, quote: char) -> Option<String> {
        let mut value = String::new();
        loop {
            match self.bump()? {
                c if c == quote => return Some(value),
                '&' => {
                    let decoded = self.char_ref(true);
                    value.push_str(&decoded);
                },
                c => value.push(c),
            }
        }
    }

    fn unquoted_value(&mut self) -> String {
        let mut value = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_whitespace() || c == '>' {
                break;
            }
            self.pos += c.len_utf8();
            if c == '&' {
                let decoded = self.char_ref(true);
                value.push_str(&decoded);
            } else {
                value.push(c);
            }
        }
        value
    }

    /// Decode a character reference after its `&`. Anything that is not a
    /// known reference comes back as the literal source text.
    fn char_ref(&mut self, in_attribute: bool) -> String {
        if self.eat('#') {
            return self.numeric_ref();
        }
        let name = self.take_while(|c| c.is_ascii_alphanumeric());
        if name.is_empty() {
            return "&".into();
        }
        let terminated = self.eat(';');
        // Unterminated names stay literal in attribute values (`?a=1&copy=2`).
        let decoded = if terminated || !in_attribute {
            lookup_entity(name)
        } else {
            None
        };
        match decoded {
            Some(text) => text.to_owned(),
            None if terminated => format!("&{name};"),
            None => format!("&{name}"),
        }
    }

    /// `&#65;` or `&#x41;`, with the `&#` consumed.
    fn numeric_ref(&mut self) -> String {
        let hex = self.eat('x') || self.eat('X');
        let radix = if hex { 16 } else { 10 };
        let digits = self.take_while(|c| c.is_digit(radix));
        if digits.is_empty() {
            return if hex { "&#x" } else { "&#" }.into();
        }
        self.eat(';');
        let ch = match u32::from_str_radix(digits, radix) {
            Ok(0) | Err(_) => REPLACEMENT,
            Ok(code) => char::from_u32(code).unwrap_or(REPLACEMENT),
        };
        ch.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(input: &str) -> Vec<Token> {
        let mut tokens = tokenize(input);
        assert_eq!(tokens.pop(), Some(Token::Eof));
        tokens
    }

    fn text(s: &str) -> Token {
        Token::Character(s.into())
    }

    fn open(name: &str, self_closing: bool) -> Token {
        Token::StartTag(StartTagToken {
            name: name.into(),
            attributes: Vec::new(),
            self_closing,
        })
    }

    fn close(name: &str) -> Token {
        Token::EndTag(EndTagToken { name: name.into() })
    }

    fn attrs(input: &str) -> Vec<(String, String)> {
        match scan(input).into_iter().next() {
            Some(Token::StartTag(tag)) => tag.attributes.into_iter().map(|a| (a.name, a.value)).collect(),
            other => panic!("no start tag in {input:?}: {other:?}"),
        }
    }

    #[test]
    fn tags_and_text() {
        assert_eq!(
            scan("<ul><li>Go</li></ul>"),
            vec![open("ul", false), open("li", false), text("Go"), close("li"), close("ul")]
        );
        assert_eq!(scan("<STRONG>x</Strong>"), vec![open("strong", false), text("x"), close("strong")]);
        assert_eq!(scan("a<br />b<br>"), vec![text("a"), open("br", true), text("b"), open("br", false)]);
        assert_eq!(scan("<i/>"), vec![open("i", true)]);
    }

    #[test]
    fn attribute_forms() {
        let link = attrs(
            r#"<a href="https://github.com/x" target='_blank' rel=noopener class="text-blue-400 underline">"#,
        );
        let names: Vec<&str> = link.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["href", "target", "rel", "class"]);
        assert_eq!(link[1].1, "_blank");
        assert_eq!(link[2].1, "noopener");
        assert_eq!(link[3].1, "text-blue-400 underline");

        assert_eq!(attrs("<input disabled>"), [("disabled".to_string(), String::new())]);
        assert_eq!(attrs(r#"<p CLASS="a" class="b">"#), [("class".to_string(), "a".to_string())]);
        assert_eq!(attrs(r#"<a title = "x" >"#), [("title".to_string(), "x".to_string())]);
    }

    #[test]
    fn references_in_text() {
        assert_eq!(scan("Tom &amp; Jerry"), vec![text("Tom & Jerry")]);
        assert_eq!(scan("&lt;b&gt;"), vec![text("<b>")]);
        assert_eq!(scan("&#65;&#x42;&#X43;"), vec![text("ABC")]);
        assert_eq!(scan("2022 &ndash; 2025"), vec![text("2022 \u{2013} 2025")]);
        assert_eq!(scan("&#0;&#xD800;"), vec![text("\u{FFFD}\u{FFFD}")]);
        assert_eq!(scan("&#99999999999;"), vec![text("\u{FFFD}")]);
    }

    #[test]
    fn non_references_stay_literal() {
        assert_eq!(scan("Q & A"), vec![text("Q & A")]);
        assert_eq!(scan("&nope; &#; &#x;"), vec![text("&nope; &#; &#x;")]);
        assert_eq!(scan("trailing &"), vec![text("trailing &")]);
    }

    #[test]
    fn references_in_attributes() {
        assert_eq!(attrs(r#"<a title="a&amp;b">"#)[0].1, "a&b");
        assert_eq!(attrs(r#"<a href="/q?a=1&copy=2">"#)[0].1, "/q?a=1&copy=2");
        assert_eq!(attrs("<a title=x&lt;y>")[0].1, "x<y");
    }

    #[test]
    fn comments_and_declarations() {
        assert_eq!(scan("a<!-- note -->b"), vec![text("a"), Token::Comment(" note ".into()), text("b")]);
        assert_eq!(scan("<!---->"), vec![Token::Comment(String::new())]);
        assert_eq!(scan("<!-->x"), vec![Token::Comment(String::new()), text("x")]);
        assert_eq!(scan("<!-- open"), vec![Token::Comment(" open".into())]);
        assert_eq!(scan("<!DOCTYPE html>"), vec![Token::Comment("DOCTYPE html".into())]);
        assert_eq!(scan("<?xml?>"), vec![Token::Comment("?xml?".into())]);
        assert_eq!(scan("</ odd>"), vec![Token::Comment(" odd".into())]);
    }

    #[test]
    fn malformed_input() {
        assert_eq!(scan("a < b"), vec![text("a < b")]);
        assert_eq!(scan("x</>y"), vec![text("xy")]);
        assert_eq!(scan("x</"), vec![text("x</")]);
        assert_eq!(scan("<p>open"), vec![open("p", false), text("open")]);
        assert_eq!(scan("text<a href=\"x"), vec![text("text")]);
        assert_eq!(scan("text<span"), vec![text("text")]);
        assert!(scan("").is_empty());
    }

    #[test]
    fn multibyte_text() {
        assert_eq!(
            scan("<p>\u{1F44B} h\u{e9}llo</p>"),
            vec![open("p", false), text("\u{1F44B} h\u{e9}llo"), close("p")]
        );
    }
}
