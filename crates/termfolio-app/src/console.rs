//! Line-oriented console rendering.
//!
//! A plain terminal cannot redraw rich text, so each entry's output is
//! flattened to text and only the newly revealed part is written on every
//! frame. Reveal snapshots grow by prefix, and so does their flattened
//! form, which keeps the append-only output in step with the session.

use std::io::{self, Write};

use termfolio_markup::dom::{Fragment, NodeId, NodeKind, TagName};
use termfolio_markup::parse_fragment;
use termfolio_terminal::{RenderSurface, TerminalFrame};
use termfolio_types::error::Result;

/// Flatten an HTML fragment for a plain terminal.
///
/// `<br>` becomes a newline, block elements start on a fresh line, and list
/// items get a `- ` bullet. Separators only ever precede content, so a
/// prefix snapshot flattens to a prefix of the full text.
pub fn console_text(html: &str) -> String {
    let frag = parse_fragment(html);
    let mut out = String::new();
    write_console(&frag, frag.root, &mut out);
    out
}

fn write_console(frag: &Fragment, id: NodeId, out: &mut String) {
    let node = frag.get(id);
    match &node.kind {
        NodeKind::Text(text) => out.push_str(text),
        NodeKind::Comment(_) => {},
        NodeKind::Element(data) => {
            match data.tag {
                TagName::Br | TagName::Hr => {
                    out.push('\n');
                    return;
                },
                ref tag if tag.closes_paragraph() || *tag == TagName::Li => {
                    if !out.is_empty() && !out.ends_with('\n') {
                        out.push('\n');
                    }
                    if *tag == TagName::Li {
                        out.push_str("- ");
                    }
                },
                _ => {},
            }
            for &child in &node.children {
                write_console(frag, child, out);
            }
        },
        NodeKind::Root => {
            for &child in &node.children {
                write_console(frag, child, out);
            }
        },
    }
}

#[derive(Default)]
struct PrintedEntry {
    text: String,
    closed: bool,
}

/// Append-only renderer for a plain terminal.
pub struct ConsoleSurface<W: Write> {
    out: W,
    banner_shown: bool,
    entries: Vec<PrintedEntry>,
    /// An input prompt is on screen; the user's echoed line follows it.
    prompt_shown: bool,
}

impl<W: Write> ConsoleSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            banner_shown: false,
            entries: Vec::new(),
            prompt_shown: false,
        }
    }

    /// Wipe the screen and start over (after `clear`).
    pub fn reset(&mut self) -> io::Result<()> {
        write!(self.out, "\x1b[2J\x1b[H")?;
        self.out.flush()?;
        self.banner_shown = false;
        self.entries.clear();
        self.prompt_shown = false;
        Ok(())
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderSurface for ConsoleSurface<W> {
    fn render(&mut self, frame: &TerminalFrame<'_>) -> Result<()> {
        if !self.banner_shown {
            writeln!(self.out, "{}", frame.header)?;
            writeln!(self.out, "{}", console_text(frame.welcome))?;
            self.banner_shown = true;
        }

        for (index, entry) in frame.entries.iter().enumerate() {
            if index == self.entries.len() {
                if self.prompt_shown {
                    self.prompt_shown = false;
                } else {
                    writeln!(self.out, "{} {}", frame.prompt, entry.input)?;
                }
                self.entries.push(PrintedEntry::default());
            }
            let printed = &mut self.entries[index];
            if printed.closed {
                continue;
            }
            let text = if entry.is_html {
                console_text(&entry.output)
            } else {
                entry.output.to_string()
            };
            match text.strip_prefix(printed.text.as_str()) {
                Some(suffix) => write!(self.out, "{suffix}")?,
                None => {
                    log::debug!("entry {index} output diverged, reprinting");
                    write!(self.out, "\n{text}")?;
                },
            }
            printed.text = text;
            if !entry.settled {
                // Later entries are queued behind this one.
                break;
            }
            if !printed.text.is_empty() && !printed.text.ends_with('\n') {
                writeln!(self.out)?;
            }
            printed.closed = true;
        }

        if frame.input_visible && !self.prompt_shown {
            write!(self.out, "{} {}", frame.prompt, frame.input)?;
            self.prompt_shown = true;
        }
        self.out.flush()?;
        Ok(())
    }
}
