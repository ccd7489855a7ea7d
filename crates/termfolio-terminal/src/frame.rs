//! What a host draws each frame.

use std::borrow::Cow;

use termfolio_types::error::Result;

/// One history entry as it should appear right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryView<'a> {
    pub input: &'a str,
    /// Full payload once settled, the current snapshot while revealing,
    /// empty while queued.
    pub output: Cow<'a, str>,
    pub is_html: bool,
    pub settled: bool,
    /// Cursor glyph trailing an in-progress reveal.
    pub cursor: Option<&'a str>,
}

/// Snapshot of the whole terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalFrame<'a> {
    /// Command summary line (`help | about | ... | clear`).
    pub header: String,
    pub prompt: &'a str,
    /// HTML banner shown above the history. Never typed.
    pub welcome: &'a str,
    pub entries: Vec<EntryView<'a>>,
    pub input_visible: bool,
    pub input: &'a str,
}

/// Rendering collaborator implemented by hosts.
pub trait RenderSurface {
    /// Draw a frame.
    fn render(&mut self, frame: &TerminalFrame<'_>) -> Result<()>;

    /// Scroll the history so its last line is visible.
    fn scroll_to_bottom(&mut self) {}
}
