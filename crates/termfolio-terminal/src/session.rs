//! Terminal session: history, input line, and reveal sequencing.

use std::borrow::Cow;
use std::collections::VecDeque;

use termfolio_markup::{escape_html, visible_len};
use termfolio_typer::{TextTyper, TyperOptions, TypingEvent};
use termfolio_types::config::{TerminalConfig, TypingConfig};
use termfolio_types::error::Result;

use crate::frame::{EntryView, RenderSurface, TerminalFrame};
use crate::input::InputLine;
use crate::table::{CommandTable, Resolution};

/// Slack added to the per-unit duration estimate.
const ESTIMATE_BUFFER_MS: u64 = 200;

/// One submitted line and its response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEntry {
    /// The line as typed.
    pub input: String,
    /// HTML response. Empty for blank submissions.
    pub payload: String,
    /// The response is fully shown. Never goes back to `false`.
    pub settled: bool,
}

/// What [`TerminalSession::submit`] did with a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// History emptied.
    Cleared,
    Blank { index: usize },
    Command { index: usize },
    NotFound { index: usize },
}

struct ActiveReveal {
    index: usize,
    typer: TextTyper,
}

/// A portfolio terminal.
///
/// Reveals run one at a time in submission order. While any entry is
/// unsettled the session is "typing" and the input line is hidden.
pub struct TerminalSession {
    table: CommandTable,
    prompt: String,
    welcome: String,
    typing_config: TypingConfig,
    seed: Option<u64>,
    entries: Vec<CommandEntry>,
    active: Option<ActiveReveal>,
    /// Unsettled entries waiting for the active reveal to finish.
    queue: VecDeque<usize>,
    typing: bool,
    input: InputLine,
    /// Raised by a submission, handed out on the following tick.
    scroll_pending: bool,
    scroll_ready: bool,
}

impl TerminalSession {
    /// Build a session from configuration, validating it and the command
    /// overrides' markup.
    pub fn new(config: &TerminalConfig) -> Result<Self> {
        config.validate()?;
        let table = CommandTable::from_config(config)?;
        Ok(Self::with_table(table, config))
    }

    /// Build a session around an existing command table.
    pub fn with_table(table: CommandTable, config: &TerminalConfig) -> Self {
        Self {
            table,
            prompt: config.prompt.clone(),
            welcome: config.welcome.clone(),
            typing_config: config.typing.clone(),
            seed: None,
            entries: Vec::new(),
            active: None,
            queue: VecDeque::new(),
            typing: false,
            input: InputLine::new(),
            scroll_pending: false,
            scroll_ready: false,
        }
    }

    /// Seed the variable-speed RNG of every reveal.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    // =============================================================
    // Queries
    // =============================================================

    pub fn entries(&self) -> &[CommandEntry] {
        &self.entries
    }

    pub fn table(&self) -> &CommandTable {
        &self.table
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn welcome(&self) -> &str {
        &self.welcome
    }

    /// `true` while any entry is unsettled.
    pub fn is_typing(&self) -> bool {
        self.typing
    }

    /// The input line is shown only while nothing is being typed.
    pub fn input_visible(&self) -> bool {
        !self.typing
    }

    pub fn input(&self) -> &InputLine {
        &self.input
    }

    /// Index of the entry currently being revealed.
    pub fn active_index(&self) -> Option<usize> {
        self.active.as_ref().map(|a| a.index)
    }

    /// Rough reveal duration for an entry at the configured fixed speed.
    ///
    /// Informational only; entries settle on the revealer's completion.
    pub fn estimated_reveal_ms(&self, index: usize) -> Option<u64> {
        let entry = self.entries.get(index)?;
        if entry.payload.is_empty() {
            return Some(0);
        }
        let units = visible_len(&entry.payload) as u64;
        Some(units * u64::from(self.typing_config.typing_speed_ms) + ESTIMATE_BUFFER_MS)
    }

    /// Returns `true` once per submission, on the first call after the
    /// tick following it.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_ready)
    }

    // =============================================================
    // Input line
    // =============================================================

    /// Type a character into the input line. Ignored while it is hidden.
    pub fn insert_char(&mut self, ch: char) {
        if self.input_visible() {
            self.input.insert(ch);
        }
    }

    /// Delete before the cursor. Ignored while the input line is hidden.
    pub fn backspace(&mut self) {
        if self.input_visible() {
            self.input.backspace();
        }
    }

    /// Submit the input line. `None` while it is hidden.
    pub fn submit_input(&mut self) -> Option<SubmitOutcome> {
        if !self.input_visible() {
            return None;
        }
        let line = self.input.take();
        Some(self.submit(&line))
    }

    // =============================================================
    // Commands
    // =============================================================

    /// Resolve and record a submitted line.
    pub fn submit(&mut self, line: &str) -> SubmitOutcome {
        self.input.clear();
        let trimmed = line.trim();

        if trimmed.is_empty() {
            let index = self.push_entry(line, String::new());
            self.scroll_pending = true;
            return SubmitOutcome::Blank { index };
        }

        let (payload, found) = match self.table.resolve(trimmed) {
            Resolution::Clear => {
                self.clear();
                return SubmitOutcome::Cleared;
            },
            Resolution::Payload(payload) => (payload.to_string(), true),
            Resolution::NotFound => (not_found_payload(trimmed), false),
        };
        log::info!("command '{trimmed}' {}", if found { "resolved" } else { "not found" });

        let index = self.push_entry(line, payload);
        if !self.entries[index].settled {
            self.typing = true;
            self.queue.push_back(index);
            self.start_next_reveal();
        }
        self.scroll_pending = true;

        if found {
            SubmitOutcome::Command { index }
        } else {
            SubmitOutcome::NotFound { index }
        }
    }

    /// Mark an entry's reveal as complete and move on to the next one.
    ///
    /// Idempotent. Indices that no longer exist (after `clear`) are
    /// ignored.
    pub fn on_reveal_complete(&mut self, index: usize) {
        let Some(entry) = self.entries.get_mut(index) else {
            log::warn!("completion for unknown entry {index} ignored");
            return;
        };
        if !entry.settled {
            entry.settled = true;
            log::debug!("entry {index} settled");
        }
        if self.active_index() == Some(index) {
            self.active = None;
        }
        self.queue.retain(|&queued| queued != index);
        self.start_next_reveal();
        if self.entries.iter().all(|e| e.settled) {
            self.typing = false;
        }
    }

    /// Show the active reveal in full right away.
    pub fn skip_typing(&mut self) {
        let finished = self.active.as_mut().and_then(|active| {
            let events = active.typer.complete();
            events.contains(&TypingEvent::Finished).then_some(active.index)
        });
        if let Some(index) = finished {
            self.on_reveal_complete(index);
        }
    }

    /// Advance the active reveal and hand over pending scroll requests.
    pub fn tick(&mut self, dt_ms: u32) {
        if self.scroll_pending {
            self.scroll_pending = false;
            self.scroll_ready = true;
        }
        let finished = self.active.as_mut().and_then(|active| {
            let events = active.typer.tick(dt_ms);
            events.contains(&TypingEvent::Finished).then_some(active.index)
        });
        if let Some(index) = finished {
            self.on_reveal_complete(index);
        }
    }

    fn push_entry(&mut self, line: &str, payload: String) -> usize {
        let settled = payload.is_empty();
        self.entries.push(CommandEntry {
            input: line.to_string(),
            payload,
            settled,
        });
        self.entries.len() - 1
    }

    fn start_next_reveal(&mut self) {
        if self.active.is_some() {
            return;
        }
        while let Some(index) = self.queue.pop_front() {
            let Some(entry) = self.entries.get(index) else {
                continue;
            };
            if entry.settled {
                continue;
            }
            let mut options = TyperOptions::from_config(&self.typing_config);
            options.seed = self.seed;
            let typer = TextTyper::single(entry.payload.clone(), options);
            log::debug!("revealing entry {index} ({} units)", typer.unit_count());
            self.active = Some(ActiveReveal { index, typer });
            return;
        }
    }

    fn clear(&mut self) {
        if let Some(mut active) = self.active.take() {
            active.typer.cancel();
        }
        self.queue.clear();
        self.entries.clear();
        self.typing = false;
        log::info!("terminal cleared");
    }

    // =============================================================
    // Rendering
    // =============================================================

    /// Snapshot of everything a host draws.
    pub fn frame(&self) -> TerminalFrame<'_> {
        let entries = self
            .entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let active = self.active.as_ref().filter(|a| a.index == index);
                let (output, cursor) = match active {
                    Some(a) => (Cow::Owned(a.typer.displayed()), a.typer.cursor()),
                    None if entry.settled => (Cow::Borrowed(entry.payload.as_str()), None),
                    None => (Cow::Borrowed(""), None),
                };
                EntryView {
                    input: &entry.input,
                    output,
                    is_html: true,
                    settled: entry.settled,
                    cursor,
                }
            })
            .collect();
        TerminalFrame {
            header: self.table.header_line(),
            prompt: &self.prompt,
            welcome: &self.welcome,
            entries,
            input_visible: self.input_visible(),
            input: self.input.text(),
        }
    }

    /// Draw the current frame, then scroll if a submission asked for it.
    pub fn render_to<S: RenderSurface + ?Sized>(&mut self, surface: &mut S) -> Result<()> {
        let scroll = self.take_scroll_request();
        surface.render(&self.frame())?;
        if scroll {
            surface.scroll_to_bottom();
        }
        Ok(())
    }
}

/// Response for an unknown command. The input is echoed escaped, in its
/// original casing.
fn not_found_payload(input: &str) -> String {
    format!(
        "<span class=\"error\">Command not found: {}</span>",
        escape_html(input)
    )
}
