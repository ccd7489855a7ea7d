//! The typing / pausing / deleting state machine.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use termfolio_markup::Content;

use crate::options::TyperOptions;
use crate::timer::TimerSlot;

/// Where the typer is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Not started (waiting for visibility).
    Idle,
    Typing,
    /// Current text fully shown; deletion follows.
    PausedBeforeDelete,
    Deleting,
    /// Nothing left to do. Terminal state.
    Completed,
}

/// Events reported by [`TextTyper::tick`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypingEvent {
    /// Text `index` has been fully revealed. Fires once per typing pass,
    /// on the step that reveals the last unit.
    SentenceComplete { index: usize, text: String },
    /// The typer reached [`Phase::Completed`]. Fires once.
    Finished,
}

/// Reveals a list of texts one unit at a time.
pub struct TextTyper {
    sources: Vec<String>,
    contents: Vec<Content>,
    options: TyperOptions,
    phase: Phase,
    index: usize,
    revealed: usize,
    timer: TimerSlot,
    rng: StdRng,
    visible: bool,
    cancelled: bool,
    cursor_on: bool,
    blink_elapsed_ms: u32,
}

impl TextTyper {
    /// Create a typer. It starts at once unless `start_on_visible` is set.
    pub fn new(texts: Vec<String>, options: TyperOptions) -> Self {
        let mut sources = texts;
        if sources.is_empty() {
            sources.push(String::new());
        }
        let contents = sources
            .iter()
            .map(|text| prepare(text, &options))
            .collect();
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let mut typer = Self {
            sources,
            contents,
            options,
            phase: Phase::Idle,
            index: 0,
            revealed: 0,
            timer: TimerSlot::new(),
            rng,
            visible: false,
            cancelled: false,
            cursor_on: true,
            blink_elapsed_ms: 0,
        };
        if !typer.options.start_on_visible {
            typer.begin();
        }
        typer
    }

    /// Create a typer for a single text.
    pub fn single(text: impl Into<String>, options: TyperOptions) -> Self {
        Self::new(vec![text.into()], options)
    }

    // -- queries ------------------------------------------------------------

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Index of the text currently being typed or deleted.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Units of the current text on screen.
    pub fn revealed(&self) -> usize {
        self.revealed
    }

    /// Total units of the current text.
    pub fn unit_count(&self) -> usize {
        self.current().unit_count()
    }

    pub fn is_html(&self) -> bool {
        self.current().is_html()
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Completed
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// The current snapshot: plain text, or well-formed HTML.
    pub fn displayed(&self) -> String {
        self.current().render(self.revealed)
    }

    /// Milliseconds until the next step, if one is scheduled.
    pub fn next_step_in(&self) -> Option<u32> {
        self.timer.remaining_ms()
    }

    /// The cursor glyph to draw this frame, if any.
    pub fn cursor(&self) -> Option<&str> {
        let cursor = &self.options.cursor;
        if !cursor.show || self.cancelled {
            return None;
        }
        if cursor.hide_while_typing && matches!(self.phase, Phase::Typing | Phase::Deleting) {
            return None;
        }
        self.cursor_on.then_some(cursor.character.as_str())
    }

    /// Color for the current text, cycling through `text_colors`.
    pub fn current_color(&self) -> Option<&str> {
        let colors = &self.options.text_colors;
        if colors.is_empty() {
            return None;
        }
        Some(colors[self.index % colors.len()].as_str())
    }

    fn current(&self) -> &Content {
        &self.contents[self.index]
    }

    // -- control ------------------------------------------------------------

    /// Report visibility. The first `true` starts a `start_on_visible`
    /// typer.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        if visible && self.phase == Phase::Idle && !self.cancelled {
            self.begin();
        }
    }

    /// Stop for good. A cancelled typer keeps its snapshot but never
    /// steps or reports events again.
    pub fn cancel(&mut self) {
        if !self.cancelled {
            log::debug!("typer cancelled at text {} unit {}", self.index, self.revealed);
        }
        self.timer.cancel();
        self.cancelled = true;
    }

    /// Fast-forward the current typing pass to its end.
    ///
    /// Only acts while idle or typing; the events the skipped steps would
    /// have produced are returned as if ticked.
    pub fn complete(&mut self) -> Vec<TypingEvent> {
        let mut events = Vec::new();
        if self.cancelled || !matches!(self.phase, Phase::Idle | Phase::Typing) {
            return events;
        }
        self.phase = Phase::Typing;
        self.revealed = self.unit_count();
        self.finish_sentence(&mut events);
        events
    }

    /// Advance time by `dt_ms`, applying every step that falls due.
    pub fn tick(&mut self, dt_ms: u32) -> Vec<TypingEvent> {
        let mut events = Vec::new();
        if self.cancelled {
            return events;
        }
        self.blink(dt_ms);
        let mut budget = dt_ms;
        while let Some(leftover) = self.timer.advance(budget) {
            budget = leftover;
            self.step(&mut events);
        }
        events
    }

    // -- internals ----------------------------------------------------------

    fn begin(&mut self) {
        log::debug!("typer started with {} text(s)", self.contents.len());
        self.phase = Phase::Typing;
        self.timer.arm(clamp_delay(self.options.initial_delay_ms));
    }

    fn step(&mut self, events: &mut Vec<TypingEvent>) {
        match self.phase {
            Phase::Typing => {
                let total = self.unit_count();
                if self.revealed < total {
                    self.revealed += 1;
                }
                if self.revealed >= total {
                    self.finish_sentence(events);
                } else {
                    let delay = self.typing_delay();
                    self.timer.arm(delay);
                }
            },
            Phase::PausedBeforeDelete => {
                log::debug!("deleting text {}", self.index);
                self.phase = Phase::Deleting;
                self.timer.arm(clamp_delay(self.options.deleting_speed_ms));
            },
            Phase::Deleting => {
                self.revealed = self.revealed.saturating_sub(1);
                if self.revealed == 0 {
                    self.index = (self.index + 1) % self.contents.len();
                    self.phase = Phase::Typing;
                    let delay = self.typing_delay();
                    self.timer.arm(delay);
                } else {
                    self.timer.arm(clamp_delay(self.options.deleting_speed_ms));
                }
            },
            Phase::Idle | Phase::Completed => {},
        }
    }

    /// Emit the sentence event and decide what follows it.
    fn finish_sentence(&mut self, events: &mut Vec<TypingEvent>) {
        events.push(TypingEvent::SentenceComplete {
            index: self.index,
            text: self.sources[self.index].clone(),
        });
        let single = self.contents.len() == 1;
        let last = self.index + 1 == self.contents.len();
        if single || (last && !self.options.looping) {
            log::debug!("typer finished after text {}", self.index);
            self.phase = Phase::Completed;
            self.timer.cancel();
            events.push(TypingEvent::Finished);
        } else {
            self.phase = Phase::PausedBeforeDelete;
            self.timer.arm(clamp_delay(self.options.pause_ms));
        }
    }

    fn typing_delay(&mut self) -> u32 {
        let delay = match self.options.variable_speed {
            Some(range) => {
                let (low, high) = (range.min_ms.min(range.max_ms), range.min_ms.max(range.max_ms));
                self.rng.random_range(low..=high)
            },
            None => self.options.typing_speed_ms,
        };
        clamp_delay(delay)
    }

    fn blink(&mut self, dt_ms: u32) {
        let period = self.options.cursor.blink_ms;
        if period == 0 {
            return;
        }
        self.blink_elapsed_ms = self.blink_elapsed_ms.saturating_add(dt_ms);
        let flips = self.blink_elapsed_ms / period;
        self.blink_elapsed_ms %= period;
        if flips % 2 == 1 {
            self.cursor_on = !self.cursor_on;
        }
    }
}

fn prepare(text: &str, options: &TyperOptions) -> Content {
    if options.is_html {
        Content::html(text)
    } else if options.reverse {
        Content::plain(text.chars().rev().collect::<String>())
    } else {
        Content::plain(text)
    }
}

/// Every scheduled step waits at least one millisecond.
fn clamp_delay(ms: u32) -> u32 {
    ms.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use termfolio_types::config::SpeedRange;

    fn plain_opts() -> TyperOptions {
        TyperOptions {
            typing_speed_ms: 10,
            deleting_speed_ms: 5,
            pause_ms: 100,
            looping: false,
            ..TyperOptions::default()
        }
        .with_seed(42)
    }

    fn html_opts() -> TyperOptions {
        TyperOptions {
            is_html: true,
            ..plain_opts()
        }
    }

    /// Tick in `dt` steps until finished, collecting events.
    fn run_to_end(typer: &mut TextTyper, dt: u32) -> Vec<TypingEvent> {
        let mut events = Vec::new();
        for _ in 0..100_000 {
            events.extend(typer.tick(dt));
            if typer.is_finished() {
                break;
            }
        }
        events
    }

    #[test]
    fn types_one_unit_per_delay() {
        let mut typer = TextTyper::single("abc", plain_opts());
        assert_eq!(typer.phase(), Phase::Typing);
        assert_eq!(typer.displayed(), "");

        // Zero initial delay is clamped to one millisecond.
        assert!(typer.tick(1).is_empty());
        assert_eq!(typer.displayed(), "a");
        typer.tick(9);
        assert_eq!(typer.displayed(), "a");
        typer.tick(1);
        assert_eq!(typer.displayed(), "ab");

        let events = typer.tick(10);
        assert_eq!(typer.displayed(), "abc");
        assert_eq!(
            events,
            vec![
                TypingEvent::SentenceComplete {
                    index: 0,
                    text: "abc".into()
                },
                TypingEvent::Finished,
            ]
        );
        assert!(typer.is_finished());
    }

    #[test]
    fn completion_reported_once() {
        let mut typer = TextTyper::single("hey", plain_opts());
        let events = run_to_end(&mut typer, 3);
        assert_eq!(events.len(), 2);
        for _ in 0..50 {
            assert!(typer.tick(1_000).is_empty());
        }
        assert_eq!(typer.displayed(), "hey");
    }

    #[test]
    fn large_tick_applies_many_steps() {
        let mut typer = TextTyper::single("hello", plain_opts());
        let events = typer.tick(1 + 10 * 4);
        assert_eq!(typer.displayed(), "hello");
        assert!(events.contains(&TypingEvent::Finished));
    }

    #[test]
    fn initial_delay_holds_first_unit() {
        let opts = TyperOptions {
            initial_delay_ms: 300,
            ..plain_opts()
        };
        let mut typer = TextTyper::single("x", opts);
        typer.tick(299);
        assert_eq!(typer.displayed(), "");
        typer.tick(1);
        assert_eq!(typer.displayed(), "x");
    }

    #[test]
    fn html_snapshots_are_closed() {
        let mut typer = TextTyper::single("Hi <b>there</b><br />!", html_opts());
        assert_eq!(typer.unit_count(), 9);
        typer.tick(1 + 10 * 4);
        assert_eq!(typer.displayed(), "Hi <b>th</b>");
        run_to_end(&mut typer, 10);
        assert_eq!(typer.displayed(), "Hi <b>there</b><br>!");
    }

    #[test]
    fn empty_text_completes_on_first_step() {
        let mut typer = TextTyper::single("", plain_opts());
        let events = typer.tick(1);
        assert_eq!(events.len(), 2);
        assert!(typer.is_finished());
    }

    #[test]
    fn markup_only_text_completes_immediately() {
        let mut typer = TextTyper::single("<br />", html_opts());
        assert_eq!(typer.unit_count(), 0);
        typer.tick(1);
        assert!(typer.is_finished());
        assert_eq!(typer.displayed(), "<br>");
    }

    #[test]
    fn cycles_through_texts_with_pause_and_delete() {
        let opts = TyperOptions {
            looping: true,
            ..plain_opts()
        };
        let mut typer = TextTyper::new(vec!["ab".into(), "xyz".into()], opts);

        let events = typer.tick(1 + 10);
        assert_eq!(typer.displayed(), "ab");
        assert_eq!(
            events,
            vec![TypingEvent::SentenceComplete {
                index: 0,
                text: "ab".into()
            }]
        );
        assert_eq!(typer.phase(), Phase::PausedBeforeDelete);

        typer.tick(100);
        assert_eq!(typer.phase(), Phase::Deleting);
        typer.tick(5);
        assert_eq!(typer.displayed(), "a");
        typer.tick(5);
        assert_eq!(typer.index(), 1);
        assert_eq!(typer.phase(), Phase::Typing);
        assert_eq!(typer.displayed(), "");

        typer.tick(10);
        assert_eq!(typer.displayed(), "x");
        let events = typer.tick(20);
        assert_eq!(typer.displayed(), "xyz");
        assert_eq!(
            events,
            vec![TypingEvent::SentenceComplete {
                index: 1,
                text: "xyz".into()
            }]
        );

        // Looping: delete "xyz" and come back to the first text.
        typer.tick(100 + 5 * 3);
        assert_eq!(typer.index(), 0);
        assert!(!typer.is_finished());
    }

    #[test]
    fn non_looping_stops_after_last_text() {
        let mut typer = TextTyper::new(vec!["a".into(), "b".into()], plain_opts());
        let events = run_to_end(&mut typer, 1);
        let sentences: Vec<usize> = events
            .iter()
            .filter_map(|e| match e {
                TypingEvent::SentenceComplete { index, .. } => Some(*index),
                TypingEvent::Finished => None,
            })
            .collect();
        assert_eq!(sentences, vec![0, 1]);
        assert_eq!(events.last(), Some(&TypingEvent::Finished));
        assert_eq!(typer.displayed(), "b");
    }

    #[test]
    fn single_text_never_deletes_even_when_looping() {
        let opts = TyperOptions {
            looping: true,
            ..plain_opts()
        };
        let mut typer = TextTyper::single("ok", opts);
        run_to_end(&mut typer, 1);
        assert!(typer.is_finished());
        typer.tick(10_000);
        assert_eq!(typer.displayed(), "ok");
    }

    #[test]
    fn html_deletion_stays_well_formed() {
        let opts = TyperOptions {
            looping: true,
            ..html_opts()
        };
        let mut typer = TextTyper::new(vec!["<b>ab</b>c".into(), "d".into()], opts);
        typer.tick(1 + 10 * 2);
        assert_eq!(typer.phase(), Phase::PausedBeforeDelete);
        typer.tick(100 + 5);
        assert_eq!(typer.displayed(), "<b>ab</b>");
        typer.tick(5);
        assert_eq!(typer.displayed(), "<b>a</b>");
    }

    #[test]
    fn variable_speed_stays_in_range_and_is_seeded() {
        let opts = TyperOptions {
            variable_speed: Some(SpeedRange {
                min_ms: 5,
                max_ms: 15,
            }),
            ..plain_opts()
        };
        let text = "variable speed typing";
        let mut a = TextTyper::single(text, opts.clone());
        let mut b = TextTyper::single(text, opts);

        a.tick(1);
        b.tick(1);
        let mut since_last = 0;
        let mut shown = a.revealed();
        while !a.is_finished() {
            a.tick(1);
            b.tick(1);
            since_last += 1;
            assert_eq!(a.displayed(), b.displayed());
            if a.revealed() != shown {
                assert!((5..=15).contains(&since_last), "gap {since_last}");
                since_last = 0;
                shown = a.revealed();
            }
        }
    }

    #[test]
    fn inverted_speed_range_is_reordered() {
        let opts = TyperOptions {
            variable_speed: Some(SpeedRange {
                min_ms: 15,
                max_ms: 5,
            }),
            ..plain_opts()
        };
        let mut typer = TextTyper::single("swap", opts);
        let events = run_to_end(&mut typer, 1);
        assert_eq!(typer.displayed(), "swap");
        assert_eq!(events.last(), Some(&TypingEvent::Finished));
    }

    #[test]
    fn reverse_mode_types_backwards() {
        let opts = TyperOptions {
            reverse: true,
            ..plain_opts()
        };
        let mut typer = TextTyper::single("abc", opts);
        typer.tick(1);
        assert_eq!(typer.displayed(), "c");
        run_to_end(&mut typer, 10);
        assert_eq!(typer.displayed(), "cba");
    }

    #[test]
    fn reverse_ignored_for_html() {
        let opts = TyperOptions {
            reverse: true,
            ..html_opts()
        };
        let mut typer = TextTyper::single("<i>ab</i>", opts);
        typer.tick(1);
        assert_eq!(typer.displayed(), "<i>a</i>");
    }

    #[test]
    fn start_on_visible_waits() {
        let opts = TyperOptions {
            start_on_visible: true,
            ..plain_opts()
        };
        let mut typer = TextTyper::single("go", opts);
        assert_eq!(typer.phase(), Phase::Idle);
        typer.tick(1_000);
        assert_eq!(typer.displayed(), "");

        typer.set_visible(false);
        assert_eq!(typer.phase(), Phase::Idle);
        typer.set_visible(true);
        assert_eq!(typer.phase(), Phase::Typing);
        typer.tick(1);
        assert_eq!(typer.displayed(), "g");
    }

    #[test]
    fn cancel_silences_typer() {
        let mut typer = TextTyper::single("abc", plain_opts());
        typer.tick(1);
        typer.cancel();
        assert!(typer.is_cancelled());
        assert!(typer.tick(10_000).is_empty());
        assert!(typer.complete().is_empty());
        assert_eq!(typer.displayed(), "a");
        assert_eq!(typer.next_step_in(), None);
    }

    #[test]
    fn complete_skips_to_end() {
        let mut typer = TextTyper::single("<b>long text</b>", html_opts());
        typer.tick(1);
        let events = typer.complete();
        assert_eq!(typer.displayed(), "<b>long text</b>");
        assert_eq!(events.len(), 2);
        assert!(typer.complete().is_empty());
        assert!(typer.tick(1_000).is_empty());
    }

    #[test]
    fn cursor_blinks_and_hides_while_typing() {
        let mut typer = TextTyper::single("abc", plain_opts());
        assert_eq!(typer.cursor(), Some("|"));
        typer.tick(500);
        assert_eq!(typer.cursor(), None);
        typer.tick(500);
        assert_eq!(typer.cursor(), Some("|"));

        let opts = TyperOptions {
            cursor: crate::CursorOptions {
                hide_while_typing: true,
                blink_ms: 0,
                ..Default::default()
            },
            ..plain_opts()
        };
        let mut typer = TextTyper::single("abc", opts);
        assert_eq!(typer.cursor(), None);
        run_to_end(&mut typer, 10);
        assert_eq!(typer.cursor(), Some("|"));
    }

    #[test]
    fn colors_cycle_with_text_index() {
        let opts = TyperOptions {
            text_colors: vec!["#fff".into(), "#0f0".into()],
            looping: true,
            ..plain_opts()
        };
        let mut typer = TextTyper::new(vec!["a".into(), "b".into(), "c".into()], opts);
        assert_eq!(typer.current_color(), Some("#fff"));
        while typer.index() == 0 {
            typer.tick(1);
        }
        assert_eq!(typer.current_color(), Some("#0f0"));
        while typer.index() == 1 {
            typer.tick(1);
        }
        assert_eq!(typer.current_color(), Some("#fff"));
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn exactly_one_completion_whatever_the_tick_size(
                text in "[a-z ]{0,30}",
                ticks in proptest::collection::vec(1u32..40, 1..200),
            ) {
                let mut typer = TextTyper::single(text.clone(), plain_opts());
                let mut events = Vec::new();
                let mut last = 0;
                for dt in ticks {
                    events.extend(typer.tick(dt));
                    prop_assert!(typer.revealed() >= last);
                    last = typer.revealed();
                }
                events.extend(typer.tick(u32::MAX / 2));
                let finished = events.iter().filter(|e| **e == TypingEvent::Finished).count();
                prop_assert_eq!(finished, 1);
                prop_assert_eq!(events.len(), 2);
                prop_assert_eq!(typer.displayed(), text);
            }
        }
    }
}
