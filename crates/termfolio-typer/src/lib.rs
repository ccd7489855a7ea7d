//! Typewriter engine for termfolio.
//!
//! A [`TextTyper`] reveals one or more texts a unit at a time, driven by
//! explicit [`TextTyper::tick`] calls from the host loop. It owns a single
//! [`TimerSlot`]; each step is applied before the next one is scheduled.

pub mod options;
pub mod timer;
pub mod typer;

pub use options::{CursorOptions, TyperOptions};
pub use timer::TimerSlot;
pub use typer::{Phase, TextTyper, TypingEvent};
