//! Command interpreter for the portfolio terminal.
//!
//! A [`TerminalSession`] owns the command history, resolves each submitted
//! line against a [`CommandTable`], and drives one typewriter reveal at a
//! time. Hosts feed it input and `tick` calls, and draw the
//! [`TerminalFrame`] it produces through a [`RenderSurface`].

mod commands;
mod frame;
mod input;
mod session;
mod table;

/// Register the stock portfolio commands into a table.
pub use commands::register_builtins;
/// Snapshot of everything a host draws, and the trait it draws through.
pub use frame::{EntryView, RenderSurface, TerminalFrame};
/// Editable input line.
pub use input::InputLine;
/// History entries, submission results, and the session itself.
pub use session::{CommandEntry, SubmitOutcome, TerminalSession};
/// Name-to-payload mapping and lookup results.
pub use table::{CommandTable, Resolution};
