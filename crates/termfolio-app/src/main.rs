//! termfolio console entry point.
//!
//! Runs the portfolio terminal on stdin/stdout. Commands are read a line
//! at a time while the prompt is shown; responses are typed out at the
//! configured speed. Ctrl-D quits.
//!
//! Configuration is read from the TOML file named by the first argument
//! or the `TERMFOLIO_CONFIG` environment variable.

mod console;

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};

use console::ConsoleSurface;
use termfolio_terminal::{SubmitOutcome, TerminalSession};
use termfolio_types::config::TerminalConfig;

fn main() -> Result<()> {
    // Log output shares the terminal with the UI, so only warnings by default.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = match config_path() {
        Some(path) => TerminalConfig::load(&path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => TerminalConfig::default(),
    };
    let frame_ms = config.frame_ms;
    let mut session = TerminalSession::new(&config)?;
    log::info!(
        "Starting termfolio ({} commands, {frame_ms} ms frames)",
        session.table().len()
    );

    let mut surface = ConsoleSurface::new(io::stdout());
    let mut lines = io::stdin().lock().lines();

    loop {
        session.render_to(&mut surface)?;

        if !session.input_visible() {
            thread::sleep(Duration::from_millis(u64::from(frame_ms)));
            session.tick(frame_ms);
            continue;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("failed to read stdin")?;
        for ch in line.chars() {
            session.insert_char(ch);
        }
        if let Some(SubmitOutcome::Cleared) = session.submit_input() {
            surface.reset()?;
        }
    }

    println!();
    log::info!("termfolio exiting");
    Ok(())
}

/// Config path from the first CLI argument or `TERMFOLIO_CONFIG`.
fn config_path() -> Option<PathBuf> {
    std::env::args()
        .nth(1)
        .or_else(|| std::env::var("TERMFOLIO_CONFIG").ok())
        .map(PathBuf::from)
}
