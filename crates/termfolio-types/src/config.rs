//! Terminal configuration loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file at all) yields
//! the stock portfolio terminal. A typical override file:
//!
//! ```toml
//! prompt = "ada@portfolio:~$"
//!
//! [typing]
//! typing_speed_ms = 15
//! variable_speed = { min_ms = 5, max_ms = 25 }
//!
//! [commands]
//! blog = "Blog:<br />Coming soon."
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, TermfolioError};

/// Name of the command that resets the terminal. It never maps to a
/// payload.
pub const CLEAR_COMMAND: &str = "clear";

/// Top-level terminal configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TerminalConfig {
    /// Prompt shown before every input line.
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// HTML shown once above the history (never typed).
    #[serde(default = "default_welcome")]
    pub welcome: String,
    /// Host loop period in milliseconds.
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u32,
    #[serde(default)]
    pub typing: TypingConfig,
    /// Extra commands, or replacements for builtin payloads. Keys are
    /// matched case-insensitively.
    #[serde(default)]
    pub commands: BTreeMap<String, String>,
}

fn default_prompt() -> String {
    "guest@portfolio:~$".to_string()
}
fn default_welcome() -> String {
    "Hi, welcome to my interactive portfolio terminal!<br />\
     Type 'help' to see available commands."
        .to_string()
}
fn default_frame_ms() -> u32 {
    16
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            welcome: default_welcome(),
            frame_ms: default_frame_ms(),
            typing: TypingConfig::default(),
            commands: BTreeMap::new(),
        }
    }
}

/// Typewriter timing and cursor settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TypingConfig {
    /// Delay between revealed units.
    #[serde(default = "default_typing_speed")]
    pub typing_speed_ms: u32,
    /// Delay between deleted units (multi-text cycling only).
    #[serde(default = "default_deleting_speed")]
    pub deleting_speed_ms: u32,
    /// Pause between a fully typed text and the start of deletion.
    #[serde(default)]
    pub pause_ms: u32,
    /// Delay before the first unit of a session.
    #[serde(default)]
    pub initial_delay_ms: u32,
    /// When set, each unit waits a uniform random delay in this range
    /// instead of `typing_speed_ms`.
    #[serde(default)]
    pub variable_speed: Option<SpeedRange>,
    #[serde(default = "yes")]
    pub show_cursor: bool,
    #[serde(default = "default_cursor")]
    pub cursor_character: String,
    #[serde(default)]
    pub hide_cursor_while_typing: bool,
    /// Half-period of the cursor blink.
    #[serde(default = "default_blink")]
    pub cursor_blink_ms: u32,
}

fn default_typing_speed() -> u32 {
    10
}
fn default_deleting_speed() -> u32 {
    30
}
fn default_cursor() -> String {
    "|".to_string()
}
fn default_blink() -> u32 {
    500
}
fn yes() -> bool {
    true
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            typing_speed_ms: default_typing_speed(),
            deleting_speed_ms: default_deleting_speed(),
            pause_ms: 0,
            initial_delay_ms: 0,
            variable_speed: None,
            show_cursor: true,
            cursor_character: default_cursor(),
            hide_cursor_while_typing: false,
            cursor_blink_ms: default_blink(),
        }
    }
}

/// Inclusive millisecond range for variable-speed typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SpeedRange {
    pub min_ms: u32,
    pub max_ms: u32,
}

impl TerminalConfig {
    /// Parse a configuration from TOML text and validate it.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        log::info!(
            "Loaded config from {} ({} custom commands)",
            path.display(),
            config.commands.len()
        );
        Ok(config)
    }

    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if let Some(range) = self.typing.variable_speed
            && range.min_ms > range.max_ms
        {
            return Err(TermfolioError::Config(format!(
                "variable_speed.min_ms ({}) exceeds max_ms ({})",
                range.min_ms, range.max_ms
            )));
        }
        if self.frame_ms == 0 {
            return Err(TermfolioError::Config("frame_ms must be positive".into()));
        }
        for name in self.commands.keys() {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                return Err(TermfolioError::Config("empty command name".into()));
            }
            if trimmed.eq_ignore_ascii_case(CLEAR_COMMAND) {
                return Err(TermfolioError::Config(format!(
                    "'{CLEAR_COMMAND}' is reserved and cannot carry a payload"
                )));
            }
            if trimmed.contains(char::is_whitespace) {
                return Err(TermfolioError::Config(format!(
                    "command name '{trimmed}' contains whitespace"
                )));
            }
        }
        Ok(())
    }
}
