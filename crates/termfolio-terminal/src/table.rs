//! Command name to payload mapping.

use std::collections::BTreeMap;

use termfolio_markup::validate_markup;
use termfolio_types::config::{CLEAR_COMMAND, TerminalConfig};
use termfolio_types::error::{Result, TermfolioError};

use crate::commands::register_builtins;

/// What a submitted line resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// The reserved `clear` command.
    Clear,
    /// A known command and its HTML payload.
    Payload(&'a str),
    NotFound,
}

/// Immutable lowercase-name to HTML-payload mapping.
///
/// Names are kept in registration order for the header line.
#[derive(Debug, Clone, Default)]
pub struct CommandTable {
    payloads: BTreeMap<String, String>,
    order: Vec<String>,
}

impl CommandTable {
    /// Create an empty command table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock portfolio commands.
    pub fn builtin() -> Self {
        let mut table = Self::new();
        register_builtins(&mut table);
        table
    }

    /// Builtins plus the configured overrides. Every override must be
    /// well-formed markup.
    pub fn from_config(config: &TerminalConfig) -> Result<Self> {
        let mut table = Self::builtin();
        for (name, payload) in &config.commands {
            validate_markup(payload).map_err(|e| {
                TermfolioError::Config(format!("payload for '{}': {e}", name.trim()))
            })?;
            table.register(name, payload);
        }
        log::debug!("command table ready with {} commands", table.len());
        Ok(table)
    }

    /// Register a command. Replaces any existing payload with the same
    /// (case-insensitive) name.
    pub fn register(&mut self, name: &str, payload: &str) {
        let key = command_key(name);
        if !self.payloads.contains_key(&key) {
            self.order.push(key.clone());
        }
        self.payloads.insert(key, payload.to_string());
    }

    /// Resolve a trimmed input line. Matching is exact apart from case.
    pub fn resolve(&self, input: &str) -> Resolution<'_> {
        let key = command_key(input);
        if key == CLEAR_COMMAND {
            return Resolution::Clear;
        }
        match self.payloads.get(&key) {
            Some(payload) => Resolution::Payload(payload),
            None => Resolution::NotFound,
        }
    }

    /// Payload for a command name, if registered.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.payloads.get(&command_key(name)).map(String::as_str)
    }

    /// Registered names in registration order, `clear` excluded.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }

    /// One-line command summary shown above the history.
    pub fn header_line(&self) -> String {
        let mut names: Vec<&str> = self.names().collect();
        names.push(CLEAR_COMMAND);
        names.join(" | ")
    }
}

/// Lookup key: surrounding whitespace dropped, ASCII letters lowercased.
fn command_key(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}
