//! Error types for termfolio.

use std::io;

/// Errors produced by termfolio.
///
/// Unknown commands are not errors: they resolve to a rendered
/// "Command not found" payload inside the normal output flow.
#[derive(Debug, thiserror::Error)]
pub enum TermfolioError {
    #[error("config error: {0}")]
    Config(String),

    #[error("markup error: {0}")]
    Markup(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, TermfolioError>;
