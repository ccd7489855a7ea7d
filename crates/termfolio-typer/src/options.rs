//! Typer configuration.

use termfolio_types::config::{SpeedRange, TypingConfig};

/// Cursor appearance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorOptions {
    pub show: bool,
    pub character: String,
    /// Hide the cursor while units are being typed or deleted.
    pub hide_while_typing: bool,
    /// Half-period of the blink. Zero disables blinking.
    pub blink_ms: u32,
}

impl Default for CursorOptions {
    fn default() -> Self {
        Self {
            show: true,
            character: "|".to_string(),
            hide_while_typing: false,
            blink_ms: 500,
        }
    }
}

/// Everything a [`TextTyper`](crate::TextTyper) needs besides its texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TyperOptions {
    pub typing_speed_ms: u32,
    pub deleting_speed_ms: u32,
    /// Pause between a fully typed text and the start of its deletion.
    pub pause_ms: u32,
    pub initial_delay_ms: u32,
    /// Uniform random per-unit typing delay, overriding `typing_speed_ms`.
    pub variable_speed: Option<SpeedRange>,
    /// Restart at the first text after the last one.
    pub looping: bool,
    /// Stay idle until [`set_visible(true)`](crate::TextTyper::set_visible).
    pub start_on_visible: bool,
    /// Type plain texts back to front. Ignored for HTML.
    pub reverse: bool,
    /// Treat texts as HTML fragments.
    pub is_html: bool,
    pub cursor: CursorOptions,
    /// Colors cycled per text index.
    pub text_colors: Vec<String>,
    /// Fixed RNG seed for variable speed. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for TyperOptions {
    fn default() -> Self {
        Self {
            typing_speed_ms: 50,
            deleting_speed_ms: 30,
            pause_ms: 2_000,
            initial_delay_ms: 0,
            variable_speed: None,
            looping: true,
            start_on_visible: false,
            reverse: false,
            is_html: false,
            cursor: CursorOptions::default(),
            text_colors: Vec::new(),
            seed: None,
        }
    }
}

impl TyperOptions {
    /// Options for a one-shot terminal reveal: no looping, HTML content.
    pub fn from_config(config: &TypingConfig) -> Self {
        Self {
            typing_speed_ms: config.typing_speed_ms,
            deleting_speed_ms: config.deleting_speed_ms,
            pause_ms: config.pause_ms,
            initial_delay_ms: config.initial_delay_ms,
            variable_speed: config.variable_speed,
            looping: false,
            start_on_visible: false,
            reverse: false,
            is_html: true,
            cursor: CursorOptions {
                show: config.show_cursor,
                character: config.cursor_character.clone(),
                hide_while_typing: config.hide_cursor_while_typing,
                blink_ms: config.cursor_blink_ms,
            },
            text_colors: Vec::new(),
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config_copies_timing() {
        let config = TypingConfig {
            typing_speed_ms: 12,
            variable_speed: Some(SpeedRange {
                min_ms: 3,
                max_ms: 9,
            }),
            cursor_character: "_".into(),
            ..TypingConfig::default()
        };
        let opts = TyperOptions::from_config(&config);
        assert_eq!(opts.typing_speed_ms, 12);
        assert_eq!(opts.deleting_speed_ms, 30);
        assert_eq!(opts.variable_speed.map(|r| r.max_ms), Some(9));
        assert_eq!(opts.cursor.character, "_");
        assert!(opts.is_html);
        assert!(!opts.looping);
    }

    #[test]
    fn with_seed_sets_seed() {
        assert_eq!(TyperOptions::default().with_seed(7).seed, Some(7));
    }
}
