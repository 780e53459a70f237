//! Game configuration loaded from TOML.

use crate::games::tictactoe::GameOptions;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use strum::{Display as StrumDisplay, EnumString};
use tracing::{debug, info, instrument};

/// Board variant.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    StrumDisplay,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Mode {
    /// One board.
    #[default]
    Classic,
    /// A board of boards.
    Ultimate,
}

/// Parameters for a new game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board side length.
    #[serde(default = "default_size")]
    size: usize,

    /// Run length needed to win.
    #[serde(default = "default_win_length")]
    win_length: usize,

    /// Moves kept per player before the oldest fades; `0` disables fading.
    #[serde(default)]
    fade_threshold: usize,

    /// Board variant.
    #[serde(default)]
    mode: Mode,

    /// Language passed to the localizer.
    #[serde(default = "default_language")]
    language: String,
}

fn default_size() -> usize {
    3
}

fn default_win_length() -> usize {
    3
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            win_length: default_win_length(),
            fade_threshold: 0,
            mode: Mode::default(),
            language: default_language(),
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file. Missing keys take defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(
            size = config.size,
            win_length = config.win_length,
            mode = %config.mode,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Overrides the board size.
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Overrides the win length.
    pub fn with_win_length(mut self, win_length: usize) -> Self {
        self.win_length = win_length;
        self
    }

    /// Overrides the fade threshold.
    pub fn with_fade_threshold(mut self, fade_threshold: usize) -> Self {
        self.fade_threshold = fade_threshold;
        self
    }

    /// Overrides the board variant.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Overrides the language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Game options for these settings plus the given computer players.
    pub fn options(&self, ai_players: &[String]) -> GameOptions {
        ai_players.iter().fold(
            GameOptions::default()
                .with_fade_threshold(self.fade_threshold)
                .with_language(self.language.clone()),
            |options, player| options.with_ai_player(player.clone()),
        )
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
