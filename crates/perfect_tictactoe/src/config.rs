//! Play settings loaded from TOML.

use crate::search::SearchKind;
use crate::session::{GameMode, Theme};
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Settings for a game controller.
///
/// Every field has a default, so a settings file only needs the keys it
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct PlayConfig {
    /// Mode of the first game.
    mode: GameMode,

    /// Pause before the computer moves, in milliseconds. Only affects
    /// pacing, never which move is chosen.
    ai_delay_ms: u64,

    /// Search used for computer moves.
    search: SearchKind,

    /// Starting theme.
    theme: Theme,
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::SinglePlayer,
            ai_delay_ms: 500,
            search: SearchKind::AlphaBeta,
            theme: Theme::Light,
        }
    }
}

impl PlayConfig {
    /// Pause before the computer moves.
    pub fn ai_delay(&self) -> Duration {
        Duration::from_millis(self.ai_delay_ms)
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(mode = %config.mode, search = %config.search, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads `path` if it exists, otherwise falls back to defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            warn!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::new(format!("Failed to write config: {}", e)))
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = PlayConfig::from_toml("ai_delay_ms = 0\nmode = \"two_player\"\n")
            .expect("valid config");
        assert_eq!(*config.ai_delay_ms(), 0);
        assert_eq!(*config.mode(), GameMode::TwoPlayer);
        assert_eq!(*config.search(), SearchKind::AlphaBeta);
        assert_eq!(*config.theme(), Theme::Light);
    }

    #[test]
    fn test_bad_value_is_reported() {
        let err = PlayConfig::from_toml("search = \"random\"").unwrap_err();
        assert!(err.message.contains("Failed to parse config"));
        assert!(err.file.ends_with("config.rs"));
    }

    #[test]
    fn test_setters_override() {
        let config = PlayConfig::default()
            .with_search(SearchKind::Exhaustive)
            .with_ai_delay_ms(25);
        assert_eq!(config.ai_delay(), Duration::from_millis(25));
        assert_eq!(*config.search(), SearchKind::Exhaustive);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = PlayConfig::default().with_theme(Theme::Dark);
        let text = config.to_toml().expect("serialisable");
        assert_eq!(PlayConfig::from_toml(&text).expect("parseable"), config);
    }
}
