//! Game configuration.
//!
//! An optional TOML file supplies file paths and a preset roster;
//! every field has a default so a missing file just means defaults.
//! CLI flags override whatever the file provides.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Configuration for one game session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Path to the question file (.csv, .json or .xml).
    #[serde(default = "default_questions")]
    pub questions: PathBuf,

    /// Where to write the text report.
    #[serde(default = "default_text_report")]
    pub text_report: PathBuf,

    /// Where to write the JSON report.
    #[serde(default = "default_json_report")]
    pub json_report: PathBuf,

    /// Where to write the CSV event log.
    #[serde(default = "default_event_log")]
    pub event_log: PathBuf,

    /// Preset player names (1-4). When absent, setup prompts.
    #[serde(default)]
    pub players: Option<Vec<String>>,
}

fn default_questions() -> PathBuf {
    PathBuf::from("questions.csv")
}

fn default_text_report() -> PathBuf {
    PathBuf::from("trivia_report.txt")
}

fn default_json_report() -> PathBuf {
    PathBuf::from("trivia_report.json")
}

fn default_event_log() -> PathBuf {
    PathBuf::from("event_log.csv")
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            questions: default_questions(),
            text_report: default_text_report(),
            json_report: default_json_report(),
            event_log: default_event_log(),
            players: None,
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or does not parse.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {e}")))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {e}")))?;

        info!("Config loaded successfully");
        Ok(config)
    }

    /// Loads the file when it exists, otherwise returns defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
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
