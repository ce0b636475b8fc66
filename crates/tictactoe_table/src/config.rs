//! Table configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

use crate::Seat;

/// Player names, board marks and the default log filter.
///
/// Every field is optional in the file; missing ones fall back to the
/// defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct TableConfig {
    /// Name of the player using the X mark.
    #[serde(default = "default_name_first")]
    name_first: String,

    /// Name of the player using the O mark.
    #[serde(default = "default_name_second")]
    name_second: String,

    /// Board mark of the X player.
    #[serde(default = "default_mark_first")]
    mark_first: char,

    /// Board mark of the O player.
    #[serde(default = "default_mark_second")]
    mark_second: char,

    /// Mark for fields nobody owns yet.
    #[serde(default = "default_mark_empty")]
    mark_empty: char,

    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    log_filter: String,
}

fn default_name_first() -> String {
    "Player X".to_string()
}

fn default_name_second() -> String {
    "Player O".to_string()
}

fn default_mark_first() -> char {
    'X'
}

fn default_mark_second() -> char {
    'O'
}

fn default_mark_empty() -> char {
    ' '
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            name_first: default_name_first(),
            name_second: default_name_second(),
            mark_first: default_mark_first(),
            mark_second: default_mark_second(),
            mark_empty: default_mark_empty(),
            log_filter: default_log_filter(),
        }
    }
}

impl TableConfig {
    /// Creates a configuration with custom player names and default marks.
    #[instrument(skip(name_first, name_second))]
    pub fn with_names(name_first: impl Into<String>, name_second: impl Into<String>) -> Self {
        Self {
            name_first: name_first.into(),
            name_second: name_second.into(),
            ..Self::default()
        }
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(
            name_first = %config.name_first,
            name_second = %config.name_second,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the three board marks can be told apart.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let marks = [self.mark_first, self.mark_second, self.mark_empty];
        if marks[0] == marks[1] || marks[0] == marks[2] || marks[1] == marks[2] {
            return Err(ConfigError::new(format!(
                "Board marks must be distinct, got {:?}, {:?} and {:?}",
                self.mark_first, self.mark_second, self.mark_empty
            )));
        }
        Ok(())
    }

    /// Name of the player sitting in `seat`.
    pub fn name_of(&self, seat: Seat) -> &str {
        match seat {
            Seat::X => &self.name_first,
            Seat::O => &self.name_second,
        }
    }

    /// Board mark of the player sitting in `seat`.
    pub fn mark_of(&self, seat: Seat) -> char {
        match seat {
            Seat::X => self.mark_first,
            Seat::O => self.mark_second,
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
    /// Creates a new configuration error at the caller's location.
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
