//! Player settings persisted between sessions.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Default settings file name, relative to the working directory.
pub const DEFAULT_SETTINGS_FILE: &str = "quantum_games.toml";

/// Settings stored in a TOML file.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct Settings {
    /// Whether the player has finished the onboarding tutorial.
    #[serde(default)]
    onboarding_complete: bool,

    /// Fixed collapse seed; a fresh one is drawn when absent.
    #[serde(default)]
    seed: Option<u64>,

    /// Where the terminal UI writes its log.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,
}

#[instrument]
fn default_log_file() -> PathBuf {
    PathBuf::from("quantum_games.log")
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            onboarding_complete: false,
            seed: None,
            log_file: default_log_file(),
        }
    }
}

impl Settings {
    /// Loads settings from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading settings from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read settings file: {}", e)))?;

        let settings: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse settings: {}", e)))?;

        info!(onboarding_complete = settings.onboarding_complete, "Settings loaded");
        Ok(settings)
    }

    /// Loads settings, falling back to defaults when the file does not exist.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Settings file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Writes settings back to a TOML file.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = toml::to_string(self)
            .map_err(|e| ConfigError::new(format!("Failed to serialize settings: {}", e)))?;
        std::fs::write(path.as_ref(), content)
            .map_err(|e| ConfigError::new(format!("Failed to write settings file: {}", e)))?;
        debug!("Settings saved");
        Ok(())
    }

    /// Records that the tutorial has been completed.
    pub fn complete_onboarding(&mut self) {
        self.onboarding_complete = true;
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
    #[instrument(skip(message))]
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
    fn test_missing_fields_use_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings, Settings::default());
        assert!(!settings.onboarding_complete());
        assert_eq!(settings.log_file(), &PathBuf::from("quantum_games.log"));
    }

    #[test]
    fn test_parse_full_file() {
        let settings: Settings = toml::from_str(
            r#"
onboarding_complete = true
seed = 99
log_file = "logs/qttt.log"
"#,
        )
        .unwrap();
        assert!(*settings.onboarding_complete());
        assert_eq!(*settings.seed(), Some(99));
        assert_eq!(settings.log_file(), &PathBuf::from("logs/qttt.log"));
    }

    #[test]
    fn test_setters_override() {
        let settings = Settings::default().with_seed(Some(3));
        assert_eq!(*settings.seed(), Some(3));
    }
}
