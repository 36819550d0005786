//! Configuration handling for Shellmate
//!
//! Settings are stored in `config.toml` in the platform config directory
//! (e.g. `~/.config/shellmate/` on Linux). The `SHELLMATE_CONFIG_DIR`
//! environment variable overrides the directory, which keeps tests and
//! sandboxed installs away from the real user config.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::ColorSpec;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine a config directory")]
    NoConfigDir,

    #[error("Unknown setting: '{0}'")]
    UnknownSetting(String),

    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// User configuration
///
/// All fields have serde defaults so a partial or missing config file loads
/// cleanly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Auth token for the assistant API
    pub token: Option<String>,

    /// Persona the assistant answers as ("default" for plain answers)
    pub persona: String,

    /// Color spec for command segments
    pub command_color: String,

    /// Color spec for comment segments
    pub comment_color: String,

    /// Offer to run commands found in replies
    pub run: bool,

    /// Share host metadata (OS, shell) with the API
    pub meta: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: None,
            persona: "default".to_string(),
            command_color: "bold bright blue".to_string(),
            comment_color: "bright gray".to_string(),
            run: true,
            meta: true,
        }
    }
}

impl Config {
    /// Returns the config directory, honoring `SHELLMATE_CONFIG_DIR`
    pub fn config_dir() -> Result<PathBuf> {
        if let Ok(dir) = std::env::var("SHELLMATE_CONFIG_DIR") {
            return Ok(PathBuf::from(dir));
        }

        ProjectDirs::from("dev", "shellmate", "shellmate")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or_else(|| ConfigError::NoConfigDir.into())
    }

    fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads the configuration, falling back to defaults when no file exists
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Saves the configuration, creating the config directory if needed
    pub fn save(&self) -> Result<()> {
        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;

        let path = dir.join("config.toml");
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))
    }

    /// Sets a recognized setting from string key/value, validating colors
    /// and booleans before they reach the file
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "persona" => self.persona = value.to_string(),
            "command_color" | "comment_color" => {
                value
                    .parse::<ColorSpec>()
                    .map_err(|e| ConfigError::InvalidValue {
                        key: key.to_string(),
                        message: e.to_string(),
                    })?;
                if key == "command_color" {
                    self.command_color = value.to_string();
                } else {
                    self.comment_color = value.to_string();
                }
            }
            "run" | "meta" => {
                let parsed: bool = value.parse().map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("expected 'true' or 'false', got '{}'", value),
                })?;
                if key == "run" {
                    self.run = parsed;
                } else {
                    self.meta = parsed;
                }
            }
            other => return Err(ConfigError::UnknownSetting(other.to_string()).into()),
        }

        Ok(())
    }

    /// Returns true once a token has been stored via `login`
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }
}
