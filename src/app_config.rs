use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::language_utils;
use crate::quota::DEFAULT_CHARACTER_LIMIT;

/// Application configuration module
/// This module handles loading, validating and saving the configuration,
/// including the DeepL API key the translation client authenticates with.
/// Default configuration file, created on first save if absent
pub const DEFAULT_CONFIG_PATH: &str = "conf.json";

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// DeepL API key; empty until the user stores one
    #[serde(default)]
    pub deepl_api_key: String,

    /// Source language code (ISO); empty lets DeepL detect the source
    #[serde(default)]
    pub source_language: String,

    /// Target language code (ISO)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Character quota the local gate classifies documents against
    #[serde(default = "default_character_limit")]
    pub character_limit: u64,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_target_language() -> String {
    "en".to_string()
}

fn default_character_limit() -> u64 {
    DEFAULT_CHARACTER_LIMIT
}

impl Default for Config {
    fn default() -> Self {
        Config {
            deepl_api_key: String::new(),
            source_language: String::new(),
            target_language: default_target_language(),
            character_limit: default_character_limit(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load the configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load the configuration, falling back to defaults when the file does
    /// not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Config> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Config::default())
        }
    }

    /// Save the configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Whether an API key has been stored
    pub fn has_api_key(&self) -> bool {
        !self.deepl_api_key.trim().is_empty()
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.character_limit == 0 {
            return Err(anyhow!("character_limit must be a positive number"));
        }

        if self.target_language.trim().is_empty() {
            return Err(anyhow!("target_language must be set"));
        }
        language_utils::validate_language_code(&self.target_language)?;

        // Source language is optional; DeepL auto-detects when it is empty
        if !self.source_language.trim().is_empty() {
            language_utils::validate_language_code(&self.source_language)?;
        }

        Ok(())
    }
}
