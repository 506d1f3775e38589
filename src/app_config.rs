use anyhow::{Context, Result, anyhow};
use log::{LevelFilter, debug};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;

use crate::file_utils::FileManager;

/// Application configuration module
/// This module handles the application configuration: defaults for the
/// command line, loaded from an optional JSON file and then validated.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Column at which subcommand help is wrapped, 0 for no wrapping
    #[serde(default = "default_wrap_column")]
    pub wrap_column: usize,

    /// Check the glossary for validity after loading
    #[serde(default = "default_true")]
    pub check: bool,

    /// Filters to apply when none are given on the command line
    #[serde(default = "default_filters")]
    pub default_filters: Vec<String>,

    /// Views to build when none are given on the command line
    #[serde(default = "default_views")]
    pub default_views: Vec<String>,
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

impl LogLevel {
    // @returns: Filter for the log facade
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
        }
    }
}

fn default_wrap_column() -> usize {
    crate::subcmd::DEFAULT_HELP_WRAP
}

fn default_true() -> bool {
    true
}

fn default_filters() -> Vec<String> {
    vec!["pass".to_string()]
}

fn default_views() -> Vec<String> {
    vec!["null".to_string()]
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.wrap_column != 0 && self.wrap_column < 20 {
            return Err(anyhow!(
                "Wrap column must be 0 (no wrapping) or at least 20, got {}",
                self.wrap_column
            ));
        }

        for (what, names) in [("filter", &self.default_filters), ("view", &self.default_views)] {
            if names.is_empty() {
                return Err(anyhow!("At least one default {} is required", what));
            }
            if let Some(name) = names.iter().find(|n| n.trim().is_empty()) {
                return Err(anyhow!("Invalid default {} name: '{}'", what, name));
            }
        }

        Ok(())
    }

    /// Load the configuration from a JSON file, or the defaults if the file does not exist.
    ///
    /// No file is created for missing configuration.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !FileManager::file_exists(path) {
            debug!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = FileManager::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        Ok(config)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: LogLevel::default(),
            wrap_column: default_wrap_column(),
            check: default_true(),
            default_filters: default_filters(),
            default_views: default_views(),
        }
    }
}
