//! Configuration management for the CLI
//!
//! This module handles loading configuration from:
//! - Default values
//! - Configuration files (TOML/YAML/JSON)
//! - The `GEOUNITS_CONFIG` environment variable (via `--config`)

use crate::error::{Error, Result};
use geounits_core::UnitMapConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Unit map construction settings
    pub units: UnitMapConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Use colored output by default
    pub color: bool,

    /// Pretty-print JSON written with `--save-to`
    pub pretty: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level used when no `-v` flag is given
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            pretty: true,
        }
    }
}

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            other => Err(Error::InvalidFormat {
                path: path.to_path_buf(),
                expected: "TOML, YAML, or JSON".to_string(),
                reason: format!("unsupported extension {:?}", other.unwrap_or("")),
            }),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;

        let config = match ConfigFormat::from_path(path)? {
            ConfigFormat::Toml => toml::from_str(&content)?,
            ConfigFormat::Yaml => serde_yaml::from_str(&content)?,
            ConfigFormat::Json => serde_json::from_str(&content)?,
        };

        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        Self::load_first(&Self::default_config_paths())
    }

    /// Load the first existing file among `paths`
    ///
    /// A file that exists but cannot be read is an error; it is never
    /// replaced by defaults.
    fn load_first(paths: &[PathBuf]) -> Result<Self> {
        match paths.iter().find(|path| path.exists()) {
            Some(path) => {
                let config = Self::from_file(path).map_err(|e| {
                    Error::config(format!("failed to load {}: {}", path.display(), e))
                })?;
                tracing::debug!(path = %path.display(), "Loaded configuration");
                Ok(config)
            }
            // Return default config if no config file found
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        let config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::load()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that cannot produce a usable unit map
    pub fn validate(&self) -> Result<()> {
        if let Some(blank) = self.units.library_types.iter().find(|lt| lt.trim().is_empty()) {
            return Err(Error::config(format!(
                "library_types contains a blank entry: {:?}",
                blank
            )));
        }
        Ok(())
    }

    /// Get default configuration file paths to check
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".geounits.toml"),
            PathBuf::from(".geounits.yaml"),
            PathBuf::from(".geounits.json"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("geounits").join("config.toml"));
        }

        paths
    }
}
