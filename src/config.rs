//! Configuration management and validation.
//!
//! Provides the TOML-backed configuration for the processing pipeline:
//! where transcript exports live, where reports go, and an optional
//! college filter. Command-line flags take precedence over file values.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::normalize_college;
use crate::{Error, Result};

/// Application name used for the default configuration directory
const CONFIG_DIR_NAME: &str = "transcript-processor";

/// Configuration file name
const CONFIG_FILE_NAME: &str = "config.toml";

/// Processing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory scanned for transcript text exports
    pub input_dir: PathBuf,

    /// Directory where generated reports are written
    pub output_dir: PathBuf,

    /// Colleges to process; empty means all colleges found in the input
    pub colleges: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("."),
            colleges: Vec::new(),
        }
    }
}

impl Config {
    /// Default configuration file location
    ///
    /// Resolves to `<config dir>/transcript-processor/config.toml`, e.g.
    /// `~/.config/transcript-processor/config.toml` on Linux.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load configuration with layered resolution
    ///
    /// An explicitly given file must exist and parse. Otherwise the default
    /// location is consulted if present, and built-in defaults apply when
    /// no file is found anywhere.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    path.display()
                )));
            }
            return Self::from_file(path);
        }

        if let Some(default_path) = Self::default_config_path() {
            if default_path.exists() {
                return Self::from_file(&default_path);
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("Failed to read {}", path.display()), e))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| Error::configuration(format!("Invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration for consistency
    pub fn validate(&self) -> Result<()> {
        if self.input_dir.as_os_str().is_empty() {
            return Err(Error::configuration(
                "input_dir cannot be empty".to_string(),
            ));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(Error::configuration(
                "output_dir cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Canonical college filter codes, normalized from any informal labels
    pub fn college_filter(&self) -> Vec<String> {
        self.colleges.iter().map(|c| normalize_college(c)).collect()
    }
}
