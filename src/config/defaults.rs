//! Draft starting values loaded from config.toml
//!
//! This module provides functionality to load the starting values applied to
//! a freshly opened order draft from a TOML configuration file. Every field
//! is optional; anything missing falls back to the built-in defaults, and a
//! missing config file means the built-in defaults are used wholesale.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Starting values for new order drafts
    #[serde(default)]
    pub defaults: DraftDefaults,
}

/// Starting values applied to a freshly opened order draft
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DraftDefaults {
    /// Proposed rental price per square meter
    pub price_per_sqm: f64,
    /// Panel rows pre-filled into the first screen requirement
    pub grid_rows: i64,
    /// Panel columns pre-filled into the first screen requirement
    pub grid_columns: i64,
    /// Laptops requested before the operator edits the draft
    pub laptops_needed: i64,
    /// Video processors requested before the operator edits the draft
    pub video_processors_needed: i64,
}

impl Default for DraftDefaults {
    fn default() -> Self {
        Self {
            price_per_sqm: 150.0,
            grid_rows: 8,
            grid_columns: 12,
            laptops_needed: 1,
            video_processors_needed: 1,
        }
    }
}

/// Loads dashboard configuration from a TOML file
///
/// # Arguments
/// * `path` - Path to the config.toml file
///
/// # Returns
/// * `Ok(Config)` - Successfully parsed configuration
/// * `Err(Error)` - Failed to read or parse the configuration file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads configuration from the default location (./config.toml)
///
/// A missing file is not an error; the built-in defaults are returned instead.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_default_config() -> Result<Config> {
    let path = Path::new("config.toml");
    if path.exists() {
        load_config(path)
    } else {
        Ok(Config::default())
    }
}
