//! Seed catalog configuration loading from config.toml
//!
//! The items listed in config.toml are inserted into an empty catalog on first run.
//! The file also carries the currency symbol used when showing prices.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

fn default_currency() -> String {
    "₹".to_string()
}

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Symbol shown in front of every amount
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Items to seed an empty catalog with
    #[serde(default)]
    pub items: Vec<ItemConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            items: Vec::new(),
        }
    }
}

/// Configuration for a single seed item
#[derive(Debug, Deserialize, Clone)]
pub struct ItemConfig {
    /// Name of the item
    pub name: String,
    /// Unit price
    pub price: f64,
}

/// Loads the catalog configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads the catalog configuration from the default location (./config.toml)
pub fn load_default_config() -> Result<Config> {
    load_config("config.toml")
}
