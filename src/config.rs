//! Run configuration.
//!
//! Every field has a default, so a configuration file only needs the values it
//! changes:
//!
//! ```json
//! { "strategy": "order_id_numeric", "parallel": true }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::types::SortStrategy;
use crate::extraction::DEFAULT_MIN_TRACKING_LENGTH;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Settings for one reordering run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How matched pages are ordered
    pub strategy: SortStrategy,

    /// Extract and match pages on the rayon thread pool
    pub parallel: bool,

    /// Shortest identifier a carrier rule accepts
    pub min_tracking_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strategy: SortStrategy::ExcelOrder,
            parallel: false,
            min_tracking_length: DEFAULT_MIN_TRACKING_LENGTH,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadError` if the file cannot be read or
    /// `ConfigError::ParseError` if it is not valid configuration JSON.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse configuration from a JSON string
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ParseError` on malformed JSON or unknown values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}
