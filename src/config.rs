//! Configuration for the stress harness.

use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use crate::error::IndexError;
use crate::error::Result;

/// Parameters for synthetic record generation and lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StressConfig {
    /// Prices are drawn uniformly from `[0, key_range)`.
    pub key_range: u32,
    /// Stock is drawn uniformly from `[0, stock_range)`.
    pub stock_range: u32,
    /// Fraction of `count` to look up, sampled with replacement.
    pub search_fraction: f64,
    /// Seed for the generator. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            key_range: 10_000,
            stock_range: 100,
            search_fraction: 0.1,
            seed: None,
        }
    }
}

impl StressConfig {
    /// Parse a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<StressConfig> {
        let config: StressConfig = serde_json::from_str(json)?;
        config.validate()?;
        return Ok(config);
    }

    /// Read and parse a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<StressConfig> {
        let json = std::fs::read_to_string(path)?;
        return StressConfig::from_json_str(&json);
    }

    pub fn validate(&self) -> Result<()> {
        if self.key_range == 0 {
            return Err(IndexError::InvalidConfig("key_range must be positive".to_string()));
        }
        if self.stock_range == 0 {
            return Err(IndexError::InvalidConfig("stock_range must be positive".to_string()));
        }
        if !(0.0..=1.0).contains(&self.search_fraction) {
            return Err(IndexError::InvalidConfig(format!(
                "search_fraction must be within [0, 1], got {}",
                self.search_fraction
            )));
        }
        return Ok(());
    }
}
