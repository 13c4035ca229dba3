//! Configuration management
//!
//! Handles loading of JSON plan files with environment variable overrides
//! for display precision.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::plan::PlanInputs;

/// Fractional digits shown for prices
pub const DEFAULT_PRICE_DECIMALS: u32 = 3;
/// Fractional digits shown for percentages
pub const DEFAULT_PERCENT_DECIMALS: u32 = 2;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub plan: PlanInputs,
    #[serde(default)]
    pub display: DisplaySettings,
}

impl Config {
    /// Load configuration from JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref()).context("Failed to read config file")?;
        let mut config: Config =
            serde_json::from_str(&contents).context("Failed to parse config JSON")?;
        config.display.apply_env()?;
        Ok(config)
    }

    /// Defaults plus environment overrides, used when no file is given
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();
        config.display.apply_env()?;
        Ok(config)
    }
}

/// Output precision, chosen independently for prices and percentages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub price_decimals: u32,
    pub percent_decimals: u32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            price_decimals: DEFAULT_PRICE_DECIMALS,
            percent_decimals: DEFAULT_PERCENT_DECIMALS,
        }
    }
}

impl DisplaySettings {
    /// Override precision from `LADDER_PRICE_DECIMALS` / `LADDER_PERCENT_DECIMALS`
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(value) = std::env::var("LADDER_PRICE_DECIMALS") {
            self.price_decimals = value
                .trim()
                .parse()
                .with_context(|| format!("Invalid LADDER_PRICE_DECIMALS: {}", value))?;
        }
        if let Ok(value) = std::env::var("LADDER_PERCENT_DECIMALS") {
            self.percent_decimals = value
                .trim()
                .parse()
                .with_context(|| format!("Invalid LADDER_PERCENT_DECIMALS: {}", value))?;
        }
        Ok(())
    }
}
