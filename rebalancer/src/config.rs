//! TOML configuration loading and validation.

use std::path::Path;

use flowsplit::Strategy;
use log::info;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub rebalance: RebalanceConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RebalanceConfig {
    #[serde(default)]
    pub strategy: Strategy,
    #[serde(default = "default_tolerance")]
    pub target_tolerance: f64,
}

impl Default for RebalanceConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            target_tolerance: default_tolerance(),
        }
    }
}

fn default_tolerance() -> f64 {
    1e-6
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_decimals")]
    pub decimals: usize,
    #[serde(default = "default_decimals")]
    pub fraction_decimals: usize,
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            decimals: default_decimals(),
            fraction_decimals: default_decimals(),
            format: OutputFormat::default(),
        }
    }
}

fn default_decimals() -> usize {
    2
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Config {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&contents)
    }

    /// Load config from `path`, or fall back to defaults if it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let config = Self::load(path)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate config invariants.
    fn validate(&self) -> Result<()> {
        let tol = self.rebalance.target_tolerance;
        if !(tol > 0.0 && tol <= 0.01) {
            return Err(Error::Config(
                "target_tolerance must be in (0.0, 0.01]".into(),
            ));
        }
        if self.output.decimals > 10 {
            return Err(Error::Config("decimals must be <= 10".into()));
        }
        if self.output.fraction_decimals > 10 {
            return Err(Error::Config("fraction_decimals must be <= 10".into()));
        }
        Ok(())
    }
}
