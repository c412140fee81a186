//! Error types for the rebalancer.

use std::path::PathBuf;

use flowsplit::RebalanceError;

/// All errors that can occur while planning a rebalance.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("invalid scenario: {0}")]
    Scenario(String),

    #[error("failed to read scenario file {path}: {source}")]
    ScenarioRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse scenario JSON: {0}")]
    ScenarioParse(#[from] serde_json::Error),

    #[error("failed to render report: {0}")]
    Render(String),

    #[error("rebalance failed: {0}")]
    Engine(#[from] RebalanceError),
}

pub type Result<T> = std::result::Result<T, Error>;
