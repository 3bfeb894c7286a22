//! Error types for configuration and simulation runs

use std::path::PathBuf;
use thiserror::Error;

/// Invalid or unreadable policy / codebook configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("policy name must not be empty")]
    EmptyName,

    #[error("policy '{name}': weekly rate must be a non-negative number, found {value}")]
    InvalidRate { name: String, value: f64 },

    #[error("policy '{name}': offset days ({offset}) exceed day threshold for cap ({threshold})")]
    OffsetAboveThreshold { name: String, offset: u32, threshold: u32 },

    #[error("policy '{name}': offset days ({offset}) exceed minimum eligible days ({min_days})")]
    OffsetAboveMinDays { name: String, offset: u32, min_days: u32 },

    #[error("codebook maps sentinel code {0} to a bracket")]
    SentinelBracket(u16),

    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised while loading records or running scenarios
#[derive(Debug, Error)]
pub enum SimError {
    #[error("row {row}: missing required field {field}")]
    MissingField { row: usize, field: &'static str },

    #[error("row {row}: {reason}")]
    InvalidRecord { row: usize, reason: String },

    #[error("comparison needs at least one scenario")]
    NoScenarios,

    #[error("scenario '{scenario}' has {found} results, expected {expected}")]
    MismatchedScenarios { scenario: String, expected: usize, found: usize },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
