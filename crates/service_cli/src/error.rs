//! Error types for the forecast CLI.

use crate::config::ConfigError;
use adapter_loader::LoaderError;
use demo_inputs::InputError;
use forecast_risk::SensitivityError;
use thiserror::Error;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Baseline generation error
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Baseline import or export error
    #[error("Loader error: {0}")]
    Loader(#[from] LoaderError),

    /// Sensitivity computation error
    #[error("Sensitivity error: {0}")]
    Sensitivity(#[from] SensitivityError),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// JSON rendering error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV rendering error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
