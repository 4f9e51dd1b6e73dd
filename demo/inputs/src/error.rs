//! Errors raised while generating baselines.

use forecast_core::types::SeriesError;
use thiserror::Error;

/// Failure to produce a baseline series.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// Generation parameters are unusable.
    #[error("Invalid generation parameters: {0}")]
    InvalidParams(String),

    /// A period label would fall outside the supported calendar.
    #[error("Period {index} is out of calendar range from {start}")]
    DateOutOfRange {
        /// Start date of the series
        start: String,
        /// Zero-based period index
        index: usize,
    },

    /// A sampling distribution could not be built.
    #[error("Distribution error: {0}")]
    Distribution(String),

    /// The generated records did not form a valid series.
    #[error(transparent)]
    Series(#[from] SeriesError),
}

impl InputError {
    /// Create an invalid parameters error.
    pub fn invalid_params(msg: impl Into<String>) -> Self {
        Self::InvalidParams(msg.into())
    }
}

impl From<rand_distr::NormalError> for InputError {
    fn from(err: rand_distr::NormalError) -> Self {
        Self::Distribution(err.to_string())
    }
}
