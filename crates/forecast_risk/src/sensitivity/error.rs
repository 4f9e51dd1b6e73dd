//! Sensitivity analysis error types.

use forecast_core::types::SeriesError;
use thiserror::Error;

/// Errors that can occur while running a sensitivity analysis.
///
/// Series failures that the caller is expected to handle specifically
/// (`MissingField`, `EmptySeries`) are lifted into their own variants;
/// anything else from the series layer is carried in `Series`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SensitivityError {
    /// A requested parameter (or transform target) is absent from a record.
    #[error("Missing field '{field}' in period '{period}'")]
    MissingField {
        /// Name of the missing field
        field: String,
        /// Label of the period lacking the field
        period: String,
    },

    /// The baseline aggregate is zero, so percentage impact is undefined.
    #[error("Baseline aggregate '{aggregate}' is zero; percentage impact is undefined")]
    DivisionByZero {
        /// Name of the aggregate
        aggregate: String,
    },

    /// The baseline has no periods.
    #[error("Baseline series is empty")]
    EmptySeries,

    /// A perturbation level is not a finite percentage.
    #[error("Invalid perturbation level: {0}")]
    InvalidLevel(String),

    /// An aggregate evaluated to NaN or infinity.
    #[error("Aggregate is not finite ({value}) for {context}")]
    NonFiniteAggregate {
        /// What was being evaluated (baseline, or parameter and level)
        context: String,
        /// The offending value
        value: f64,
    },

    /// Any other series failure.
    #[error(transparent)]
    Series(SeriesError),

    /// Invalid forecast band input.
    #[error("Invalid forecast band: {0}")]
    Band(String),
}

impl SensitivityError {
    /// Create an invalid level error.
    pub fn invalid_level(msg: impl Into<String>) -> Self {
        Self::InvalidLevel(msg.into())
    }

    /// Create a forecast band error.
    pub fn band(msg: impl Into<String>) -> Self {
        Self::Band(msg.into())
    }

    /// Create a non-finite aggregate error.
    pub fn non_finite(context: impl Into<String>, value: f64) -> Self {
        Self::NonFiniteAggregate {
            context: context.into(),
            value,
        }
    }
}

impl From<SeriesError> for SensitivityError {
    fn from(err: SeriesError) -> Self {
        match err {
            SeriesError::MissingField { field, period } => Self::MissingField { field, period },
            SeriesError::EmptySeries => Self::EmptySeries,
            other => Self::Series(other),
        }
    }
}
