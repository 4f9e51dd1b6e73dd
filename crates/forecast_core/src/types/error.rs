//! Error types for period records and baseline series.
//!
//! This module provides structured error types for series construction,
//! field lookup and metric evaluation using `thiserror` for derivation.

use thiserror::Error;

/// Errors that can occur while building or reading a baseline series.
///
/// # Examples
/// ```
/// use forecast_core::types::SeriesError;
///
/// let err = SeriesError::MissingField {
///     field: "revenue".to_string(),
///     period: "Q1 2024".to_string(),
/// };
/// assert_eq!(format!("{}", err), "Missing field 'revenue' in period 'Q1 2024'");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    /// A requested field is absent from a period record.
    #[error("Missing field '{field}' in period '{period}'")]
    MissingField {
        /// Name of the missing field
        field: String,
        /// Label of the period lacking the field
        period: String,
    },

    /// The series has no periods.
    #[error("Series is empty")]
    EmptySeries,

    /// A record does not share the schema of the first record.
    #[error("Schema mismatch in period '{period}': expected [{expected}], found [{found}]")]
    SchemaMismatch {
        /// Label of the offending period
        period: String,
        /// Comma-separated field names of the first record
        expected: String,
        /// Comma-separated field names of the offending record
        found: String,
    },

    /// The same field name appears twice in a record.
    #[error("Duplicate field '{field}' in period '{period}'")]
    DuplicateField {
        /// Name of the repeated field
        field: String,
        /// Label of the period
        period: String,
    },

    /// A field holds a value the metric cannot work with.
    #[error("Invalid value for '{field}' in period '{period}': {reason}")]
    InvalidValue {
        /// Name of the field
        field: String,
        /// Label of the period
        period: String,
        /// Human-readable reason
        reason: String,
    },
}

impl SeriesError {
    /// Create a missing field error.
    pub fn missing_field(field: impl Into<String>, period: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
            period: period.into(),
        }
    }

    /// Create an invalid value error.
    pub fn invalid_value(
        field: impl Into<String>,
        period: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            period: period.into(),
            reason: reason.into(),
        }
    }
}
