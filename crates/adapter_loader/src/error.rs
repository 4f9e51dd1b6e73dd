//! Loader error types.

use forecast_core::types::SeriesError;
use thiserror::Error;

/// Errors that can occur while exporting or importing a series.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed delimited text.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The header does not start with the period column.
    #[error("Header must start with a '{expected}' column, found '{found}'")]
    MissingPeriodColumn {
        /// Expected first column name
        expected: String,
        /// First column actually present
        found: String,
    },

    /// A cell could not be parsed as a number.
    #[error("Line {line}, column '{column}': cannot parse '{value}' as a number")]
    InvalidValue {
        /// 1-based line number in the file
        line: u64,
        /// Column name
        column: String,
        /// Raw cell text
        value: String,
    },

    /// A row has a different number of cells than the header.
    #[error("Line {line} has {found} fields, expected {expected}")]
    RaggedRow {
        /// 1-based line number in the file
        line: u64,
        /// Number of header columns
        expected: usize,
        /// Number of cells in the row
        found: usize,
    },

    /// The rows do not form a valid series (empty, duplicate field, ...).
    #[error(transparent)]
    Series(#[from] SeriesError),
}

impl LoaderError {
    /// True if the input held no periods.
    pub fn is_empty_series(&self) -> bool {
        matches!(self, Self::Series(SeriesError::EmptySeries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_value() {
        let err = LoaderError::InvalidValue {
            line: 3,
            column: "cogs".to_string(),
            value: "n/a".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "Line 3, column 'cogs': cannot parse 'n/a' as a number"
        );
    }

    #[test]
    fn test_empty_series_detection() {
        assert!(LoaderError::from(SeriesError::EmptySeries).is_empty_series());
        assert!(!LoaderError::RaggedRow {
            line: 2,
            expected: 3,
            found: 2
        }
        .is_empty_series());
    }
}
