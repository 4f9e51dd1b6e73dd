//! Core data types for forecast sensitivity analysis.
//!
//! This module provides:
//! - `PeriodRecord`: one period of named numeric inputs
//! - `BaselineSeries`: validated, immutable sequence of period records
//! - `SeriesError`: errors from series construction and field lookup

pub mod error;
pub mod record;
pub mod series;

pub use error::SeriesError;
pub use record::PeriodRecord;
pub use series::BaselineSeries;
