//! # forecast_core: Foundation for Forecast Sensitivity Analysis
//!
//! ## Layer 1 (Foundation) Role
//!
//! forecast_core is the bottom layer of the workspace, providing:
//! - Period records and immutable baseline series (`types`)
//! - Aggregation and per-period metric traits (`traits`)
//! - Percentage arithmetic shared by every dashboard (`math`)
//! - Error types: `SeriesError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other forecast_* crates, with minimal
//! external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use forecast_core::traits::{Aggregation, FieldSum};
//! use forecast_core::types::{BaselineSeries, PeriodRecord};
//!
//! let series = BaselineSeries::new(vec![
//!     PeriodRecord::new("Q1 2024").with_field("revenue", 100.0),
//!     PeriodRecord::new("Q2 2024").with_field("revenue", 120.0),
//! ])
//! .unwrap();
//!
//! let total = FieldSum::new("revenue").aggregate(&series).unwrap();
//! assert_eq!(total, 220.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `PeriodRecord` and `BaselineSeries`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod traits;
pub mod types;

pub use traits::{Aggregation, FieldSum, PeriodMetric, PeriodSum};
pub use types::{BaselineSeries, PeriodRecord, SeriesError};
