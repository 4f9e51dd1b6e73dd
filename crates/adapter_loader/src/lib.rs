//! # Adapter Loader (A: Adapter Layer)
//!
//! Export and import of baseline series as flat delimited text.
//!
//! Every dashboard can download its baseline as a table of period label
//! plus all numeric fields. This crate writes that table and reads it back,
//! reproducing the same records in the same order.
//!
//! ## Usage
//!
//! ```rust
//! use adapter_loader::{from_csv_str, to_csv_string};
//! use forecast_core::types::{BaselineSeries, PeriodRecord};
//!
//! let series = BaselineSeries::new(vec![
//!     PeriodRecord::new("Q1 2024").with_field("revenue", 100.0),
//!     PeriodRecord::new("Q2 2024").with_field("revenue", 120.25),
//! ])
//! .unwrap();
//!
//! let text = to_csv_string(&series).unwrap();
//! assert_eq!(from_csv_str(&text).unwrap(), series);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

mod delimited;
mod error;

pub use delimited::{
    from_csv_str, read_from_file, read_series, to_csv_string, write_series, write_to_file,
    SeriesCsv, PERIOD_COLUMN,
};
pub use error::LoaderError;
