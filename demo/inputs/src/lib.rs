//! # Demo Inputs
//!
//! Upstream data for the forecast dashboards.
//!
//! Production baselines come from a planning system outside this
//! workspace. This crate stands in for it with reproducible synthetic
//! series, one per dashboard, behind the [`DataSource`] seam.
//!
//! ## Modules
//!
//! - [`synthetic`]: Seeded generators reproducing each dashboard's figures
//! - [`error`]: Generation failures
//!
//! ## Example
//!
//! ```
//! use demo_inputs::prelude::*;
//! use forecast_models::DashboardKind;
//!
//! let source = SyntheticSource::new(GenerationParams::new(42, 6));
//! let cfo = source.baseline(DashboardKind::CfoForecast).unwrap();
//!
//! assert_eq!(cfo.len(), 6);
//! assert_eq!(cfo.labels()[0], "2024-07");
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod error;
pub mod synthetic;

pub use error::InputError;
pub use synthetic::{GenerationParams, SyntheticSource};

use forecast_core::types::BaselineSeries;
use forecast_models::DashboardKind;

/// Provider of baseline series for the dashboards.
pub trait DataSource: Send + Sync {
    /// Source name for logging.
    fn name(&self) -> &str;

    /// Baseline series for one dashboard.
    fn baseline(&self, kind: DashboardKind) -> Result<BaselineSeries, InputError>;
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::InputError;
    pub use crate::synthetic::{month_labels, quarter_labels, GenerationParams, SyntheticSource};
    pub use crate::DataSource;
}
