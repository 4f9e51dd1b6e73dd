//! # Forecast Risk (L3: Analysis)
//!
//! One-at-a-time sensitivity analysis over baseline forecasts.
//!
//! This crate provides:
//! - The sensitivity engine and its pluggable perturbation transforms
//! - Impact tables with tornado ordering and outcome ranges
//! - Forecast bands (optimistic/pessimistic envelopes)
//! - Period-over-period deltas for summary cards
//! - Dashboard presets wiring models to engines
//! - Rayon-based parallel evaluation of the parameter × level grid
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           forecast_risk (L3)            │
//! ├─────────────────────────────────────────┤
//! │  sensitivity/ - Engine, transforms,     │
//! │                 levels, tables, bands,  │
//! │                 presets                 │
//! │  parallel/    - Rayon utilities         │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │          forecast_models (L2)           │
//! │  Dashboard records and metrics          │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │           forecast_core (L1)            │
//! │  Series, aggregation traits, maths      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use forecast_core::traits::FieldSum;
//! use forecast_core::types::{BaselineSeries, PeriodRecord};
//! use forecast_risk::sensitivity::{PerturbationTransform, SensitivityEngine};
//!
//! let baseline = BaselineSeries::new(vec![
//!     PeriodRecord::new("Q1 2024").with_field("promo", 100.0).with_field("cac", 20.0),
//!     PeriodRecord::new("Q2 2024").with_field("promo", 150.0).with_field("cac", 25.0),
//! ])
//! .unwrap();
//!
//! let table = SensitivityEngine::new(FieldSum::new("promo"))
//!     .with_parameter("promo")
//!     .with_transform("cac", PerturbationTransform::inverse("promo"))
//!     .run(&baseline)
//!     .unwrap();
//!
//! assert_eq!(table.impact("cac", 0.0), Some(0.0));
//! assert!(table.impact("cac", 10.0).unwrap() < 0.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for impact tables, levels and bands

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod parallel;
pub mod sensitivity;

pub use parallel::{ParallelConfig, DEFAULT_BATCH_SIZE};
pub use sensitivity::{
    ForecastBand, ImpactResult, ImpactRow, ImpactTable, LevelSet, PerturbationLevel,
    PerturbationTransform, SensitivityEngine, SensitivityError, SensitivityPreset,
};
