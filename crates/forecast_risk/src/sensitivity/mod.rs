//! One-at-a-time sensitivity analysis.
//!
//! This module provides:
//! - [`SensitivityEngine`]: perturbs each parameter over a level grid and
//!   measures the percentage change of an aggregate outcome
//! - [`PerturbationTransform`]: per-parameter perturbation policy (direct,
//!   linked, custom)
//! - [`LevelSet`] / [`PerturbationLevel`]: validated percentage grids
//! - [`ImpactTable`]: the resulting tornado/heatmap surface
//! - [`ForecastBand`]: lower/upper envelopes around the baseline metric
//! - [`period_deltas`]: period-over-period changes for summary cards
//! - [`SensitivityPreset`]: dashboard-specific engine set-ups

mod band;
mod deltas;
mod engine;
mod error;
mod levels;
mod presets;
mod table;
mod transform;

pub use band::{BandPoint, ForecastBand};
pub use deltas::{latest_change, period_deltas, PeriodDelta};
pub use engine::SensitivityEngine;
pub use error::SensitivityError;
pub use levels::{LevelSet, PerturbationLevel, DEFAULT_LEVELS};
pub use presets::{
    default_band_spread, default_levels, DashboardAggregate, SensitivityPreset,
    INVENTORY_TURNOVER_DAMPING,
};
pub use table::{ImpactResult, ImpactRow, ImpactTable};
pub use transform::{CustomTransformFn, PerturbationTransform};
