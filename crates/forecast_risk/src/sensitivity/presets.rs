//! Ready-made sensitivity set-ups for each dashboard.
//!
//! | Dashboard | Parameters | Levels | Band spread |
//! |-----------|------------|--------|-------------|
//! | Revenue | all six, with linked CAC/LTV/turnover | ±20, ±10, 0 | 20 % |
//! | Expense | all six, direct | ±20, ±10, 0 | 10 % |
//! | Cashflow | all fifteen, direct | ±10, 0 | 10 % |
//! | Balance sheet | all ten, direct | ±20, ±10, 0 | 10 % |
//! | CFO forecast | one engine per headline column | ±10, ±5, 0 | 10 % |

use super::band::ForecastBand;
use super::engine::SensitivityEngine;
use super::error::SensitivityError;
use super::levels::LevelSet;
use super::table::ImpactTable;
use super::transform::PerturbationTransform;
use crate::parallel::ParallelConfig;
use forecast_core::traits::{FieldSum, PeriodSum};
use forecast_core::types::BaselineSeries;
use forecast_models::cfo_forecast::HEADLINE_COLUMNS;
use forecast_models::revenue::fields as revenue;
use forecast_models::{DashboardKind, DashboardMetric};

/// Aggregate used by every preset: the dashboard metric summed over periods.
pub type DashboardAggregate = PeriodSum<DashboardMetric>;

/// Damping applied to inventory turnover before it reaches top channel value.
pub const INVENTORY_TURNOVER_DAMPING: f64 = 0.5;

/// Default level grid of a dashboard.
pub fn default_levels(kind: DashboardKind) -> LevelSet {
    match kind {
        DashboardKind::Cashflow => LevelSet::symmetric_steps(&[10.0]),
        DashboardKind::CfoForecast => LevelSet::symmetric_steps(&[5.0, 10.0]),
        _ => LevelSet::symmetric_steps(&[10.0, 20.0]),
    }
}

/// Default forecast band spread of a dashboard, in percent.
pub fn default_band_spread(kind: DashboardKind) -> f64 {
    match kind {
        DashboardKind::Revenue => 20.0,
        _ => 10.0,
    }
}

/// Configured engines and band settings for one dashboard.
#[derive(Clone, Debug)]
pub struct SensitivityPreset {
    kind: DashboardKind,
    engines: Vec<SensitivityEngine<DashboardAggregate>>,
    band_spread_pct: f64,
}

impl SensitivityPreset {
    /// Preset for a dashboard.
    pub fn for_dashboard(kind: DashboardKind) -> Self {
        let levels = default_levels(kind);
        let engines = match kind {
            DashboardKind::Revenue => vec![revenue_engine().with_levels(levels)],
            DashboardKind::CfoForecast => HEADLINE_COLUMNS
                .iter()
                .map(|&column| {
                    SensitivityEngine::new(PeriodSum::new(DashboardMetric::Column(FieldSum::new(column))))
                        .with_parameter(column)
                        .with_levels(levels.clone())
                })
                .collect(),
            _ => vec![SensitivityEngine::new(PeriodSum::new(kind.metric()))
                .with_parameters(kind.fields().iter().copied())
                .with_levels(levels)],
        };

        Self {
            kind,
            engines,
            band_spread_pct: default_band_spread(kind),
        }
    }

    /// Replace the level grid of every engine.
    pub fn with_levels(mut self, levels: LevelSet) -> Self {
        self.engines = self
            .engines
            .into_iter()
            .map(|engine| engine.with_levels(levels.clone()))
            .collect();
        self
    }

    /// Replace the band spread.
    pub fn with_band_spread(mut self, spread_pct: f64) -> Self {
        self.band_spread_pct = spread_pct;
        self
    }

    /// Replace the parallel settings of every engine.
    pub fn with_parallel_config(mut self, config: ParallelConfig) -> Self {
        self.engines = self
            .engines
            .into_iter()
            .map(|engine| engine.with_parallel_config(config.clone()))
            .collect();
        self
    }

    /// Dashboard of this preset.
    pub fn kind(&self) -> DashboardKind {
        self.kind
    }

    /// Configured engines; one per aggregate outcome.
    pub fn engines(&self) -> &[SensitivityEngine<DashboardAggregate>] {
        &self.engines
    }

    /// Fields scaled by the forecast band.
    pub fn band_fields(&self) -> &'static [&'static str] {
        self.kind.variable_fields()
    }

    /// Band spread in percent.
    pub fn band_spread_pct(&self) -> f64 {
        self.band_spread_pct
    }

    /// Run every engine sequentially.
    pub fn run(&self, baseline: &BaselineSeries) -> Result<Vec<ImpactTable>, SensitivityError> {
        self.engines.iter().map(|engine| engine.run(baseline)).collect()
    }

    /// Run every engine with its grid spread over Rayon.
    pub fn run_parallel(&self, baseline: &BaselineSeries) -> Result<Vec<ImpactTable>, SensitivityError> {
        self.engines
            .iter()
            .map(|engine| engine.run_parallel(baseline))
            .collect()
    }

    /// Forecast band of the dashboard's headline metric.
    pub fn band(&self, baseline: &BaselineSeries) -> Result<ForecastBand, SensitivityError> {
        ForecastBand::compute(
            baseline,
            &self.kind.metric(),
            self.band_fields(),
            self.band_spread_pct,
        )
    }
}

/// Revenue forecast engine.
///
/// Acquisition cost works against promotion revenue, lifetime value acts
/// through recurring revenue and inventory turnover lifts the top channel at
/// half strength. The remaining drivers scale directly.
fn revenue_engine() -> SensitivityEngine<DashboardAggregate> {
    SensitivityEngine::new(PeriodSum::new(DashboardKind::Revenue.metric()))
        .with_parameters([
            revenue::TOP_CHANNEL_VALUE,
            revenue::MONTHLY_RECURRING_REVENUE,
            revenue::NEW_PROMOTION_REVENUE,
        ])
        .with_transform(
            revenue::CUSTOMER_ACQUISITION_COST,
            PerturbationTransform::inverse(revenue::NEW_PROMOTION_REVENUE),
        )
        .with_transform(
            revenue::CUSTOMER_LIFETIME_VALUE,
            PerturbationTransform::redirect(revenue::MONTHLY_RECURRING_REVENUE),
        )
        .with_transform(
            revenue::INVENTORY_TURNOVER,
            PerturbationTransform::dampened(revenue::TOP_CHANNEL_VALUE, INVENTORY_TURNOVER_DAMPING),
        )
}
