//! Seeded synthetic baselines.
//!
//! Each dashboard has its own generator reproducing the shape of the
//! figures it is analysed with:
//!
//! - **Revenue / expense**: independent uniform draws per quarter
//! - **Cashflow / balance sheet**: a quarterly sine seasonality scaled by a
//!   bounded random factor, with linear trends on long-lived items
//! - **CFO forecast**: a monthly revenue series with linear drift and
//!   normal noise, from which expenses, cash flows and the balance sheet
//!   are derived
//!
//! Every dashboard draws from its own RNG stream keyed by the seed and the
//! dashboard, so generating one dashboard never perturbs another and no two
//! (seed, dashboard) pairs share a stream.

mod balance_sheet;
mod cashflow;
mod cfo_forecast;
mod expense;
mod revenue;

use crate::error::InputError;
use crate::DataSource;
use chrono::{Datelike, Months, NaiveDate};
use forecast_core::types::BaselineSeries;
use forecast_models::{
    BalanceSheetRecord, CashflowRecord, CfoForecastRecord, DashboardKind, ExpenseRecord,
    FinancialRecord, RevenueRecord,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

/// Default seed, matching the reproducible CFO dashboard data.
pub const DEFAULT_SEED: u64 = 42;

/// Default number of periods per series.
pub const DEFAULT_PERIODS: usize = 5;

/// What to generate.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationParams {
    /// RNG seed
    pub seed: u64,
    /// Number of periods (quarters, or months for the CFO forecast)
    pub periods: usize,
    /// Date inside the first period
    pub start_date: NaiveDate,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            periods: DEFAULT_PERIODS,
            // Q3 2024
            start_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap_or_default(),
        }
    }
}

impl GenerationParams {
    /// Parameters with the given seed and period count, starting Q3 2024.
    pub fn new(seed: u64, periods: usize) -> Self {
        Self {
            seed,
            periods,
            ..Self::default()
        }
    }

    /// Replace the start date.
    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = start_date;
        self
    }

    /// Check that at least one period is requested.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.periods == 0 {
            return Err(InputError::invalid_params("periods must be at least 1"));
        }
        Ok(())
    }
}

/// Labels `Q{n} {year}` for consecutive quarters from `start`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use demo_inputs::synthetic::quarter_labels;
///
/// let start = NaiveDate::from_ymd_opt(2024, 8, 15).unwrap();
/// assert_eq!(
///     quarter_labels(start, 3).unwrap(),
///     vec!["Q3 2024", "Q4 2024", "Q1 2025"]
/// );
/// ```
pub fn quarter_labels(start: NaiveDate, periods: usize) -> Result<Vec<String>, InputError> {
    Ok(step_dates(start, periods, 3)?
        .iter()
        .map(|date| format!("Q{} {}", date.month0() / 3 + 1, date.year()))
        .collect())
}

/// Labels `YYYY-MM` for consecutive months from `start`.
pub fn month_labels(start: NaiveDate, periods: usize) -> Result<Vec<String>, InputError> {
    Ok(step_dates(start, periods, 1)?
        .iter()
        .map(|date| date.format("%Y-%m").to_string())
        .collect())
}

fn step_dates(start: NaiveDate, periods: usize, step_months: u32) -> Result<Vec<NaiveDate>, InputError> {
    (0..periods)
        .map(|index| {
            u32::try_from(index)
                .ok()
                .and_then(|i| i.checked_mul(step_months))
                .and_then(|months| start.checked_add_months(Months::new(months)))
                .ok_or_else(|| InputError::DateOutOfRange {
                    start: start.to_string(),
                    index,
                })
        })
        .collect()
}

/// Reproducible synthetic data source.
///
/// # Examples
///
/// ```
/// use demo_inputs::{DataSource, GenerationParams, SyntheticSource};
/// use forecast_models::DashboardKind;
///
/// let source = SyntheticSource::new(GenerationParams::new(7, 4));
/// let first = source.baseline(DashboardKind::Revenue).unwrap();
/// let again = source.baseline(DashboardKind::Revenue).unwrap();
///
/// assert_eq!(first.len(), 4);
/// assert_eq!(first, again);
/// ```
#[derive(Clone, Debug, Default)]
pub struct SyntheticSource {
    params: GenerationParams,
}

impl SyntheticSource {
    /// Create a source for the given parameters.
    pub fn new(params: GenerationParams) -> Self {
        Self { params }
    }

    /// Generation parameters.
    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    /// Independent RNG stream for one dashboard.
    ///
    /// Seed and stream occupy disjoint halves of the generator key.
    fn rng(&self, kind: DashboardKind) -> StdRng {
        let stream: u64 = match kind {
            DashboardKind::Revenue => 0,
            DashboardKind::Expense => 1,
            DashboardKind::Cashflow => 2,
            DashboardKind::BalanceSheet => 3,
            DashboardKind::CfoForecast => 4,
        };
        let mut key = <StdRng as SeedableRng>::Seed::default();
        key[..8].copy_from_slice(&self.params.seed.to_le_bytes());
        key[8..16].copy_from_slice(&stream.to_le_bytes());
        StdRng::from_seed(key)
    }

    fn quarters(&self) -> Result<Vec<String>, InputError> {
        self.params.validate()?;
        quarter_labels(self.params.start_date, self.params.periods)
    }

    /// Typed revenue quarters.
    pub fn revenue(&self) -> Result<Vec<RevenueRecord>, InputError> {
        let labels = self.quarters()?;
        Ok(revenue::generate(&mut self.rng(DashboardKind::Revenue), &labels))
    }

    /// Typed expense quarters.
    pub fn expense(&self) -> Result<Vec<ExpenseRecord>, InputError> {
        let labels = self.quarters()?;
        Ok(expense::generate(&mut self.rng(DashboardKind::Expense), &labels))
    }

    /// Typed cashflow quarters.
    pub fn cashflow(&self) -> Result<Vec<CashflowRecord>, InputError> {
        let labels = self.quarters()?;
        Ok(cashflow::generate(&mut self.rng(DashboardKind::Cashflow), &labels))
    }

    /// Typed balance sheet quarters.
    pub fn balance_sheet(&self) -> Result<Vec<BalanceSheetRecord>, InputError> {
        let labels = self.quarters()?;
        Ok(balance_sheet::generate(
            &mut self.rng(DashboardKind::BalanceSheet),
            &labels,
        ))
    }

    /// Typed CFO forecast months.
    pub fn cfo_forecast(&self) -> Result<Vec<CfoForecastRecord>, InputError> {
        self.params.validate()?;
        let labels = month_labels(self.params.start_date, self.params.periods)?;
        cfo_forecast::generate(&mut self.rng(DashboardKind::CfoForecast), &labels)
    }
}

impl DataSource for SyntheticSource {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn baseline(&self, kind: DashboardKind) -> Result<BaselineSeries, InputError> {
        let series = match kind {
            DashboardKind::Revenue => RevenueRecord::series_of(&self.revenue()?),
            DashboardKind::Expense => ExpenseRecord::series_of(&self.expense()?),
            DashboardKind::Cashflow => CashflowRecord::series_of(&self.cashflow()?),
            DashboardKind::BalanceSheet => BalanceSheetRecord::series_of(&self.balance_sheet()?),
            DashboardKind::CfoForecast => CfoForecastRecord::series_of(&self.cfo_forecast()?),
        }?;
        debug!(
            dashboard = kind.name(),
            seed = self.params.seed,
            periods = series.len(),
            "Synthetic baseline generated"
        );
        Ok(series)
    }
}
