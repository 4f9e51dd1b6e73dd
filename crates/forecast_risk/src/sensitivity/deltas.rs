//! Period-over-period change of a metric, as shown on summary cards.

use super::error::SensitivityError;
use forecast_core::math;
use forecast_core::traits::PeriodMetric;
use forecast_core::types::BaselineSeries;

/// Metric value of one period and its change against the previous period.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeriodDelta {
    /// Period label
    pub label: String,
    /// Metric value
    pub value: f64,
    /// Percent change from the previous period; `None` for the first
    /// period and where the previous value is zero
    pub change_pct: Option<f64>,
}

/// Evaluate `metric` per period and attach period-over-period changes.
pub fn period_deltas<M>(series: &BaselineSeries, metric: &M) -> Result<Vec<PeriodDelta>, SensitivityError>
where
    M: PeriodMetric + ?Sized,
{
    let values = metric.evaluate_series(series)?;
    let changes = std::iter::once(None).chain(math::period_deltas(&values));

    Ok(series
        .labels()
        .into_iter()
        .zip(values.iter())
        .zip(changes)
        .map(|((label, &value), change_pct)| PeriodDelta {
            label: label.to_string(),
            value,
            change_pct,
        })
        .collect())
}

/// Change of the final period against the one before it.
///
/// `None` for single-period series or a zero previous value.
pub fn latest_change(deltas: &[PeriodDelta]) -> Option<f64> {
    deltas.last().and_then(|d| d.change_pct)
}
