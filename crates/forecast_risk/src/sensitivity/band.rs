//! Forecast bands: optimistic and pessimistic envelopes around a baseline.
//!
//! A band scales every variable driver of a dashboard up and down by the
//! same spread and re-evaluates the per-period metric. Fixed obligations
//! (debt service, dividends) and day counts are left out of `band_fields`
//! by the caller so they do not move with volume.

use super::error::SensitivityError;
use forecast_core::traits::PeriodMetric;
use forecast_core::types::BaselineSeries;
use tracing::debug;

/// One period of a forecast band.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandPoint<'a> {
    /// Period label
    pub label: &'a str,
    /// Baseline metric
    pub base: f64,
    /// Lower envelope
    pub lower: f64,
    /// Upper envelope
    pub upper: f64,
}

/// Per-period baseline with lower and upper envelopes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForecastBand {
    metric: String,
    spread_pct: f64,
    labels: Vec<String>,
    base: Vec<f64>,
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl ForecastBand {
    /// Compute the band of `metric` when `band_fields` move by `±spread_pct`.
    ///
    /// `lower` and `upper` are ordered per period, so `lower <= upper` holds
    /// even when a band field enters the metric negatively.
    ///
    /// # Errors
    ///
    /// - `Band` if `spread_pct` is negative or not finite
    /// - `MissingField` if a band field is absent
    /// - `NonFiniteAggregate` if the metric evaluates to NaN or infinity
    pub fn compute<M>(
        series: &BaselineSeries,
        metric: &M,
        band_fields: &[&str],
        spread_pct: f64,
    ) -> Result<Self, SensitivityError>
    where
        M: PeriodMetric + ?Sized,
    {
        if !spread_pct.is_finite() || spread_pct < 0.0 {
            return Err(SensitivityError::band(format!(
                "spread must be a finite non-negative percentage, got {}",
                spread_pct
            )));
        }

        let down = series.scale_fields(band_fields, 1.0 - spread_pct / 100.0)?;
        let up = series.scale_fields(band_fields, 1.0 + spread_pct / 100.0)?;

        let base = metric.evaluate_series(series)?;
        let down = metric.evaluate_series(&down)?;
        let up = metric.evaluate_series(&up)?;

        let labels: Vec<String> = series.labels().into_iter().map(str::to_string).collect();
        for values in [&base, &down, &up] {
            if let Some((label, value)) = labels.iter().zip(values).find(|(_, v)| !v.is_finite()) {
                return Err(SensitivityError::non_finite(
                    format!("{} in period '{}'", metric.name(), label),
                    *value,
                ));
            }
        }

        let (lower, upper): (Vec<f64>, Vec<f64>) = down
            .iter()
            .zip(&up)
            .map(|(&a, &b)| (a.min(b), a.max(b)))
            .unzip();

        debug!(
            metric = metric.name(),
            spread_pct,
            periods = labels.len(),
            "Forecast band computed"
        );

        Ok(Self {
            metric: metric.name().to_string(),
            spread_pct,
            labels,
            base,
            lower,
            upper,
        })
    }

    /// Name of the banded metric.
    pub fn metric(&self) -> &str {
        &self.metric
    }

    /// Spread in percent.
    pub fn spread_pct(&self) -> f64 {
        self.spread_pct
    }

    /// Period labels.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Baseline metric per period.
    pub fn base(&self) -> &[f64] {
        &self.base
    }

    /// Lower envelope per period.
    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    /// Upper envelope per period.
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Number of periods.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// True if the band has no periods.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Per-period points.
    pub fn points(&self) -> impl Iterator<Item = BandPoint<'_>> {
        self.labels
            .iter()
            .zip(&self.base)
            .zip(self.lower.iter().zip(&self.upper))
            .map(|((label, &base), (&lower, &upper))| BandPoint {
                label,
                base,
                lower,
                upper,
            })
    }

    /// Baseline total over all periods.
    pub fn total_base(&self) -> f64 {
        self.base.iter().sum()
    }

    /// Lower envelope total.
    pub fn total_lower(&self) -> f64 {
        self.lower.iter().sum()
    }

    /// Upper envelope total.
    pub fn total_upper(&self) -> f64 {
        self.upper.iter().sum()
    }
}
