//! Aggregation traits: how a series collapses to one scalar outcome.
//!
//! This module defines:
//! - `Aggregation`: series → scalar (e.g. total revenue over all quarters)
//! - `PeriodMetric`: record → scalar (e.g. one quarter's revenue forecast)
//! - `FieldSum`: sum of one field across periods
//! - `PeriodSum`: sum of a period metric across periods
//!
//! Aggregations must be deterministic pure functions of their input so that
//! sensitivity results are reproducible. Closures with the right signature
//! implement both traits directly.

use crate::types::{BaselineSeries, PeriodRecord, SeriesError};

/// Maps a baseline series to a single scalar outcome.
///
/// # Examples
/// ```
/// use forecast_core::traits::Aggregation;
/// use forecast_core::types::{BaselineSeries, PeriodRecord, SeriesError};
///
/// let net = |s: &BaselineSeries| -> Result<f64, SeriesError> {
///     Ok(s.sum("revenue")? - s.sum("cost")?)
/// };
///
/// let series = BaselineSeries::new(vec![
///     PeriodRecord::new("Q1").with_field("revenue", 100.0).with_field("cost", 40.0),
/// ])
/// .unwrap();
/// assert_eq!(net.aggregate(&series).unwrap(), 60.0);
/// ```
pub trait Aggregation: Send + Sync {
    /// Evaluate the aggregate outcome of a series.
    fn aggregate(&self, series: &BaselineSeries) -> Result<f64, SeriesError>;

    /// Display name of the outcome (used in logs and reports).
    fn name(&self) -> &str {
        "aggregate"
    }
}

impl<F> Aggregation for F
where
    F: Fn(&BaselineSeries) -> Result<f64, SeriesError> + Send + Sync,
{
    fn aggregate(&self, series: &BaselineSeries) -> Result<f64, SeriesError> {
        self(series)
    }
}

/// Maps one period record to a scalar, e.g. a quarter's net cashflow.
pub trait PeriodMetric: Send + Sync {
    /// Evaluate the metric for one period.
    fn evaluate(&self, record: &PeriodRecord) -> Result<f64, SeriesError>;

    /// Display name of the metric.
    fn name(&self) -> &str {
        "metric"
    }

    /// Evaluate the metric for every period of a series, in order.
    fn evaluate_series(&self, series: &BaselineSeries) -> Result<Vec<f64>, SeriesError> {
        series.records().iter().map(|r| self.evaluate(r)).collect()
    }
}

impl<F> PeriodMetric for F
where
    F: Fn(&PeriodRecord) -> Result<f64, SeriesError> + Send + Sync,
{
    fn evaluate(&self, record: &PeriodRecord) -> Result<f64, SeriesError> {
        self(record)
    }
}

/// Sum of a single field over all periods.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSum {
    field: String,
}

impl FieldSum {
    /// Create a field-sum aggregation.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// The summed field.
    pub fn field(&self) -> &str {
        &self.field
    }
}

impl Aggregation for FieldSum {
    fn aggregate(&self, series: &BaselineSeries) -> Result<f64, SeriesError> {
        series.sum(&self.field)
    }

    fn name(&self) -> &str {
        &self.field
    }
}

impl PeriodMetric for FieldSum {
    fn evaluate(&self, record: &PeriodRecord) -> Result<f64, SeriesError> {
        record.require(&self.field)
    }

    fn name(&self) -> &str {
        &self.field
    }
}

/// Sum of a per-period metric over all periods.
#[derive(Clone, Debug)]
pub struct PeriodSum<M> {
    metric: M,
}

impl<M: PeriodMetric> PeriodSum<M> {
    /// Wrap a period metric as a series aggregation.
    pub fn new(metric: M) -> Self {
        Self { metric }
    }

    /// The wrapped metric.
    pub fn metric(&self) -> &M {
        &self.metric
    }
}

impl<M: PeriodMetric> Aggregation for PeriodSum<M> {
    fn aggregate(&self, series: &BaselineSeries) -> Result<f64, SeriesError> {
        series
            .records()
            .iter()
            .map(|r| self.metric.evaluate(r))
            .sum()
    }

    fn name(&self) -> &str {
        self.metric.name()
    }
}
