//! Baseline series: an immutable, chronologically ordered run of period records.

use super::error::SeriesError;
use super::record::PeriodRecord;

/// Ordered sequence of period records sharing one field schema.
///
/// A series is validated on construction (non-empty, uniform schema) and
/// exposes no mutable access to its records. Every transformation returns a
/// new series, so a baseline handed to the sensitivity engine is never
/// altered.
///
/// # Examples
///
/// ```
/// use forecast_core::types::{BaselineSeries, PeriodRecord};
///
/// let series = BaselineSeries::new(vec![
///     PeriodRecord::new("Q1").with_field("revenue", 100.0),
///     PeriodRecord::new("Q2").with_field("revenue", 110.0),
/// ])
/// .unwrap();
///
/// let bumped = series.scale_field("revenue", 1.1).unwrap();
/// assert_eq!(series.sum("revenue").unwrap(), 210.0);
/// assert!((bumped.sum("revenue").unwrap() - 231.0).abs() < 1e-9);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<PeriodRecord>", into = "Vec<PeriodRecord>")
)]
pub struct BaselineSeries {
    records: Vec<PeriodRecord>,
}

impl BaselineSeries {
    /// Validates and wraps a list of records.
    ///
    /// # Errors
    ///
    /// - `EmptySeries` if `records` is empty
    /// - `SchemaMismatch` if any record's field names differ from the first
    pub fn new(records: Vec<PeriodRecord>) -> Result<Self, SeriesError> {
        let first = records.first().ok_or(SeriesError::EmptySeries)?;
        if let Some(bad) = records.iter().find(|r| !r.same_schema(first)) {
            return Err(SeriesError::SchemaMismatch {
                period: bad.label().to_string(),
                expected: first.field_names().collect::<Vec<_>>().join(","),
                found: bad.field_names().collect::<Vec<_>>().join(","),
            });
        }
        Ok(Self { records })
    }

    /// Records in chronological order.
    #[inline]
    pub fn records(&self) -> &[PeriodRecord] {
        &self.records
    }

    /// Number of periods.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false for a constructed series; provided for API symmetry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Period labels in order.
    pub fn labels(&self) -> Vec<&str> {
        self.records.iter().map(PeriodRecord::label).collect()
    }

    /// Field names of the shared schema.
    pub fn field_names(&self) -> Vec<&str> {
        self.records
            .first()
            .map(|r| r.field_names().collect())
            .unwrap_or_default()
    }

    /// Checks that every record carries `name`.
    pub fn require_field(&self, name: &str) -> Result<(), SeriesError> {
        match self.records.iter().find(|r| !r.contains(name)) {
            Some(record) => Err(SeriesError::missing_field(name, record.label())),
            None => Ok(()),
        }
    }

    /// Values of one field across all periods.
    pub fn column(&self, name: &str) -> Result<Vec<f64>, SeriesError> {
        self.records.iter().map(|r| r.require(name)).collect()
    }

    /// Sum of one field across all periods.
    pub fn sum(&self, name: &str) -> Result<f64, SeriesError> {
        self.records.iter().map(|r| r.require(name)).sum()
    }

    /// Builds a new series by transforming every record.
    pub fn map_records<F>(&self, f: F) -> Result<Self, SeriesError>
    where
        F: FnMut(&PeriodRecord) -> Result<PeriodRecord, SeriesError>,
    {
        let records = self.records.iter().map(f).collect::<Result<Vec<_>, _>>()?;
        Self::new(records)
    }

    /// Returns a new series with `name` multiplied by `factor` in every period.
    pub fn scale_field(&self, name: &str, factor: f64) -> Result<Self, SeriesError> {
        self.map_records(|r| r.scaled(name, factor))
    }

    /// Returns a new series with several fields multiplied by `factor`.
    pub fn scale_fields(&self, names: &[&str], factor: f64) -> Result<Self, SeriesError> {
        self.map_records(|r| {
            names
                .iter()
                .try_fold(r.clone(), |acc, name| acc.scaled(name, factor))
        })
    }
}

impl TryFrom<Vec<PeriodRecord>> for BaselineSeries {
    type Error = SeriesError;

    fn try_from(records: Vec<PeriodRecord>) -> Result<Self, Self::Error> {
        Self::new(records)
    }
}

impl From<BaselineSeries> for Vec<PeriodRecord> {
    fn from(series: BaselineSeries) -> Self {
        series.records
    }
}
