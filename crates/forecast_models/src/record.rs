//! Conversion between typed dashboard records and generic period records.

use forecast_core::types::{BaselineSeries, PeriodRecord, SeriesError};

/// A dashboard-specific record with a fixed, named field schema.
///
/// Implementors list their numeric fields once in `FIELDS`; conversion to
/// and from [`PeriodRecord`] follows that order, so a typed record always
/// exports with the same column layout.
pub trait FinancialRecord: Sized {
    /// Numeric field names in schema order.
    const FIELDS: &'static [&'static str];

    /// Period label (e.g. `"Q3 2024"`).
    fn label(&self) -> &str;

    /// Field values in `FIELDS` order.
    fn values(&self) -> Vec<f64>;

    /// Rebuild from a label and values in `FIELDS` order.
    ///
    /// # Errors
    ///
    /// `SchemaMismatch` unless `values` has exactly `FIELDS.len()` entries.
    fn from_values(label: &str, values: &[f64]) -> Result<Self, SeriesError>;

    /// Convert to a generic period record.
    fn to_record(&self) -> PeriodRecord {
        Self::FIELDS
            .iter()
            .zip(self.values())
            .fold(PeriodRecord::new(self.label()), |record, (name, value)| {
                record.with_field(*name, value)
            })
    }

    /// Read a typed record out of a generic one.
    ///
    /// # Errors
    ///
    /// `MissingField` naming the first schema field the record lacks.
    fn from_record(record: &PeriodRecord) -> Result<Self, SeriesError> {
        let values = Self::FIELDS
            .iter()
            .map(|name| record.require(name))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_values(record.label(), &values)
    }

    /// Build a baseline series from typed records.
    fn series_of(records: &[Self]) -> Result<BaselineSeries, SeriesError> {
        BaselineSeries::new(records.iter().map(Self::to_record).collect())
    }

    /// Read every period of a series as typed records.
    fn from_series(series: &BaselineSeries) -> Result<Vec<Self>, SeriesError> {
        series.records().iter().map(Self::from_record).collect()
    }
}

/// Check that `values` holds one entry per field of `R`'s schema.
pub fn check_arity<R: FinancialRecord>(label: &str, values: &[f64]) -> Result<(), SeriesError> {
    if values.len() == R::FIELDS.len() {
        Ok(())
    } else {
        Err(SeriesError::SchemaMismatch {
            period: label.to_string(),
            expected: R::FIELDS.join(","),
            found: format!("{} values", values.len()),
        })
    }
}
