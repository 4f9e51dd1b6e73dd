//! Flat delimited-text layout for baseline series.
//!
//! ```text
//! period,top_channel_value,monthly_recurring_revenue,...
//! Q1 2024,1234.5,310.25,...
//! Q2 2024,1301,298.75,...
//! ```
//!
//! Values are written in the shortest form that parses back to the same
//! `f64`, so an export followed by an import reproduces the series
//! field-for-field.

use crate::error::LoaderError;
use forecast_core::types::{BaselineSeries, PeriodRecord, SeriesError};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::debug;

/// Name of the leading label column.
pub const PERIOD_COLUMN: &str = "period";

/// Reader/writer for the delimited layout.
///
/// # Examples
///
/// ```
/// use adapter_loader::SeriesCsv;
/// use forecast_core::types::{BaselineSeries, PeriodRecord};
///
/// let series = BaselineSeries::new(vec![
///     PeriodRecord::new("Q1 2024").with_field("cogs", 1800.5),
/// ])
/// .unwrap();
///
/// let text = SeriesCsv::new().render(&series).unwrap();
/// assert_eq!(text, "period,cogs\nQ1 2024,1800.5\n");
/// assert_eq!(SeriesCsv::new().parse(&text).unwrap(), series);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeriesCsv {
    delimiter: u8,
}

impl Default for SeriesCsv {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl SeriesCsv {
    /// Comma-delimited layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different single-byte delimiter (e.g. `b';'` or `b'\t'`).
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Write `series` with a header row.
    pub fn write<W: Write>(&self, series: &BaselineSeries, writer: W) -> Result<(), LoaderError> {
        let mut out = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(writer);

        out.write_record(std::iter::once(PERIOD_COLUMN).chain(series.field_names()))?;
        for record in series.records() {
            let row = std::iter::once(record.label().to_string())
                .chain(record.fields().map(|(_, value)| value.to_string()));
            out.write_record(row)?;
        }
        out.flush()?;

        debug!(periods = series.len(), fields = series.field_names().len(), "Series exported");
        Ok(())
    }

    /// Read a series written by [`SeriesCsv::write`].
    ///
    /// # Errors
    ///
    /// - `MissingPeriodColumn` if the first header cell is not `period`
    /// - `RaggedRow` if a row's length differs from the header's
    /// - `InvalidValue` if a cell is not a number
    /// - `Series(EmptySeries)` if there are no data rows
    /// - `Series(DuplicateField)` if a column name repeats
    pub fn read<R: Read>(&self, reader: R) -> Result<BaselineSeries, LoaderError> {
        let mut input = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .from_reader(reader);

        let header = input.headers()?.clone();
        if header.is_empty() {
            return Err(SeriesError::EmptySeries.into());
        }
        match header.get(0) {
            Some(PERIOD_COLUMN) => {}
            other => {
                return Err(LoaderError::MissingPeriodColumn {
                    expected: PERIOD_COLUMN.to_string(),
                    found: other.unwrap_or_default().to_string(),
                })
            }
        }
        let columns: Vec<&str> = header.iter().skip(1).collect();

        let mut records = Vec::new();
        for row in input.records() {
            let row = row?;
            let line = row.position().map(|p| p.line()).unwrap_or_default();
            if row.len() != header.len() {
                return Err(LoaderError::RaggedRow {
                    line,
                    expected: header.len(),
                    found: row.len(),
                });
            }

            let label = row.get(0).unwrap_or_default();
            let fields = columns
                .iter()
                .zip(row.iter().skip(1))
                .map(|(&column, cell)| {
                    cell.trim()
                        .parse::<f64>()
                        .map(|value| (column, value))
                        .map_err(|_| LoaderError::InvalidValue {
                            line,
                            column: column.to_string(),
                            value: cell.to_string(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            records.push(PeriodRecord::try_from_fields(label, fields)?);
        }

        let series = BaselineSeries::new(records)?;
        debug!(periods = series.len(), fields = columns.len(), "Series imported");
        Ok(series)
    }

    /// Render `series` to a string.
    pub fn render(&self, series: &BaselineSeries) -> Result<String, LoaderError> {
        let mut buf = Vec::new();
        self.write(series, &mut buf)?;
        String::from_utf8(buf).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e).into())
    }

    /// Parse a series from a string.
    pub fn parse(&self, text: &str) -> Result<BaselineSeries, LoaderError> {
        self.read(text.as_bytes())
    }

    /// Write `series` to a file, creating or truncating it.
    pub fn write_to_file(&self, series: &BaselineSeries, path: impl AsRef<Path>) -> Result<(), LoaderError> {
        self.write(series, File::create(path)?)
    }

    /// Read a series from a file.
    pub fn read_from_file(&self, path: impl AsRef<Path>) -> Result<BaselineSeries, LoaderError> {
        self.read(File::open(path)?)
    }
}

/// Write `series` as comma-delimited text.
pub fn write_series<W: Write>(series: &BaselineSeries, writer: W) -> Result<(), LoaderError> {
    SeriesCsv::new().write(series, writer)
}

/// Read a series from comma-delimited text.
pub fn read_series<R: Read>(reader: R) -> Result<BaselineSeries, LoaderError> {
    SeriesCsv::new().read(reader)
}

/// Render `series` as a comma-delimited string.
pub fn to_csv_string(series: &BaselineSeries) -> Result<String, LoaderError> {
    SeriesCsv::new().render(series)
}

/// Parse a series from a comma-delimited string.
pub fn from_csv_str(text: &str) -> Result<BaselineSeries, LoaderError> {
    SeriesCsv::new().parse(text)
}

/// Write `series` to a comma-delimited file.
pub fn write_to_file(series: &BaselineSeries, path: impl AsRef<Path>) -> Result<(), LoaderError> {
    SeriesCsv::new().write_to_file(series, path)
}

/// Read a series from a comma-delimited file.
pub fn read_from_file(path: impl AsRef<Path>) -> Result<BaselineSeries, LoaderError> {
    SeriesCsv::new().read_from_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BaselineSeries {
        BaselineSeries::new(vec![
            PeriodRecord::new("Q1 2024")
                .with_field("payroll_costs", 912.345)
                .with_field("cogs", 1_800.0),
            PeriodRecord::new("Q2 2024")
                .with_field("payroll_costs", 0.1 + 0.2)
                .with_field("cogs", -3.5e-7),
        ])
        .unwrap()
    }

    #[test]
    fn test_header_and_layout() {
        let text = to_csv_string(&sample()).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("period,payroll_costs,cogs"));
        assert_eq!(lines.next(), Some("Q1 2024,912.345,1800"));
    }

    #[test]
    fn test_round_trip_is_exact() {
        let series = sample();
        let back = from_csv_str(&to_csv_string(&series).unwrap()).unwrap();
        assert_eq!(back, series);
        assert_eq!(back.records()[1].get("payroll_costs"), Some(0.1 + 0.2));
    }

    #[test]
    fn test_semicolon_delimiter() {
        let csv = SeriesCsv::new().with_delimiter(b';');
        let text = csv.render(&sample()).unwrap();
        assert!(text.starts_with("period;payroll_costs;cogs\n"));
        assert_eq!(csv.parse(&text).unwrap(), sample());
    }

    #[test]
    fn test_missing_period_column() {
        let err = from_csv_str("quarter,cogs\nQ1,1\n").unwrap_err();
        assert!(matches!(err, LoaderError::MissingPeriodColumn { ref found, .. } if found == "quarter"));
    }

    #[test]
    fn test_invalid_value_reports_line_and_column() {
        let err = from_csv_str("period,cogs,rd_expenses\nQ1,1,2\nQ2,3,abc\n").unwrap_err();
        match err {
            LoaderError::InvalidValue { line, column, value } => {
                assert_eq!(line, 3);
                assert_eq!(column, "rd_expenses");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_ragged_row() {
        let err = from_csv_str("period,cogs,rd_expenses\nQ1,1\n").unwrap_err();
        assert!(matches!(err, LoaderError::RaggedRow { line: 2, expected: 3, found: 2 }));
    }

    #[test]
    fn test_empty_input() {
        assert!(from_csv_str("").unwrap_err().is_empty_series());
        assert!(from_csv_str("period,cogs\n").unwrap_err().is_empty_series());
    }

    #[test]
    fn test_duplicate_column() {
        let err = from_csv_str("period,cogs,cogs\nQ1,1,2\n").unwrap_err();
        assert!(matches!(err, LoaderError::Series(SeriesError::DuplicateField { .. })));
    }
}
