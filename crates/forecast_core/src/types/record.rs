//! Period records: one reporting period of named numeric inputs.

use super::error::SeriesError;

/// One reporting period (e.g. a fiscal quarter) of financial inputs.
///
/// A record is a period label plus a flat, ordered mapping of field name to
/// value. Field order is preserved and forms the schema used for export.
///
/// # Examples
///
/// ```
/// use forecast_core::types::PeriodRecord;
///
/// let record = PeriodRecord::new("Q1 2024")
///     .with_field("revenue", 100.0)
///     .with_field("cost", 40.0);
///
/// assert_eq!(record.get("revenue"), Some(100.0));
/// assert_eq!(record.field_names().collect::<Vec<_>>(), vec!["revenue", "cost"]);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeriodRecord {
    label: String,
    fields: Vec<(String, f64)>,
}

impl PeriodRecord {
    /// Creates an empty record for the given period label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            fields: Vec::new(),
        }
    }

    /// Builds a record from `(name, value)` pairs, rejecting repeated names.
    pub fn try_from_fields<I, S>(label: impl Into<String>, fields: I) -> Result<Self, SeriesError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut record = Self::new(label);
        for (name, value) in fields {
            let name = name.into();
            if record.contains(&name) {
                return Err(SeriesError::DuplicateField {
                    field: name,
                    period: record.label,
                });
            }
            record.fields.push((name, value));
        }
        Ok(record)
    }

    /// Adds a field, or overwrites its value if it already exists.
    pub fn with_field(mut self, name: impl Into<String>, value: f64) -> Self {
        let name = name.into();
        match self.position(&name) {
            Some(idx) => self.fields[idx].1 = value,
            None => self.fields.push((name, value)),
        }
        self
    }

    /// Returns the period label.
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the value of a field, if present.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.position(name).map(|idx| self.fields[idx].1)
    }

    /// Returns the value of a field or a `MissingField` error.
    pub fn require(&self, name: &str) -> Result<f64, SeriesError> {
        self.get(name)
            .ok_or_else(|| SeriesError::missing_field(name, &self.label))
    }

    /// Returns true if the record carries the named field.
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Iterates over field names in schema order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Iterates over `(name, value)` pairs in schema order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, f64)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns a copy with `name` multiplied by `factor`.
    pub fn scaled(&self, name: &str, factor: f64) -> Result<Self, SeriesError> {
        let value = self.require(name)?;
        self.replaced(name, value * factor)
    }

    /// Returns a copy with `name` set to `value`. The field must already exist.
    pub fn replaced(&self, name: &str, value: f64) -> Result<Self, SeriesError> {
        let idx = self
            .position(name)
            .ok_or_else(|| SeriesError::missing_field(name, &self.label))?;
        let mut record = self.clone();
        record.fields[idx].1 = value;
        Ok(record)
    }

    /// Returns true if both records list the same field names in the same order.
    pub fn same_schema(&self, other: &Self) -> bool {
        self.fields.len() == other.fields.len()
            && self.field_names().zip(other.field_names()).all(|(a, b)| a == b)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|(field, _)| field == name)
    }
}
