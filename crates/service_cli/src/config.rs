//! CLI configuration management.
//!
//! Settings come from an optional `forecast.toml`, then `FORECAST_*`
//! environment variables, then command-line flags, each layer overriding
//! the one before.
//!
//! ```toml
//! seed = 42
//! periods = 5
//! start_date = "2024-07-01"
//! format = "table"
//! log_level = "info"
//! parallel = false
//! levels = [-20.0, -10.0, 10.0, 20.0]
//! band_spread = 10.0
//! ```
//!
//! Every field has a `FORECAST_*` variable; `FORECAST_LEVELS` takes a
//! comma-separated list such as `-15,15`.

use crate::output::OutputFormat;
use chrono::NaiveDate;
use demo_inputs::GenerationParams;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Upper bound on generated periods.
pub const MAX_PERIODS: usize = 10_000;

/// Forecast CLI configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ForecastConfig {
    /// Seed for the synthetic source
    pub seed: u64,

    /// Periods to generate per dashboard
    pub periods: usize,

    /// Date inside the first generated period
    pub start_date: NaiveDate,

    /// Default output format
    pub format: OutputFormat,

    /// Log level when `RUST_LOG` is unset
    pub log_level: String,

    /// Evaluate sensitivity grids in parallel
    pub parallel: bool,

    /// Perturbation levels in percent; dashboard defaults when absent
    pub levels: Option<Vec<f64>>,

    /// Band spread in percent; dashboard default when absent
    pub band_spread: Option<f64>,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        let generation = GenerationParams::default();
        Self {
            seed: generation.seed,
            periods: generation.periods,
            start_date: generation.start_date,
            format: OutputFormat::default(),
            log_level: "info".to_string(),
            parallel: false,
            levels: None,
            band_spread: None,
        }
    }
}

impl ForecastConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load `path` when it exists, defaults otherwise.
    ///
    /// A file that exists but fails to read or parse is an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides
    pub fn with_env_override(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup.
    ///
    /// Unparsable values leave the current setting in place.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(seed) = lookup("FORECAST_SEED").and_then(|v| v.parse().ok()) {
            self.seed = seed;
        }

        if let Some(periods) = lookup("FORECAST_PERIODS").and_then(|v| v.parse().ok()) {
            self.periods = periods;
        }

        if let Some(date) = lookup("FORECAST_START_DATE").and_then(|v| v.parse().ok()) {
            self.start_date = date;
        }

        if let Some(format) = lookup("FORECAST_FORMAT").and_then(|v| v.parse().ok()) {
            self.format = format;
        }

        if let Some(log_level) = lookup("FORECAST_LOG_LEVEL") {
            self.log_level = log_level;
        }

        if let Some(parallel) = lookup("FORECAST_PARALLEL") {
            self.parallel = matches!(parallel.to_lowercase().as_str(), "1" | "true" | "yes" | "on");
        }

        if let Some(levels) = lookup("FORECAST_LEVELS").and_then(|v| parse_levels(&v)) {
            self.levels = Some(levels);
        }

        if let Some(spread) = lookup("FORECAST_BAND_SPREAD").and_then(|v| v.trim().parse().ok()) {
            self.band_spread = Some(spread);
        }

        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, VALID_LOG_LEVELS
            ));
        }

        if self.periods == 0 {
            errors.push("periods must be greater than 0".to_string());
        }
        if self.periods > MAX_PERIODS {
            errors.push(format!(
                "periods {} exceeds maximum allowed ({})",
                self.periods, MAX_PERIODS
            ));
        }

        if let Some(levels) = &self.levels {
            if levels.is_empty() {
                errors.push("levels cannot be empty".to_string());
            }
            if let Some(bad) = levels.iter().find(|l| !l.is_finite()) {
                errors.push(format!("level {} is not a finite percentage", bad));
            }
        }

        if let Some(spread) = self.band_spread {
            if !spread.is_finite() || spread < 0.0 {
                errors.push(format!("band_spread {} must be a non-negative percentage", spread));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Synthetic source parameters.
    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams::new(self.seed, self.periods).with_start_date(self.start_date)
    }
}

/// Comma-separated percentages; `None` if any entry fails to parse.
fn parse_levels(value: &str) -> Option<Vec<f64>> {
    value
        .split(',')
        .map(|level| level.trim().parse().ok())
        .collect()
}

/// Configuration error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(String),
    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),
    /// Validation error
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
