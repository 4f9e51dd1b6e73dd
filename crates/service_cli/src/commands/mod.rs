//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Commands return their
//! rendered output so that `main` owns printing.

pub mod band;
pub mod check;
pub mod export;
pub mod sensitivity;
pub mod summary;

use crate::config::ForecastConfig;
use crate::{CliError, Result};
use adapter_loader::SeriesCsv;
use clap::Args;
use demo_inputs::{DataSource, SyntheticSource};
use forecast_core::types::BaselineSeries;
use forecast_models::DashboardKind;
use forecast_risk::{LevelSet, SensitivityPreset};
use std::path::{Path, PathBuf};
use tracing::info;

/// Dashboard selection shared by the analysis commands.
#[derive(Args, Debug, Clone)]
pub struct BaselineArgs {
    /// Dashboard to analyse (revenue, expense, cashflow, balance_sheet, cfo_forecast)
    #[arg(short, long)]
    pub dashboard: DashboardKind,

    /// Read the baseline from a CSV file instead of generating it
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Field delimiter of the input or exported file (single ASCII character)
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,
}

impl BaselineArgs {
    /// File layout for the configured delimiter.
    pub fn csv(&self) -> Result<SeriesCsv> {
        if !self.delimiter.is_ascii() {
            return Err(CliError::invalid_argument(format!(
                "Delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            )));
        }
        Ok(SeriesCsv::new().with_delimiter(self.delimiter as u8))
    }

    /// Load the selected baseline.
    pub fn load(&self, config: &ForecastConfig) -> Result<BaselineSeries> {
        load_baseline(self.dashboard, self.input.as_deref(), &self.csv()?, config)
    }
}

/// Baseline series for a dashboard, from `input` or the synthetic source.
pub fn load_baseline(
    kind: DashboardKind,
    input: Option<&Path>,
    csv: &SeriesCsv,
    config: &ForecastConfig,
) -> Result<BaselineSeries> {
    match input {
        Some(path) => {
            if !path.exists() {
                return Err(CliError::FileNotFound(path.display().to_string()));
            }
            info!(dashboard = kind.name(), path = %path.display(), "Loading baseline");
            Ok(csv.read_from_file(path)?)
        }
        None => {
            let source = SyntheticSource::new(config.generation_params());
            info!(
                dashboard = kind.name(),
                source = source.name(),
                seed = config.seed,
                periods = config.periods,
                "Generating baseline"
            );
            Ok(source.baseline(kind)?)
        }
    }
}

/// Dashboard preset with configured level and band overrides.
pub fn preset(kind: DashboardKind, config: &ForecastConfig) -> Result<SensitivityPreset> {
    let mut preset = SensitivityPreset::for_dashboard(kind);
    if let Some(levels) = &config.levels {
        preset = preset.with_levels(LevelSet::new(levels.iter().copied())?);
    }
    if let Some(spread) = config.band_spread {
        preset = preset.with_band_spread(spread);
    }
    Ok(preset)
}
