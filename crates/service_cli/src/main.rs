//! Forecast CLI - Command Line Sensitivity Analysis
//!
//! This is the operational entry point for the forecast sensitivity
//! workspace.
//!
//! # Commands
//!
//! - `forecast sensitivity --dashboard <name>` - Impact table per parameter and level
//! - `forecast band --dashboard <name>` - Optimistic/pessimistic forecast band
//! - `forecast summary --dashboard <name>` - Headline metric with period-over-period change
//! - `forecast export --dashboard <name> --output <file>` - Write the baseline as CSV
//! - `forecast check` - Validate configuration and dashboards
//!
//! # Architecture
//!
//! As the **S**ervice layer, this crate wires the synthetic data source or
//! a CSV baseline into the dashboard presets and renders the results.
//!
//! # Configuration
//!
//! `forecast.toml` (optional), then `FORECAST_*` environment variables,
//! then command-line flags. `RUST_LOG` takes precedence over the
//! configured log level.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

pub use error::{CliError, Result};

use commands::band::BandArgs;
use commands::export::ExportArgs;
use commands::sensitivity::SensitivityArgs;
use commands::summary::SummaryArgs;
use config::ForecastConfig;
use output::OutputFormat;

/// Forecast sensitivity analysis CLI
#[derive(Parser)]
#[command(name = "forecast")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "forecast.toml")]
    config: PathBuf,

    /// Seed for the synthetic baseline
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Periods to generate
    #[arg(long, global = true)]
    periods: Option<usize>,

    /// Date inside the first generated period (YYYY-MM-DD)
    #[arg(long, global = true)]
    start_date: Option<NaiveDate>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Perturbation levels in percent, comma-separated (e.g. -20,-10,10,20)
    #[arg(long, global = true, value_delimiter = ',', allow_negative_numbers = true)]
    levels: Option<Vec<f64>>,

    /// Evaluate sensitivity grids in parallel
    #[arg(long, global = true)]
    parallel: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Perturb each parameter and report the impact on the dashboard aggregate
    Sensitivity(SensitivityArgs),

    /// Compute the forecast band of the dashboard's headline metric
    Band(BandArgs),

    /// Report the headline metric per period with its change
    Summary(SummaryArgs),

    /// Write the dashboard baseline to a delimited file
    Export(ExportArgs),

    /// Check configuration and dashboards
    Check,
}

impl Cli {
    /// Effective configuration: file, environment, then flags.
    fn resolve_config(&self) -> Result<ForecastConfig> {
        let mut config = ForecastConfig::load_or_default(&self.config)?.with_env_override();

        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(periods) = self.periods {
            config.periods = periods;
        }
        if let Some(start_date) = self.start_date {
            config.start_date = start_date;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(levels) = &self.levels {
            config.levels = Some(levels.clone());
        }
        if self.parallel {
            config.parallel = true;
        }
        if self.verbose {
            config.log_level = "debug".to_string();
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    // Initialise tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }
    debug!(?config, "Configuration resolved");

    match &cli.command {
        Commands::Sensitivity(args) => commands::sensitivity::run(&config, args)?,
        Commands::Band(args) => commands::band::run(&config, args)?,
        Commands::Summary(args) => commands::summary::run(&config, args)?,
        Commands::Export(args) => commands::export::run(&config, args)?,
        Commands::Check => commands::check::run(&config)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use forecast_models::DashboardKind;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_sensitivity_with_globals() {
        let cli = Cli::try_parse_from([
            "forecast",
            "sensitivity",
            "--dashboard",
            "balance-sheet",
            "--levels=-15,15",
            "--format",
            "json",
            "--tornado",
            "--config",
            "missing.toml",
        ])
        .unwrap();

        match &cli.command {
            Commands::Sensitivity(args) => {
                assert_eq!(args.baseline.dashboard, DashboardKind::BalanceSheet);
                assert!(args.tornado);
                assert!(!args.allow_undefined);
            }
            _ => panic!("expected sensitivity command"),
        }
        assert_eq!(cli.levels, Some(vec![-15.0, 15.0]));

        let config = cli.resolve_config().unwrap();
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.levels, Some(vec![-15.0, 15.0]));
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("forecast.toml");
        std::fs::write(&path, "seed = 1\nperiods = 3\n").unwrap();

        let cli = Cli::try_parse_from([
            "forecast",
            "check",
            "--config",
            path.to_str().unwrap(),
            "--periods",
            "7",
        ])
        .unwrap();
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.seed, 1);
        assert_eq!(config.periods, 7);
    }

    #[test]
    fn test_unknown_dashboard_rejected() {
        assert!(Cli::try_parse_from(["forecast", "band", "--dashboard", "payroll"]).is_err());
    }
}
