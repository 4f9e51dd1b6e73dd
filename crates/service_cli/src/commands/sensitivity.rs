//! Sensitivity command implementation
//!
//! Runs the dashboard preset over the baseline and renders one impact
//! table per aggregate outcome.

use clap::Args;
use forecast_risk::SensitivityError;
use tracing::{info, warn};

use super::{preset, BaselineArgs};
use crate::config::ForecastConfig;
use crate::output::{render_impacts, ImpactView};
use crate::Result;

/// Arguments of the `sensitivity` command
#[derive(Args, Debug, Clone)]
pub struct SensitivityArgs {
    #[command(flatten)]
    pub baseline: BaselineArgs,

    /// Order rows by swing, widest first
    #[arg(long)]
    pub tornado: bool,

    /// Report N/A instead of failing when the baseline aggregate is zero
    #[arg(long)]
    pub allow_undefined: bool,
}

/// Render the impact tables
pub fn execute(config: &ForecastConfig, args: &SensitivityArgs) -> Result<String> {
    let kind = args.baseline.dashboard;
    let baseline = args.baseline.load(config)?;
    let preset = preset(kind, config)?;

    info!(
        dashboard = kind.name(),
        engines = preset.engines().len(),
        parallel = config.parallel,
        "Running sensitivity analysis"
    );

    let views = preset
        .engines()
        .iter()
        .map(|engine| {
            let outcome = if config.parallel {
                engine.run_parallel(&baseline)
            } else {
                engine.run(&baseline)
            };
            match outcome {
                Ok(table) => Ok(ImpactView::from_table(&table, args.tornado)),
                Err(SensitivityError::DivisionByZero { aggregate }) if args.allow_undefined => {
                    warn!(aggregate = %aggregate, "Baseline aggregate is zero, impacts undefined");
                    Ok(ImpactView::undefined(engine))
                }
                Err(e) => Err(e.into()),
            }
        })
        .collect::<Result<Vec<_>>>()?;

    render_impacts(&views, config.format)
}

/// Run the sensitivity command
pub fn run(config: &ForecastConfig, args: &SensitivityArgs) -> Result<()> {
    println!("{}", execute(config, args)?);
    Ok(())
}
