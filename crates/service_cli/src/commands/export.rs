//! Export command implementation
//!
//! Writes a dashboard baseline to a delimited file that the analysis
//! commands can read back with `--input` and the same `--delimiter`.

use clap::Args;
use std::path::PathBuf;
use tracing::info;

use super::BaselineArgs;
use crate::config::ForecastConfig;
use crate::Result;

/// Arguments of the `export` command
#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub baseline: BaselineArgs,

    /// Output file
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Export the baseline, returning a one-line report
pub fn execute(config: &ForecastConfig, args: &ExportArgs) -> Result<String> {
    let csv = args.baseline.csv()?;
    let kind = args.baseline.dashboard;
    let baseline = args.baseline.load(config)?;

    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    csv.write_to_file(&baseline, &args.output)?;

    info!(
        dashboard = kind.name(),
        periods = baseline.len(),
        path = %args.output.display(),
        "Baseline exported"
    );
    Ok(format!(
        "Exported {} periods of {} to {}",
        baseline.len(),
        kind.name(),
        args.output.display()
    ))
}

/// Run the export command
pub fn run(config: &ForecastConfig, args: &ExportArgs) -> Result<()> {
    println!("{}", execute(config, args)?);
    Ok(())
}
