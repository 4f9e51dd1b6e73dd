//! Band command implementation
//!
//! Computes the optimistic/pessimistic envelope of the dashboard's
//! headline metric.

use clap::Args;
use tracing::info;

use super::{preset, BaselineArgs};
use crate::config::ForecastConfig;
use crate::output::render_band;
use crate::Result;

/// Arguments of the `band` command
#[derive(Args, Debug, Clone)]
pub struct BandArgs {
    #[command(flatten)]
    pub baseline: BaselineArgs,

    /// Spread in percent; overrides the dashboard default
    #[arg(short, long)]
    pub spread: Option<f64>,
}

/// Render the forecast band
pub fn execute(config: &ForecastConfig, args: &BandArgs) -> Result<String> {
    let kind = args.baseline.dashboard;
    let baseline = args.baseline.load(config)?;
    let mut preset = preset(kind, config)?;
    if let Some(spread) = args.spread {
        preset = preset.with_band_spread(spread);
    }

    info!(
        dashboard = kind.name(),
        spread_pct = preset.band_spread_pct(),
        "Computing forecast band"
    );
    let band = preset.band(&baseline)?;
    render_band(&band, config.format)
}

/// Run the band command
pub fn run(config: &ForecastConfig, args: &BandArgs) -> Result<()> {
    println!("{}", execute(config, args)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use crate::CliError;
    use forecast_models::DashboardKind;
    use forecast_risk::SensitivityError;

    fn args(dashboard: DashboardKind, spread: Option<f64>) -> BandArgs {
        BandArgs {
            baseline: BaselineArgs::new(dashboard),
            spread,
        }
    }

    #[test]
    fn test_band_table_has_total_row() {
        let text = execute(&ForecastConfig::default(), &args(DashboardKind::Revenue, None)).unwrap();
        assert!(text.starts_with("revenue_forecast (±20%)"), "{}", text);
        assert!(text.lines().last().unwrap().starts_with("Total"));
    }

    #[test]
    fn test_band_json_is_ordered() {
        let config = ForecastConfig {
            format: OutputFormat::Json,
            ..ForecastConfig::default()
        };
        let text = execute(&config, &args(DashboardKind::Expense, Some(15.0))).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["spread_pct"], serde_json::json!(15.0));
        let lower = json["lower"].as_array().unwrap();
        let base = json["base"].as_array().unwrap();
        let upper = json["upper"].as_array().unwrap();
        for i in 0..base.len() {
            let (l, b, u) = (
                lower[i].as_f64().unwrap(),
                base[i].as_f64().unwrap(),
                upper[i].as_f64().unwrap(),
            );
            assert!(l <= b && b <= u);
        }
    }

    #[test]
    fn test_negative_spread_rejected() {
        let err = execute(&ForecastConfig::default(), &args(DashboardKind::Cashflow, Some(-5.0))).unwrap_err();
        assert!(matches!(err, CliError::Sensitivity(SensitivityError::Band(_))));
    }
}
