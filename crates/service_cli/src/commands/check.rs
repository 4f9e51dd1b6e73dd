//! Check command implementation
//!
//! Validates the effective configuration and confirms that every
//! dashboard can produce a baseline and a preset. Parameters that act
//! through another field are listed with their transform.

use demo_inputs::{DataSource, SyntheticSource};
use forecast_models::DashboardKind;
use forecast_risk::PerturbationTransform;
use tracing::info;

use super::preset;
use crate::config::ForecastConfig;
use crate::Result;

/// Build the check report
pub fn execute(config: &ForecastConfig) -> Result<String> {
    config.validate()?;
    let source = SyntheticSource::new(config.generation_params());

    let mut lines = vec![
        "Configuration OK".to_string(),
        format!(
            "  seed={} periods={} start_date={} format={} parallel={}",
            config.seed, config.periods, config.start_date, config.format, config.parallel
        ),
        "Dashboards:".to_string(),
    ];

    for kind in DashboardKind::all() {
        let preset = preset(kind, config)?;
        let baseline = source.baseline(kind)?;
        let levels = preset
            .engines()
            .first()
            .map(|engine| engine.levels().iter().map(|l| l.to_string()).collect::<Vec<_>>().join(" "))
            .unwrap_or_default();
        lines.push(format!(
            "  {:<14} {:<24} {:>2} fields  {} periods ({})  levels [{}]  band ±{}%",
            kind.name(),
            kind.title(),
            kind.fields().len(),
            baseline.len(),
            if kind.is_monthly() { "monthly" } else { "quarterly" },
            levels,
            preset.band_spread_pct()
        ));

        for engine in preset.engines() {
            for parameter in engine.parameters() {
                match engine.transform(parameter) {
                    Some(PerturbationTransform::Direct) | None => {}
                    Some(transform) => {
                        lines.push(format!("    {}: {}", parameter, transform.describe()));
                    }
                }
            }
        }
    }

    info!("System check complete");
    Ok(lines.join("\n"))
}

/// Run the check command
pub fn run(config: &ForecastConfig) -> Result<()> {
    println!("{}", execute(config)?);
    Ok(())
}
