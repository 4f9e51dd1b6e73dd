//! Summary command implementation
//!
//! Reports the dashboard's headline metric per period with its
//! period-over-period change.

use clap::Args;
use forecast_core::traits::PeriodMetric;
use forecast_risk::sensitivity::{latest_change, period_deltas};

use super::BaselineArgs;
use crate::config::ForecastConfig;
use crate::output::{render_summary, SummaryView};
use crate::Result;

/// Arguments of the `summary` command
#[derive(Args, Debug, Clone)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub baseline: BaselineArgs,
}

/// Build the summary view
pub fn summarise(config: &ForecastConfig, args: &SummaryArgs) -> Result<SummaryView> {
    let kind = args.baseline.dashboard;
    let baseline = args.baseline.load(config)?;
    let metric = kind.metric();
    let periods = period_deltas(&baseline, &metric)?;

    Ok(SummaryView {
        metric: metric.name().to_string(),
        total: periods.iter().map(|d| d.value).sum(),
        latest_change_pct: latest_change(&periods),
        periods,
    })
}

/// Render the summary
pub fn execute(config: &ForecastConfig, args: &SummaryArgs) -> Result<String> {
    render_summary(&summarise(config, args)?, config.format)
}

/// Run the summary command
pub fn run(config: &ForecastConfig, args: &SummaryArgs) -> Result<()> {
    println!("{}", execute(config, args)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::csv_file;
    use crate::output::OutputFormat;
    use approx::assert_relative_eq;
    use forecast_models::{DashboardKind, ExpenseRecord, FinancialRecord};

    fn expense(quarter: &str, each: f64) -> ExpenseRecord {
        ExpenseRecord {
            quarter: quarter.to_string(),
            payroll_costs: each,
            cogs: each,
            operating_cost: each,
            overhead_cost: each,
            rd_expenses: each,
            marketing_sales_expenses: each,
        }
    }

    fn args_for(input: std::path::PathBuf) -> SummaryArgs {
        SummaryArgs {
            baseline: BaselineArgs::new(DashboardKind::Expense).with_input(input),
        }
    }

    #[test]
    fn test_summary_from_file() {
        let series = ExpenseRecord::series_of(&[
            expense("Q1 2025", 100.0),
            expense("Q2 2025", 110.0),
            expense("Q3 2025", 99.0),
        ])
        .unwrap();
        let (_dir, path) = csv_file(&series);

        let summary = summarise(&ForecastConfig::default(), &args_for(path)).unwrap();
        assert_eq!(summary.metric, "total_expenses");
        assert_eq!(summary.periods.len(), 3);
        assert_eq!(summary.periods[0].change_pct, None);
        assert_relative_eq!(summary.periods[1].change_pct.unwrap(), 10.0, epsilon = 1e-9);
        assert_relative_eq!(summary.latest_change_pct.unwrap(), -10.0, epsilon = 1e-9);
        assert_relative_eq!(summary.total, 6.0 * 309.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_previous_period_renders_na() {
        let series = ExpenseRecord::series_of(&[expense("Q1 2025", 0.0), expense("Q2 2025", 50.0)]).unwrap();
        let (_dir, path) = csv_file(&series);

        let text = execute(&ForecastConfig::default(), &args_for(path.clone())).unwrap();
        assert!(text.contains("latest change N/A"));

        let csv = execute(
            &ForecastConfig {
                format: OutputFormat::Csv,
                ..ForecastConfig::default()
            },
            &args_for(path),
        )
        .unwrap();
        assert_eq!(csv.lines().nth(2), Some("Q2 2025,300,N/A"));
    }
}
