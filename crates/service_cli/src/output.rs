//! Rendering of impact tables, bands and summaries.
//!
//! Three formats are supported: aligned text for the terminal, JSON and
//! CSV. Undefined percentages render as `N/A` in text and CSV and as
//! `null` in JSON.

use crate::Result;
use clap::ValueEnum;
use forecast_risk::sensitivity::{DashboardAggregate, PeriodDelta};
use forecast_risk::{ForecastBand, ImpactTable, SensitivityEngine};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Placeholder for undefined values.
pub const NOT_AVAILABLE: &str = "N/A";

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned text table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
    /// Comma-separated values
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Table => "table",
            Self::Json => "json",
            Self::Csv => "csv",
        })
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(format!("Unknown format: {}. Supported: table, json, csv", other)),
        }
    }
}

/// Format a currency amount as `$1.2B`, `$3.4M`, `$5.6K` or `$789`.
pub fn format_currency(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    if abs >= 1e9 {
        format!("{}${:.1}B", sign, abs / 1e9)
    } else if abs >= 1e6 {
        format!("{}${:.1}M", sign, abs / 1e6)
    } else if abs >= 1e3 {
        format!("{}${:.1}K", sign, abs / 1e3)
    } else {
        format!("{}${:.0}", sign, abs)
    }
}

/// Format a signed percentage with two decimals, or `N/A`.
pub fn format_pct(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:+.2}%", v),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn or_na(value: Option<f64>, format: impl FnOnce(f64) -> String) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), format)
}

fn level_header(pct: f64) -> String {
    if pct == 0.0 {
        "0%".to_string()
    } else {
        format!("{:+}%", pct)
    }
}

/// Display model of one impact table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactView {
    /// Aggregate outcome name
    pub aggregate: String,
    /// Baseline aggregate; `None` when the grid is undefined
    pub baseline: Option<f64>,
    /// Levels in percent, ascending
    pub levels: Vec<f64>,
    /// One row per parameter
    pub rows: Vec<ImpactViewRow>,
    /// Smallest aggregate over the grid
    pub min_forecast: Option<f64>,
    /// Largest aggregate over the grid
    pub max_forecast: Option<f64>,
}

/// One parameter row of an [`ImpactView`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactViewRow {
    /// Parameter name
    pub parameter: String,
    /// Impact in percent per level; `None` where undefined
    pub impacts: Vec<Option<f64>>,
}

impl ImpactView {
    /// View of a computed table, rows in registration or tornado order.
    pub fn from_table(table: &ImpactTable, tornado: bool) -> Self {
        let rows = if tornado {
            table.tornado_order()
        } else {
            table.rows().iter().collect()
        };
        let range = table.outcome_range();
        Self {
            aggregate: table.aggregate_name().to_string(),
            baseline: Some(table.baseline()),
            levels: table.levels().iter().map(|l| l.pct()).collect(),
            rows: rows
                .into_iter()
                .map(|row| ImpactViewRow {
                    parameter: row.parameter.clone(),
                    impacts: row.results.iter().map(|r| Some(r.impact_pct)).collect(),
                })
                .collect(),
            min_forecast: range.map(|(lo, _)| lo),
            max_forecast: range.map(|(_, hi)| hi),
        }
    }

    /// Grid of an engine whose baseline aggregate is zero: every cell is
    /// undefined.
    pub fn undefined(engine: &SensitivityEngine<DashboardAggregate>) -> Self {
        let levels: Vec<f64> = engine.levels().iter().map(|l| l.pct()).collect();
        Self {
            aggregate: engine.aggregate_name().to_string(),
            baseline: None,
            rows: engine
                .parameters()
                .into_iter()
                .map(|parameter| ImpactViewRow {
                    parameter: parameter.to_string(),
                    impacts: vec![None; levels.len()],
                })
                .collect(),
            levels,
            min_forecast: None,
            max_forecast: None,
        }
    }
}

/// Render cells as a text table with a header rule.
///
/// The first column is left-aligned, the rest right-aligned.
fn text_table(header: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (cell, &w))| {
                if i == 0 {
                    format!("{:<w$}", cell)
                } else {
                    format!("{:>w$}", cell)
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = line(header);
    out.push('\n');
    out.push_str(&"-".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1)));
    out.push('\n');
    for row in rows {
        out.push_str(&line(row));
        out.push('\n');
    }
    out
}

fn csv_table(header: &[String], rows: &[Vec<String>]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Render impact views.
pub fn render_impacts(views: &[ImpactView], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(views)?),
        OutputFormat::Table => Ok(views
            .iter()
            .map(|view| {
                let baseline = view
                    .baseline
                    .map_or_else(|| NOT_AVAILABLE.to_string(), format_currency);
                let header: Vec<String> = std::iter::once("Parameter".to_string())
                    .chain(view.levels.iter().map(|&l| level_header(l)))
                    .collect();
                let rows: Vec<Vec<String>> = view
                    .rows
                    .iter()
                    .map(|row| {
                        std::iter::once(row.parameter.clone())
                            .chain(row.impacts.iter().map(|&v| format_pct(v)))
                            .collect()
                    })
                    .collect();
                format!(
                    "{} (baseline {})\n{}Minimum forecast {}  Maximum forecast {}\n",
                    view.aggregate,
                    baseline,
                    text_table(&header, &rows),
                    or_na(view.min_forecast, format_currency),
                    or_na(view.max_forecast, format_currency)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Csv => {
            let header: Vec<String> = [
                "aggregate",
                "parameter",
                "level_pct",
                "impact_pct",
                "min_forecast",
                "max_forecast",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect();
            let rows: Vec<Vec<String>> = views
                .iter()
                .flat_map(|view| {
                    view.rows.iter().flat_map(move |row| {
                        view.levels.iter().zip(&row.impacts).map(move |(level, &impact)| {
                            vec![
                                view.aggregate.clone(),
                                row.parameter.clone(),
                                level.to_string(),
                                or_na(impact, |v| v.to_string()),
                                or_na(view.min_forecast, |v| v.to_string()),
                                or_na(view.max_forecast, |v| v.to_string()),
                            ]
                        })
                    })
                })
                .collect();
            csv_table(&header, &rows)
        }
    }
}

/// Render a forecast band.
pub fn render_band(band: &ForecastBand, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(band)?),
        OutputFormat::Table => {
            let header: Vec<String> = ["Period", "Lower", "Base", "Upper"]
                .iter()
                .map(|s| s.to_string())
                .collect();
            let mut rows: Vec<Vec<String>> = band
                .points()
                .map(|p| {
                    vec![
                        p.label.to_string(),
                        format_currency(p.lower),
                        format_currency(p.base),
                        format_currency(p.upper),
                    ]
                })
                .collect();
            rows.push(vec![
                "Total".to_string(),
                format_currency(band.total_lower()),
                format_currency(band.total_base()),
                format_currency(band.total_upper()),
            ]);
            Ok(format!(
                "{} (±{}%)\n{}",
                band.metric(),
                band.spread_pct(),
                text_table(&header, &rows)
            ))
        }
        OutputFormat::Csv => {
            let header: Vec<String> = ["period", "lower", "base", "upper"]
                .iter()
                .map(|s| s.to_string())
                .collect();
            let rows: Vec<Vec<String>> = band
                .points()
                .map(|p| {
                    vec![
                        p.label.to_string(),
                        p.lower.to_string(),
                        p.base.to_string(),
                        p.upper.to_string(),
                    ]
                })
                .collect();
            csv_table(&header, &rows)
        }
    }
}

/// Period-over-period summary of one dashboard metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryView {
    /// Metric name
    pub metric: String,
    /// Per-period values and changes
    pub periods: Vec<PeriodDelta>,
    /// Sum over all periods
    pub total: f64,
    /// Change of the final period against the one before
    pub latest_change_pct: Option<f64>,
}

/// Render a period summary.
pub fn render_summary(summary: &SummaryView, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(summary)?),
        OutputFormat::Table => {
            let header: Vec<String> = ["Period", "Value", "Change"]
                .iter()
                .map(|s| s.to_string())
                .collect();
            let rows: Vec<Vec<String>> = summary
                .periods
                .iter()
                .map(|d| vec![d.label.clone(), format_currency(d.value), format_pct(d.change_pct)])
                .collect();
            Ok(format!(
                "{}: total {}, latest change {}\n{}",
                summary.metric,
                format_currency(summary.total),
                format_pct(summary.latest_change_pct),
                text_table(&header, &rows)
            ))
        }
        OutputFormat::Csv => {
            let header: Vec<String> = ["period", "value", "change_pct"]
                .iter()
                .map(|s| s.to_string())
                .collect();
            let rows: Vec<Vec<String>> = summary
                .periods
                .iter()
                .map(|d| {
                    vec![
                        d.label.clone(),
                        d.value.to_string(),
                        d.change_pct
                            .map_or_else(|| NOT_AVAILABLE.to_string(), |v| v.to_string()),
                    ]
                })
                .collect();
            csv_table(&header, &rows)
        }
    }
}
