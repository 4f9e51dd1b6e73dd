//! Dashboard catalogue: schema, headline metric and variable drivers per view.

use crate::balance_sheet::{self, BalanceSheetRecord, TotalAssets};
use crate::cashflow::{self, CashflowRecord, NetCashflow};
use crate::cfo_forecast::{self, CfoForecastRecord, HEADLINE_COLUMNS};
use crate::expense::{ExpenseRecord, TotalExpenses};
use crate::record::FinancialRecord;
use crate::revenue::{self, RevenueForecast, RevenueRecord};
use forecast_core::traits::{FieldSum, PeriodMetric};
use forecast_core::types::{PeriodRecord, SeriesError};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The financial dashboards covered by the workspace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DashboardKind {
    /// Quarterly revenue forecast
    Revenue,
    /// Quarterly expense forecast
    Expense,
    /// Quarterly cashflow forecast
    Cashflow,
    /// Quarterly balance sheet forecast
    BalanceSheet,
    /// Monthly CFO overview forecast
    CfoForecast,
}

impl DashboardKind {
    /// Every dashboard, in menu order.
    pub fn all() -> [Self; 5] {
        [
            Self::Revenue,
            Self::Expense,
            Self::Cashflow,
            Self::BalanceSheet,
            Self::CfoForecast,
        ]
    }

    /// Machine name (`snake_case`).
    pub fn name(&self) -> &'static str {
        match self {
            Self::Revenue => "revenue",
            Self::Expense => "expense",
            Self::Cashflow => "cashflow",
            Self::BalanceSheet => "balance_sheet",
            Self::CfoForecast => "cfo_forecast",
        }
    }

    /// Human-readable title.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Revenue => "Revenue Forecast",
            Self::Expense => "Expense Forecast",
            Self::Cashflow => "Cashflow Forecast",
            Self::BalanceSheet => "Balance Sheet Forecast",
            Self::CfoForecast => "CFO Forecast",
        }
    }

    /// Field schema of the dashboard's records.
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            Self::Revenue => RevenueRecord::FIELDS,
            Self::Expense => ExpenseRecord::FIELDS,
            Self::Cashflow => CashflowRecord::FIELDS,
            Self::BalanceSheet => BalanceSheetRecord::FIELDS,
            Self::CfoForecast => CfoForecastRecord::FIELDS,
        }
    }

    /// Headline per-period metric.
    pub fn metric(&self) -> DashboardMetric {
        match self {
            Self::Revenue => DashboardMetric::Revenue(RevenueForecast),
            Self::Expense => DashboardMetric::Expense(TotalExpenses),
            Self::Cashflow => DashboardMetric::Cashflow(NetCashflow),
            Self::BalanceSheet => DashboardMetric::BalanceSheet(TotalAssets),
            Self::CfoForecast => DashboardMetric::Column(FieldSum::new(cfo_forecast::fields::REVENUE)),
        }
    }

    /// Fields that move with business volume and are stretched by forecast bands.
    ///
    /// Fixed obligations (debt repayments, dividends), day counts and
    /// reporting-only ratios are excluded.
    pub fn variable_fields(&self) -> &'static [&'static str] {
        match self {
            Self::Revenue => &[
                revenue::fields::TOP_CHANNEL_VALUE,
                revenue::fields::MONTHLY_RECURRING_REVENUE,
                revenue::fields::NEW_PROMOTION_REVENUE,
            ],
            Self::Expense => ExpenseRecord::FIELDS,
            Self::Cashflow => &[
                cashflow::fields::SALES_REVENUE,
                cashflow::fields::CUSTOMER_PREPAYMENTS,
                cashflow::fields::RAW_MATERIAL_COSTS,
                cashflow::fields::LABOR_COSTS,
                cashflow::fields::CAPEX,
                cashflow::fields::OPERATING_EXPENSES,
                cashflow::fields::TAX_PAYMENTS,
            ],
            Self::BalanceSheet => &[
                balance_sheet::fields::CASH,
                balance_sheet::fields::ACCOUNTS_RECEIVABLE,
                balance_sheet::fields::INVENTORY,
                balance_sheet::fields::PPE,
                balance_sheet::fields::ACCOUNTS_PAYABLE,
                balance_sheet::fields::SHORT_TERM_DEBT,
                balance_sheet::fields::LONG_TERM_DEBT,
                balance_sheet::fields::RETAINED_EARNINGS,
            ],
            Self::CfoForecast => &HEADLINE_COLUMNS,
        }
    }

    /// True for dashboards reported per month rather than per quarter.
    pub fn is_monthly(&self) -> bool {
        matches!(self, Self::CfoForecast)
    }
}

impl fmt::Display for DashboardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown dashboard name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown dashboard '{0}'. Supported: revenue, expense, cashflow, balance_sheet, cfo_forecast")]
pub struct UnknownDashboard(pub String);

impl FromStr for DashboardKind {
    type Err = UnknownDashboard;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_lowercase().replace('-', "_");
        Self::all()
            .into_iter()
            .find(|kind| kind.name() == normalised)
            .ok_or_else(|| UnknownDashboard(s.to_string()))
    }
}

/// Headline metric of a dashboard, dispatched statically.
#[derive(Clone, Debug, PartialEq)]
pub enum DashboardMetric {
    /// Revenue forecast
    Revenue(RevenueForecast),
    /// Total expenses
    Expense(TotalExpenses),
    /// Net cashflow
    Cashflow(NetCashflow),
    /// Total assets
    BalanceSheet(TotalAssets),
    /// Single-column value
    Column(FieldSum),
}

impl PeriodMetric for DashboardMetric {
    fn evaluate(&self, record: &PeriodRecord) -> Result<f64, SeriesError> {
        match self {
            Self::Revenue(m) => m.evaluate(record),
            Self::Expense(m) => m.evaluate(record),
            Self::Cashflow(m) => m.evaluate(record),
            Self::BalanceSheet(m) => m.evaluate(record),
            Self::Column(m) => PeriodMetric::evaluate(m, record),
        }
    }

    fn name(&self) -> &str {
        match self {
            Self::Revenue(m) => m.name(),
            Self::Expense(m) => m.name(),
            Self::Cashflow(m) => m.name(),
            Self::BalanceSheet(m) => m.name(),
            Self::Column(m) => PeriodMetric::name(m),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dashboard_names() {
        assert_eq!("revenue".parse::<DashboardKind>().unwrap(), DashboardKind::Revenue);
        assert_eq!("Balance-Sheet".parse::<DashboardKind>().unwrap(), DashboardKind::BalanceSheet);
        assert_eq!(" cfo_forecast ".parse::<DashboardKind>().unwrap(), DashboardKind::CfoForecast);
        assert!("payroll".parse::<DashboardKind>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for kind in DashboardKind::all() {
            assert_eq!(kind.to_string().parse::<DashboardKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_variable_fields_belong_to_schema() {
        for kind in DashboardKind::all() {
            for field in kind.variable_fields() {
                assert!(kind.fields().contains(field), "{} not in {} schema", field, kind);
            }
        }
    }

    #[test]
    fn test_metric_names() {
        assert_eq!(DashboardKind::Revenue.metric().name(), "revenue_forecast");
        assert_eq!(DashboardKind::CfoForecast.metric().name(), "revenue");
        assert!(DashboardKind::CfoForecast.is_monthly());
        assert!(!DashboardKind::Cashflow.is_monthly());
    }
}
