//! CFO overview forecast model.
//!
//! Monthly projections of the headline P&L, cashflow and balance sheet
//! figures. Each headline column is analysed on its own: the aggregate is
//! the column sum over all months.

use crate::record::{check_arity, FinancialRecord};
use forecast_core::types::SeriesError;

/// Field names of the CFO forecast schema.
pub mod fields {
    /// Revenue.
    pub const REVENUE: &str = "revenue";
    /// Expenses.
    pub const EXPENSES: &str = "expenses";
    /// Profit.
    pub const PROFIT: &str = "profit";
    /// Operating cash flow.
    pub const OPERATING_CASH_FLOW: &str = "operating_cash_flow";
    /// Investing cash flow.
    pub const INVESTING_CASH_FLOW: &str = "investing_cash_flow";
    /// Financing cash flow.
    pub const FINANCING_CASH_FLOW: &str = "financing_cash_flow";
    /// Net cash flow.
    pub const NET_CASH_FLOW: &str = "net_cash_flow";
    /// Total assets.
    pub const ASSETS: &str = "assets";
    /// Total liabilities.
    pub const LIABILITIES: &str = "liabilities";
    /// Equity.
    pub const EQUITY: &str = "equity";
}

/// Columns analysed by the CFO forecast sensitivity view.
pub const HEADLINE_COLUMNS: [&str; 4] = [
    fields::REVENUE,
    fields::EXPENSES,
    fields::NET_CASH_FLOW,
    fields::ASSETS,
];

/// One month of headline figures.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CfoForecastRecord {
    /// Month label (`YYYY-MM`)
    pub month: String,
    /// Revenue
    pub revenue: f64,
    /// Expenses
    pub expenses: f64,
    /// Profit
    pub profit: f64,
    /// Operating cash flow
    pub operating_cash_flow: f64,
    /// Investing cash flow
    pub investing_cash_flow: f64,
    /// Financing cash flow
    pub financing_cash_flow: f64,
    /// Net cash flow
    pub net_cash_flow: f64,
    /// Assets
    pub assets: f64,
    /// Liabilities
    pub liabilities: f64,
    /// Equity
    pub equity: f64,
}

impl FinancialRecord for CfoForecastRecord {
    const FIELDS: &'static [&'static str] = &[
        fields::REVENUE,
        fields::EXPENSES,
        fields::PROFIT,
        fields::OPERATING_CASH_FLOW,
        fields::INVESTING_CASH_FLOW,
        fields::FINANCING_CASH_FLOW,
        fields::NET_CASH_FLOW,
        fields::ASSETS,
        fields::LIABILITIES,
        fields::EQUITY,
    ];

    fn label(&self) -> &str {
        &self.month
    }

    fn values(&self) -> Vec<f64> {
        vec![
            self.revenue,
            self.expenses,
            self.profit,
            self.operating_cash_flow,
            self.investing_cash_flow,
            self.financing_cash_flow,
            self.net_cash_flow,
            self.assets,
            self.liabilities,
            self.equity,
        ]
    }

    fn from_values(label: &str, values: &[f64]) -> Result<Self, SeriesError> {
        check_arity::<Self>(label, values)?;
        Ok(Self {
            month: label.to_string(),
            revenue: values[0],
            expenses: values[1],
            profit: values[2],
            operating_cash_flow: values[3],
            investing_cash_flow: values[4],
            financing_cash_flow: values[5],
            net_cash_flow: values[6],
            assets: values[7],
            liabilities: values[8],
            equity: values[9],
        })
    }
}
