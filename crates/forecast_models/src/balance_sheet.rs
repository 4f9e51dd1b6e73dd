//! Balance sheet forecast dashboard model.
//!
//! The balance sheet total tracked by the dashboard is total assets:
//! `cash + accounts_receivable + inventory + ppe`. Liabilities and equity
//! are exposed for reporting. Capex and D&A are flow items carried on the
//! record but outside the stock totals.

use crate::record::{check_arity, FinancialRecord};
use forecast_core::traits::PeriodMetric;
use forecast_core::types::{PeriodRecord, SeriesError};

/// Field names of the balance sheet schema.
pub mod fields {
    /// Cash and equivalents.
    pub const CASH: &str = "cash";
    /// Accounts receivable.
    pub const ACCOUNTS_RECEIVABLE: &str = "accounts_receivable";
    /// Inventory.
    pub const INVENTORY: &str = "inventory";
    /// Property, plant and equipment.
    pub const PPE: &str = "ppe";
    /// Accounts payable.
    pub const ACCOUNTS_PAYABLE: &str = "accounts_payable";
    /// Short-term debt.
    pub const SHORT_TERM_DEBT: &str = "short_term_debt";
    /// Long-term debt.
    pub const LONG_TERM_DEBT: &str = "long_term_debt";
    /// Retained earnings.
    pub const RETAINED_EARNINGS: &str = "retained_earnings";
    /// Capital expenditure.
    pub const CAPEX: &str = "capex";
    /// Depreciation and amortisation.
    pub const DEPRECIATION_AMORTIZATION: &str = "depreciation_amortization";
}

/// One quarter of balance sheet line items.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BalanceSheetRecord {
    /// Quarter label
    pub quarter: String,
    /// Cash
    pub cash: f64,
    /// Accounts receivable
    pub accounts_receivable: f64,
    /// Inventory
    pub inventory: f64,
    /// Property, plant and equipment
    pub ppe: f64,
    /// Accounts payable
    pub accounts_payable: f64,
    /// Short-term debt
    pub short_term_debt: f64,
    /// Long-term debt
    pub long_term_debt: f64,
    /// Retained earnings
    pub retained_earnings: f64,
    /// Capital expenditure
    pub capex: f64,
    /// Depreciation and amortisation
    pub depreciation_amortization: f64,
}

impl BalanceSheetRecord {
    /// Total assets.
    pub fn total_assets(&self) -> f64 {
        self.cash + self.accounts_receivable + self.inventory + self.ppe
    }

    /// Total liabilities.
    pub fn total_liabilities(&self) -> f64 {
        self.accounts_payable + self.short_term_debt + self.long_term_debt
    }

    /// Total equity.
    pub fn total_equity(&self) -> f64 {
        self.retained_earnings
    }
}

impl FinancialRecord for BalanceSheetRecord {
    const FIELDS: &'static [&'static str] = &[
        fields::CASH,
        fields::ACCOUNTS_RECEIVABLE,
        fields::INVENTORY,
        fields::PPE,
        fields::ACCOUNTS_PAYABLE,
        fields::SHORT_TERM_DEBT,
        fields::LONG_TERM_DEBT,
        fields::RETAINED_EARNINGS,
        fields::CAPEX,
        fields::DEPRECIATION_AMORTIZATION,
    ];

    fn label(&self) -> &str {
        &self.quarter
    }

    fn values(&self) -> Vec<f64> {
        vec![
            self.cash,
            self.accounts_receivable,
            self.inventory,
            self.ppe,
            self.accounts_payable,
            self.short_term_debt,
            self.long_term_debt,
            self.retained_earnings,
            self.capex,
            self.depreciation_amortization,
        ]
    }

    fn from_values(label: &str, values: &[f64]) -> Result<Self, SeriesError> {
        check_arity::<Self>(label, values)?;
        Ok(Self {
            quarter: label.to_string(),
            cash: values[0],
            accounts_receivable: values[1],
            inventory: values[2],
            ppe: values[3],
            accounts_payable: values[4],
            short_term_debt: values[5],
            long_term_debt: values[6],
            retained_earnings: values[7],
            capex: values[8],
            depreciation_amortization: values[9],
        })
    }
}

/// Per-quarter total assets metric (the balance sheet total).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TotalAssets;

impl PeriodMetric for TotalAssets {
    fn evaluate(&self, record: &PeriodRecord) -> Result<f64, SeriesError> {
        Ok(BalanceSheetRecord::from_record(record)?.total_assets())
    }

    fn name(&self) -> &str {
        "total_assets"
    }
}
