//! Cashflow forecast dashboard model.
//!
//! ```text
//! inflow  = sales_revenue * (91 / accounts_receivable_days) + customer_prepayments
//! outflow = (raw_material_costs + labor_costs) * (91 / accounts_payable_days)
//!         + capex + operating_expenses + debt_repayments + tax_payments + dividend_payments
//! net     = inflow - outflow
//! ```
//!
//! Inventory turnover, seasonal factor, supplier credit days and the FX rate
//! are carried on the record for reporting but do not enter the formula.

use crate::record::{check_arity, FinancialRecord};
use forecast_core::traits::PeriodMetric;
use forecast_core::types::{PeriodRecord, SeriesError};

/// Field names of the cashflow schema.
pub mod fields {
    /// Sales revenue.
    pub const SALES_REVENUE: &str = "sales_revenue";
    /// Days sales outstanding.
    pub const ACCOUNTS_RECEIVABLE_DAYS: &str = "accounts_receivable_days";
    /// Raw material costs.
    pub const RAW_MATERIAL_COSTS: &str = "raw_material_costs";
    /// Labour costs.
    pub const LABOR_COSTS: &str = "labor_costs";
    /// Days payables outstanding.
    pub const ACCOUNTS_PAYABLE_DAYS: &str = "accounts_payable_days";
    /// Capital expenditure.
    pub const CAPEX: &str = "capex";
    /// Inventory turnover.
    pub const INVENTORY_TURNOVER: &str = "inventory_turnover";
    /// Operating expenses.
    pub const OPERATING_EXPENSES: &str = "operating_expenses";
    /// Debt repayments.
    pub const DEBT_REPAYMENTS: &str = "debt_repayments";
    /// Tax payments.
    pub const TAX_PAYMENTS: &str = "tax_payments";
    /// Seasonal factor.
    pub const SEASONAL_FACTOR: &str = "seasonal_factor";
    /// Customer prepayments.
    pub const CUSTOMER_PREPAYMENTS: &str = "customer_prepayments";
    /// Supplier credit days.
    pub const SUPPLIER_CREDIT_DAYS: &str = "supplier_credit_days";
    /// Dividend payments.
    pub const DIVIDEND_PAYMENTS: &str = "dividend_payments";
    /// FX rate.
    pub const FX_RATE: &str = "fx_rate";
}

/// Days in a reporting quarter used to turn day counts into cash conversion.
pub const DAYS_IN_QUARTER: f64 = 91.0;

/// One quarter of cashflow drivers.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CashflowRecord {
    /// Quarter label
    pub quarter: String,
    /// Sales revenue
    pub sales_revenue: f64,
    /// Accounts receivable days
    pub accounts_receivable_days: f64,
    /// Raw material costs
    pub raw_material_costs: f64,
    /// Labour costs
    pub labor_costs: f64,
    /// Accounts payable days
    pub accounts_payable_days: f64,
    /// Capital expenditure
    pub capex: f64,
    /// Inventory turnover
    pub inventory_turnover: f64,
    /// Operating expenses
    pub operating_expenses: f64,
    /// Debt repayments
    pub debt_repayments: f64,
    /// Tax payments
    pub tax_payments: f64,
    /// Seasonal factor
    pub seasonal_factor: f64,
    /// Customer prepayments
    pub customer_prepayments: f64,
    /// Supplier credit days
    pub supplier_credit_days: f64,
    /// Dividend payments
    pub dividend_payments: f64,
    /// FX rate
    pub fx_rate: f64,
}

impl CashflowRecord {
    /// Cash collected during the quarter.
    pub fn cash_inflow(&self) -> Result<f64, SeriesError> {
        let ar_days = self.positive(fields::ACCOUNTS_RECEIVABLE_DAYS, self.accounts_receivable_days)?;
        Ok(self.sales_revenue * (DAYS_IN_QUARTER / ar_days) + self.customer_prepayments)
    }

    /// Cash paid out during the quarter.
    pub fn cash_outflow(&self) -> Result<f64, SeriesError> {
        let ap_days = self.positive(fields::ACCOUNTS_PAYABLE_DAYS, self.accounts_payable_days)?;
        Ok((self.raw_material_costs + self.labor_costs) * (DAYS_IN_QUARTER / ap_days)
            + self.capex
            + self.operating_expenses
            + self.debt_repayments
            + self.tax_payments
            + self.dividend_payments)
    }

    /// Net cashflow for the quarter.
    pub fn net_cashflow(&self) -> Result<f64, SeriesError> {
        Ok(self.cash_inflow()? - self.cash_outflow()?)
    }

    fn positive(&self, field: &str, value: f64) -> Result<f64, SeriesError> {
        if value > 0.0 {
            Ok(value)
        } else {
            Err(SeriesError::invalid_value(
                field,
                &self.quarter,
                format!("day count must be positive, got {}", value),
            ))
        }
    }
}

impl FinancialRecord for CashflowRecord {
    const FIELDS: &'static [&'static str] = &[
        fields::SALES_REVENUE,
        fields::ACCOUNTS_RECEIVABLE_DAYS,
        fields::RAW_MATERIAL_COSTS,
        fields::LABOR_COSTS,
        fields::ACCOUNTS_PAYABLE_DAYS,
        fields::CAPEX,
        fields::INVENTORY_TURNOVER,
        fields::OPERATING_EXPENSES,
        fields::DEBT_REPAYMENTS,
        fields::TAX_PAYMENTS,
        fields::SEASONAL_FACTOR,
        fields::CUSTOMER_PREPAYMENTS,
        fields::SUPPLIER_CREDIT_DAYS,
        fields::DIVIDEND_PAYMENTS,
        fields::FX_RATE,
    ];

    fn label(&self) -> &str {
        &self.quarter
    }

    fn values(&self) -> Vec<f64> {
        vec![
            self.sales_revenue,
            self.accounts_receivable_days,
            self.raw_material_costs,
            self.labor_costs,
            self.accounts_payable_days,
            self.capex,
            self.inventory_turnover,
            self.operating_expenses,
            self.debt_repayments,
            self.tax_payments,
            self.seasonal_factor,
            self.customer_prepayments,
            self.supplier_credit_days,
            self.dividend_payments,
            self.fx_rate,
        ]
    }

    fn from_values(label: &str, values: &[f64]) -> Result<Self, SeriesError> {
        check_arity::<Self>(label, values)?;
        Ok(Self {
            quarter: label.to_string(),
            sales_revenue: values[0],
            accounts_receivable_days: values[1],
            raw_material_costs: values[2],
            labor_costs: values[3],
            accounts_payable_days: values[4],
            capex: values[5],
            inventory_turnover: values[6],
            operating_expenses: values[7],
            debt_repayments: values[8],
            tax_payments: values[9],
            seasonal_factor: values[10],
            customer_prepayments: values[11],
            supplier_credit_days: values[12],
            dividend_payments: values[13],
            fx_rate: values[14],
        })
    }
}

/// Per-quarter net cashflow metric.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NetCashflow;

impl PeriodMetric for NetCashflow {
    fn evaluate(&self, record: &PeriodRecord) -> Result<f64, SeriesError> {
        CashflowRecord::from_record(record)?.net_cashflow()
    }

    fn name(&self) -> &str {
        "net_cashflow"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quarter() -> CashflowRecord {
        CashflowRecord {
            quarter: "Q3 2024".to_string(),
            sales_revenue: 1_000.0,
            accounts_receivable_days: 91.0,
            raw_material_costs: 200.0,
            labor_costs: 100.0,
            accounts_payable_days: 91.0,
            capex: 50.0,
            inventory_turnover: 6.0,
            operating_expenses: 150.0,
            debt_repayments: 20.0,
            tax_payments: 10.0,
            seasonal_factor: 1.0,
            customer_prepayments: 40.0,
            supplier_credit_days: 45.0,
            dividend_payments: 5.0,
            fx_rate: 1.0,
        }
    }

    #[test]
    fn test_net_cashflow_formula() {
        let q = quarter();
        assert_relative_eq!(q.cash_inflow().unwrap(), 1_040.0);
        assert_relative_eq!(q.cash_outflow().unwrap(), 535.0);
        assert_relative_eq!(q.net_cashflow().unwrap(), 505.0);
    }

    #[test]
    fn test_day_counts_convert_cash() {
        let mut q = quarter();
        q.accounts_receivable_days = 45.5;
        assert_relative_eq!(q.cash_inflow().unwrap(), 2_040.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_day_count_is_invalid() {
        let mut q = quarter();
        q.accounts_payable_days = 0.0;
        let err = NetCashflow.evaluate(&q.to_record()).unwrap_err();
        assert!(matches!(err, SeriesError::InvalidValue { ref field, .. } if field == "accounts_payable_days"));
    }

    #[test]
    fn test_reporting_fields_do_not_move_net() {
        let base = NetCashflow.evaluate(&quarter().to_record()).unwrap();
        let bumped = quarter()
            .to_record()
            .scaled(fields::FX_RATE, 1.2)
            .unwrap();
        assert_eq!(NetCashflow.evaluate(&bumped).unwrap(), base);
    }
}
