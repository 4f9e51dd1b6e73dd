//! Expense forecast dashboard model.
//!
//! Total expenses for a quarter are the plain sum of six cost categories.

use crate::record::{check_arity, FinancialRecord};
use forecast_core::traits::PeriodMetric;
use forecast_core::types::{PeriodRecord, SeriesError};

/// Field names of the expense schema.
pub mod fields {
    /// Payroll costs.
    pub const PAYROLL_COSTS: &str = "payroll_costs";
    /// Cost of goods sold.
    pub const COGS: &str = "cogs";
    /// Operating cost.
    pub const OPERATING_COST: &str = "operating_cost";
    /// Overhead cost.
    pub const OVERHEAD_COST: &str = "overhead_cost";
    /// Research and development expenses.
    pub const RD_EXPENSES: &str = "rd_expenses";
    /// Marketing and sales expenses.
    pub const MARKETING_SALES_EXPENSES: &str = "marketing_sales_expenses";
}

/// One quarter of expense categories.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExpenseRecord {
    /// Quarter label
    pub quarter: String,
    /// Payroll costs
    pub payroll_costs: f64,
    /// Cost of goods sold
    pub cogs: f64,
    /// Operating cost
    pub operating_cost: f64,
    /// Overhead cost
    pub overhead_cost: f64,
    /// R&D expenses
    pub rd_expenses: f64,
    /// Marketing and sales expenses
    pub marketing_sales_expenses: f64,
}

impl ExpenseRecord {
    /// Total expenses for the quarter.
    pub fn total_expenses(&self) -> f64 {
        self.values().iter().sum()
    }
}

impl FinancialRecord for ExpenseRecord {
    const FIELDS: &'static [&'static str] = &[
        fields::PAYROLL_COSTS,
        fields::COGS,
        fields::OPERATING_COST,
        fields::OVERHEAD_COST,
        fields::RD_EXPENSES,
        fields::MARKETING_SALES_EXPENSES,
    ];

    fn label(&self) -> &str {
        &self.quarter
    }

    fn values(&self) -> Vec<f64> {
        vec![
            self.payroll_costs,
            self.cogs,
            self.operating_cost,
            self.overhead_cost,
            self.rd_expenses,
            self.marketing_sales_expenses,
        ]
    }

    fn from_values(label: &str, values: &[f64]) -> Result<Self, SeriesError> {
        check_arity::<Self>(label, values)?;
        Ok(Self {
            quarter: label.to_string(),
            payroll_costs: values[0],
            cogs: values[1],
            operating_cost: values[2],
            overhead_cost: values[3],
            rd_expenses: values[4],
            marketing_sales_expenses: values[5],
        })
    }
}

/// Per-quarter total expenses metric.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TotalExpenses;

impl PeriodMetric for TotalExpenses {
    fn evaluate(&self, record: &PeriodRecord) -> Result<f64, SeriesError> {
        Ok(ExpenseRecord::from_record(record)?.total_expenses())
    }

    fn name(&self) -> &str {
        "total_expenses"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_total_expenses() {
        let record = ExpenseRecord {
            quarter: "Q2 2025".to_string(),
            payroll_costs: 900.0,
            cogs: 1800.0,
            operating_cost: 450.0,
            overhead_cost: 225.0,
            rd_expenses: 225.0,
            marketing_sales_expenses: 340.0,
        };
        assert_relative_eq!(record.total_expenses(), 3940.0);
        assert_relative_eq!(TotalExpenses.evaluate(&record.to_record()).unwrap(), 3940.0);
    }
}
