//! Expense categories: independent uniform draws per quarter.

use forecast_models::ExpenseRecord;
use rand::Rng;

pub(super) fn generate<R: Rng + ?Sized>(rng: &mut R, labels: &[String]) -> Vec<ExpenseRecord> {
    labels
        .iter()
        .map(|quarter| ExpenseRecord {
            quarter: quarter.clone(),
            payroll_costs: rng.gen_range(800_000_000.0..1_000_000_000.0),
            cogs: rng.gen_range(1_600_000_000.0..2_000_000_000.0),
            operating_cost: rng.gen_range(400_000_000.0..500_000_000.0),
            overhead_cost: rng.gen_range(200_000_000.0..250_000_000.0),
            rd_expenses: rng.gen_range(200_000_000.0..250_000_000.0),
            marketing_sales_expenses: rng.gen_range(300_000_000.0..375_000_000.0),
        })
        .collect()
}
