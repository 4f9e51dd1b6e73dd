//! Cashflow drivers with quarterly seasonality.

use forecast_models::CashflowRecord;
use rand::Rng;
use std::f64::consts::FRAC_PI_2;

const BASE_REVENUE: f64 = 1_000_000_000.0;
const BASE_COSTS: f64 = 400_000_000.0;
const SEASONAL_AMPLITUDE: f64 = 0.15;

/// Seasonal multiplier for the `index`-th quarter: peaks in the second
/// quarter of every four, troughs in the fourth.
pub(super) fn seasonal_factor(index: usize, amplitude: f64) -> f64 {
    1.0 + (index as f64 * FRAC_PI_2).sin() * amplitude
}

pub(super) fn generate<R: Rng + ?Sized>(rng: &mut R, labels: &[String]) -> Vec<CashflowRecord> {
    labels
        .iter()
        .enumerate()
        .map(|(index, quarter)| {
            let i = index as f64;
            let seasonal = seasonal_factor(index, SEASONAL_AMPLITUDE);
            let random: f64 = rng.gen_range(0.9..1.1);

            CashflowRecord {
                quarter: quarter.clone(),
                sales_revenue: BASE_REVENUE * seasonal * random,
                accounts_receivable_days: 45.0 + f64::from(rng.gen_range(-5i32..=5)),
                raw_material_costs: BASE_COSTS * seasonal * rng.gen_range(0.95..1.05_f64),
                labor_costs: 300_000_000.0 * (1.0 + i * 0.02) * random,
                accounts_payable_days: 30.0 + f64::from(rng.gen_range(-3i32..=3)),
                capex: 50_000_000.0 * (1.0 - i * 0.05) * random,
                inventory_turnover: rng.gen_range(5.5..6.5),
                operating_expenses: 180_000_000.0 * (1.0 + i * 0.01) * random,
                debt_repayments: 20_000_000.0,
                tax_payments: 10_000_000.0 * seasonal * random,
                seasonal_factor: seasonal,
                customer_prepayments: 50_000_000.0 * seasonal * random,
                supplier_credit_days: 45.0 + f64::from(rng.gen_range(-2i32..=2)),
                dividend_payments: 5_000_000.0,
                fx_rate: 1.0 + i * 0.02 + rng.gen_range(-0.02..0.02_f64),
            }
        })
        .collect()
}
