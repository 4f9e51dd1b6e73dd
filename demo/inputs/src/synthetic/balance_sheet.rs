//! Balance sheet items for a company of fixed size.

use super::cashflow::seasonal_factor;
use forecast_models::BalanceSheetRecord;
use rand::Rng;

const BASE_ASSETS: f64 = 4_000_000_000.0;
const SEASONAL_AMPLITUDE: f64 = 0.2;

pub(super) fn generate<R: Rng + ?Sized>(rng: &mut R, labels: &[String]) -> Vec<BalanceSheetRecord> {
    labels
        .iter()
        .enumerate()
        .map(|(index, quarter)| {
            let i = index as f64;
            let seasonal = seasonal_factor(index, SEASONAL_AMPLITUDE);
            let random: f64 = rng.gen_range(0.8..1.2);
            let scaled = |share: f64, trend: f64| BASE_ASSETS * share * trend * random;

            BalanceSheetRecord {
                quarter: quarter.clone(),
                cash: scaled(0.1, seasonal),
                accounts_receivable: scaled(0.15, seasonal),
                inventory: scaled(0.2, seasonal),
                ppe: scaled(0.4, 1.0 + i * 0.05),
                accounts_payable: scaled(0.1, seasonal),
                short_term_debt: scaled(0.05, 1.0 - i * 0.03),
                long_term_debt: scaled(0.3, 1.0 - i * 0.01),
                retained_earnings: scaled(0.2, 1.0 + i * 0.04),
                capex: scaled(0.05, seasonal),
                depreciation_amortization: scaled(0.03, 1.0 + i * 0.02),
            }
        })
        .collect()
}
