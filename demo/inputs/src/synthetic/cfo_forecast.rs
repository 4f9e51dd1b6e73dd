//! Monthly headline figures: drifting revenue with normal noise, and the
//! statements derived from it.

use crate::error::InputError;
use forecast_models::CfoForecastRecord;
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// $4B annual revenue.
const BASE_MONTHLY_REVENUE: f64 = 4_000_000_000.0 / 12.0;
const PROFIT_MARGIN: f64 = 0.02;
/// Revenue grows by this fraction over the whole horizon.
const REVENUE_DRIFT: f64 = 0.1;
const OPENING_ASSETS: f64 = 5_000_000_000.0;
const BALANCE_NOISE: f64 = 100_000_000.0;
const LIABILITY_RATIO: f64 = 0.4;

struct Noise {
    revenue: Normal<f64>,
    expenses: Normal<f64>,
    operating: Normal<f64>,
    investing: Normal<f64>,
    financing: Normal<f64>,
    balance: Normal<f64>,
}

impl Noise {
    fn new() -> Result<Self, InputError> {
        let base = BASE_MONTHLY_REVENUE;
        Ok(Self {
            revenue: Normal::new(0.0, base * 0.05)?,
            expenses: Normal::new(0.0, base * 0.02)?,
            operating: Normal::new(0.0, base * 0.01)?,
            investing: Normal::new(base * 0.05, base * 0.02)?,
            financing: Normal::new(0.0, base * 0.03)?,
            balance: Normal::new(0.0, BALANCE_NOISE)?,
        })
    }
}

pub(super) fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    labels: &[String],
) -> Result<Vec<CfoForecastRecord>, InputError> {
    let noise = Noise::new()?;
    let horizon = labels.len() as f64;
    let mut assets = OPENING_ASSETS;

    Ok(labels
        .iter()
        .enumerate()
        .map(|(index, month)| {
            let drift = 1.0 + REVENUE_DRIFT * index as f64 / horizon;
            let revenue = BASE_MONTHLY_REVENUE * drift + noise.revenue.sample(rng);
            let expenses = revenue * (1.0 - PROFIT_MARGIN) + noise.expenses.sample(rng);
            let profit = revenue - expenses;

            let operating_cash_flow = profit + noise.operating.sample(rng);
            let investing_cash_flow = -noise.investing.sample(rng).abs();
            let financing_cash_flow = noise.financing.sample(rng);
            let net_cash_flow = operating_cash_flow + investing_cash_flow + financing_cash_flow;

            assets += net_cash_flow + noise.balance.sample(rng);
            let liabilities = assets * LIABILITY_RATIO + noise.balance.sample(rng);

            CfoForecastRecord {
                month: month.clone(),
                revenue,
                expenses,
                profit,
                operating_cash_flow,
                investing_cash_flow,
                financing_cash_flow,
                net_cash_flow,
                assets,
                liabilities,
                equity: assets - liabilities,
            }
        })
        .collect())
}
