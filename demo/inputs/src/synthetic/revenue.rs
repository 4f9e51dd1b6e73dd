//! Revenue drivers: independent uniform draws per quarter.

use forecast_models::RevenueRecord;
use rand::Rng;

pub(super) fn generate<R: Rng + ?Sized>(rng: &mut R, labels: &[String]) -> Vec<RevenueRecord> {
    labels
        .iter()
        .map(|quarter| RevenueRecord {
            quarter: quarter.clone(),
            top_channel_value: rng.gen_range(800_000_000.0..1_000_000_000.0),
            monthly_recurring_revenue: rng.gen_range(200_000_000.0..300_000_000.0),
            new_promotion_revenue: rng.gen_range(50_000_000.0..100_000_000.0),
            customer_acquisition_cost: rng.gen_range(1_000.0..2_000.0),
            customer_lifetime_value: rng.gen_range(10_000.0..20_000.0),
            inventory_turnover: rng.gen_range(4.0..6.0),
        })
        .collect()
}
