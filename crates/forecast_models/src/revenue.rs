//! Revenue forecast dashboard model.
//!
//! Quarterly revenue is forecast as
//!
//! ```text
//! revenue = top_channel_value + 3 * monthly_recurring_revenue + new_promotion_revenue
//! ```
//!
//! The three customer/inventory drivers do not enter the formula directly;
//! they act on it through linked perturbations configured by the revenue
//! sensitivity preset.

use crate::record::{check_arity, FinancialRecord};
use forecast_core::traits::PeriodMetric;
use forecast_core::types::{PeriodRecord, SeriesError};

/// Field names of the revenue schema.
pub mod fields {
    /// Revenue from the top sales channel.
    pub const TOP_CHANNEL_VALUE: &str = "top_channel_value";
    /// Monthly recurring revenue.
    pub const MONTHLY_RECURRING_REVENUE: &str = "monthly_recurring_revenue";
    /// Revenue from new promotions.
    pub const NEW_PROMOTION_REVENUE: &str = "new_promotion_revenue";
    /// Cost of acquiring one customer.
    pub const CUSTOMER_ACQUISITION_COST: &str = "customer_acquisition_cost";
    /// Lifetime value of one customer.
    pub const CUSTOMER_LIFETIME_VALUE: &str = "customer_lifetime_value";
    /// Inventory turns per period.
    pub const INVENTORY_TURNOVER: &str = "inventory_turnover";
}

/// Months of recurring revenue per quarter.
pub const MRR_MONTHS_PER_QUARTER: f64 = 3.0;

/// One quarter of revenue drivers.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RevenueRecord {
    /// Quarter label
    pub quarter: String,
    /// Top channel value
    pub top_channel_value: f64,
    /// Monthly recurring revenue
    pub monthly_recurring_revenue: f64,
    /// New promotion revenue
    pub new_promotion_revenue: f64,
    /// Customer acquisition cost
    pub customer_acquisition_cost: f64,
    /// Customer lifetime value
    pub customer_lifetime_value: f64,
    /// Inventory turnover
    pub inventory_turnover: f64,
}

impl RevenueRecord {
    /// Revenue forecast for the quarter.
    pub fn revenue_forecast(&self) -> f64 {
        self.top_channel_value
            + self.monthly_recurring_revenue * MRR_MONTHS_PER_QUARTER
            + self.new_promotion_revenue
    }
}

impl FinancialRecord for RevenueRecord {
    const FIELDS: &'static [&'static str] = &[
        fields::TOP_CHANNEL_VALUE,
        fields::MONTHLY_RECURRING_REVENUE,
        fields::NEW_PROMOTION_REVENUE,
        fields::CUSTOMER_ACQUISITION_COST,
        fields::CUSTOMER_LIFETIME_VALUE,
        fields::INVENTORY_TURNOVER,
    ];

    fn label(&self) -> &str {
        &self.quarter
    }

    fn values(&self) -> Vec<f64> {
        vec![
            self.top_channel_value,
            self.monthly_recurring_revenue,
            self.new_promotion_revenue,
            self.customer_acquisition_cost,
            self.customer_lifetime_value,
            self.inventory_turnover,
        ]
    }

    fn from_values(label: &str, values: &[f64]) -> Result<Self, SeriesError> {
        check_arity::<Self>(label, values)?;
        Ok(Self {
            quarter: label.to_string(),
            top_channel_value: values[0],
            monthly_recurring_revenue: values[1],
            new_promotion_revenue: values[2],
            customer_acquisition_cost: values[3],
            customer_lifetime_value: values[4],
            inventory_turnover: values[5],
        })
    }
}

/// Per-quarter revenue forecast metric.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RevenueForecast;

impl PeriodMetric for RevenueForecast {
    fn evaluate(&self, record: &PeriodRecord) -> Result<f64, SeriesError> {
        Ok(RevenueRecord::from_record(record)?.revenue_forecast())
    }

    fn name(&self) -> &str {
        "revenue_forecast"
    }
}
