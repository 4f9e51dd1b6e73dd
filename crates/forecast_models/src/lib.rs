//! # Forecast Models (L2: Business Logic)
//!
//! Typed dashboard records and their per-period metrics.
//!
//! This crate provides:
//! - One record type per dashboard (revenue, expense, cashflow, balance
//!   sheet, CFO forecast) with a fixed field schema
//! - Conversion to and from generic [`forecast_core::PeriodRecord`]s via
//!   [`FinancialRecord`]
//! - Headline per-period metrics (revenue forecast, total expenses, net
//!   cashflow, total assets)
//! - The dashboard catalogue ([`DashboardKind`]) tying schema, metric and
//!   band drivers together
//!
//! ## Design Principles
//!
//! - **Named fields** on typed records, generic records at the engine seam
//! - **Enum-based metrics** for static dispatch ([`DashboardMetric`])
//! - **Field name constants** per dashboard so that presets and transforms
//!   never spell a column by hand
//!
//! ## Example
//!
//! ```rust
//! use forecast_core::traits::PeriodMetric;
//! use forecast_models::{FinancialRecord, RevenueForecast, RevenueRecord};
//!
//! let quarter = RevenueRecord {
//!     quarter: "Q1 2024".to_string(),
//!     top_channel_value: 1_000.0,
//!     monthly_recurring_revenue: 200.0,
//!     new_promotion_revenue: 50.0,
//!     customer_acquisition_cost: 80.0,
//!     customer_lifetime_value: 1_500.0,
//!     inventory_turnover: 6.0,
//! };
//!
//! let forecast = RevenueForecast.evaluate(&quarter.to_record()).unwrap();
//! assert_eq!(forecast, 1_650.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod balance_sheet;
pub mod cashflow;
pub mod cfo_forecast;
pub mod dashboard;
pub mod expense;
pub mod record;
pub mod revenue;

pub use balance_sheet::{BalanceSheetRecord, TotalAssets};
pub use cashflow::{CashflowRecord, NetCashflow};
pub use cfo_forecast::CfoForecastRecord;
pub use dashboard::{DashboardKind, DashboardMetric, UnknownDashboard};
pub use expense::{ExpenseRecord, TotalExpenses};
pub use record::FinancialRecord;
pub use revenue::{RevenueForecast, RevenueRecord};
