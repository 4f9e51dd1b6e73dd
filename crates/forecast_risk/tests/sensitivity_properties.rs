//! Property and scenario tests for the sensitivity engine.
//!
//! Covers the identity column, baseline immutability, linearity for
//! weighted-sum aggregates, isolation of one-at-a-time perturbation and
//! agreement between sequential and parallel runs.

use approx::assert_relative_eq;
use forecast_core::types::{BaselineSeries, PeriodRecord, SeriesError};
use forecast_models::revenue::fields as revenue;
use forecast_models::{DashboardKind, FinancialRecord, RevenueRecord};
use forecast_risk::sensitivity::{
    LevelSet, PerturbationLevel, PerturbationTransform, SensitivityEngine, SensitivityError,
    SensitivityPreset,
};
use forecast_risk::ParallelConfig;
use proptest::prelude::*;

const WEIGHTS: [(&str, f64); 3] = [("a", 2.0), ("b", 3.0), ("c", 1.0)];

fn weighted(s: &BaselineSeries) -> Result<f64, SeriesError> {
    WEIGHTS
        .iter()
        .map(|(name, w)| -> Result<f64, SeriesError> { Ok(w * s.sum(name)?) })
        .sum()
}

fn build_series(rows: &[(f64, f64, f64)]) -> BaselineSeries {
    BaselineSeries::new(
        rows.iter()
            .enumerate()
            .map(|(i, &(a, b, c))| {
                PeriodRecord::new(format!("P{}", i + 1))
                    .with_field("a", a)
                    .with_field("b", b)
                    .with_field("c", c)
            })
            .collect(),
    )
    .unwrap()
}

fn series_strategy() -> impl Strategy<Value = BaselineSeries> {
    prop::collection::vec((1.0..1_000.0f64, 1.0..1_000.0f64, 1.0..1_000.0f64), 1..8)
        .prop_map(|rows| build_series(&rows))
}

fn revenue_cost(revenue: f64, cost: f64) -> BaselineSeries {
    BaselineSeries::new(
        ["Q1", "Q2"]
            .iter()
            .map(|q| {
                PeriodRecord::new(*q)
                    .with_field("revenue", revenue)
                    .with_field("cost", cost)
            })
            .collect(),
    )
    .unwrap()
}

fn net(s: &BaselineSeries) -> Result<f64, SeriesError> {
    Ok(s.sum("revenue")? - s.sum("cost")?)
}

#[test]
fn test_revenue_cost_scenario() {
    let table = SensitivityEngine::new(net)
        .with_parameters(["revenue", "cost"])
        .run(&revenue_cost(100.0, 40.0))
        .unwrap();

    assert_eq!(table.baseline(), 120.0);
    assert_relative_eq!(table.impact("revenue", 10.0).unwrap(), 16.666_666_666_666_668, epsilon = 1e-9);
    assert_relative_eq!(table.impact("cost", 10.0).unwrap(), -6.666_666_666_666_667, epsilon = 1e-9);
}

#[test]
fn test_zero_baseline_aggregate_fails() {
    let result = SensitivityEngine::new(net)
        .with_parameters(["revenue", "cost"])
        .run(&revenue_cost(75.0, 75.0));
    assert!(matches!(result, Err(SensitivityError::DivisionByZero { .. })));
}

#[test]
fn test_revenue_preset_cac_mirrors_promotion() {
    let series = RevenueRecord::series_of(&[RevenueRecord {
        quarter: "Q1 2025".to_string(),
        top_channel_value: 900.0,
        monthly_recurring_revenue: 250.0,
        new_promotion_revenue: 75.0,
        customer_acquisition_cost: 1_500.0,
        customer_lifetime_value: 15_000.0,
        inventory_turnover: 5.0,
    }])
    .unwrap();

    let tables = SensitivityPreset::for_dashboard(DashboardKind::Revenue)
        .run(&series)
        .unwrap();
    for pct in [-20.0, -10.0, 10.0, 20.0] {
        let promo = tables[0].impact(revenue::NEW_PROMOTION_REVENUE, pct).unwrap();
        let cac = tables[0].impact(revenue::CUSTOMER_ACQUISITION_COST, pct).unwrap();
        assert!(promo * cac < 0.0, "level {}: promo {} cac {}", pct, promo, cac);
        assert_relative_eq!(promo.abs(), cac.abs(), epsilon = 1e-9);
    }
}

#[test]
fn test_custom_transform_in_engine() {
    // Absolute shift of `a` by the level value, rather than a percentage
    let shift = PerturbationTransform::custom(|s: &BaselineSeries, p: &str, l: PerturbationLevel| {
        s.map_records(|r| {
            let v = r.require(p)?;
            r.replaced(p, v + l.pct())
        })
    });
    let table = SensitivityEngine::new(weighted)
        .with_transform("a", shift)
        .with_levels(LevelSet::new([10.0]).unwrap())
        .run(&build_series(&[(10.0, 10.0, 10.0)]))
        .unwrap();
    // base = 60, shifted = 80
    assert_relative_eq!(table.impact("a", 10.0).unwrap(), 100.0 / 3.0, epsilon = 1e-9);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn test_level_zero_is_identity(series in series_strategy()) {
        let table = SensitivityEngine::new(weighted)
            .with_parameters(["a", "b", "c"])
            .run(&series)
            .unwrap();
        for name in ["a", "b", "c"] {
            prop_assert_eq!(table.impact(name, 0.0), Some(0.0));
        }
    }

    #[test]
    fn test_baseline_is_not_mutated(series in series_strategy()) {
        let before = series.clone();
        let base_before = weighted(&series).unwrap();
        SensitivityEngine::new(weighted)
            .with_parameters(["a", "b", "c"])
            .with_transform("c", PerturbationTransform::inverse("a"))
            .run(&series)
            .unwrap();
        prop_assert_eq!(&series, &before);
        prop_assert_eq!(weighted(&series).unwrap(), base_before);
    }

    #[test]
    fn test_linear_aggregate_scales_with_level(series in series_strategy()) {
        let base = weighted(&series).unwrap();
        let table = SensitivityEngine::new(weighted)
            .with_parameters(["a", "b", "c"])
            .run(&series)
            .unwrap();

        for (name, weight) in WEIGHTS {
            let share = weight * series.sum(name).unwrap() / base;
            for pct in [-20.0, -10.0, 10.0, 20.0] {
                let impact = table.impact(name, pct).unwrap();
                prop_assert!((impact - pct * share).abs() < 1e-8, "{} at {}: {} vs {}", name, pct, impact, pct * share);
            }
        }
    }

    #[test]
    fn test_perturbation_isolates_other_fields(
        series in series_strategy(),
        pct in -50.0..50.0f64,
    ) {
        let level = PerturbationLevel::new(pct).unwrap();
        let perturbed = PerturbationTransform::Direct.apply(&series, "b", level).unwrap();
        for name in ["a", "c"] {
            prop_assert_eq!(perturbed.column(name).unwrap(), series.column(name).unwrap());
        }
        prop_assert_eq!(perturbed.labels(), series.labels());
    }

    #[test]
    fn test_parallel_run_matches_sequential(series in series_strategy()) {
        let engine = SensitivityEngine::new(weighted)
            .with_parameters(["a", "b", "c"])
            .with_transform("c", PerturbationTransform::dampened("b", 0.5))
            .with_levels(LevelSet::symmetric(&[5.0, 10.0, 15.0, 20.0, 25.0]).unwrap())
            .with_parallel_config(ParallelConfig::always());
        prop_assert_eq!(engine.run(&series).unwrap(), engine.run_parallel(&series).unwrap());
    }
}
