//! Criterion benchmarks for the sensitivity engine.
//!
//! Benchmarks cover:
//! - Sequential vs parallel grid evaluation over growing period counts
//! - Revenue preset with linked transforms
//! - Forecast band computation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use forecast_core::traits::{FieldSum, PeriodSum};
use forecast_core::types::{BaselineSeries, PeriodRecord};
use forecast_models::DashboardKind;
use forecast_risk::sensitivity::{ForecastBand, LevelSet, SensitivityEngine, SensitivityPreset};
use forecast_risk::ParallelConfig;

const FIELDS: [&str; 12] = [
    "f00", "f01", "f02", "f03", "f04", "f05", "f06", "f07", "f08", "f09", "f10", "f11",
];

/// Deterministic synthetic series with a dozen positive fields.
fn synthetic_series(n_periods: usize) -> BaselineSeries {
    BaselineSeries::new(
        (0..n_periods)
            .map(|p| {
                FIELDS.iter().enumerate().fold(
                    PeriodRecord::new(format!("P{}", p + 1)),
                    |record, (f, name)| {
                        let value = 100.0 + ((p * 31 + f * 17) % 97) as f64;
                        record.with_field(*name, value)
                    },
                )
            })
            .collect(),
    )
    .expect("synthetic series is valid")
}

fn revenue_series(n_periods: usize) -> BaselineSeries {
    let fields = DashboardKind::Revenue.fields();
    BaselineSeries::new(
        (0..n_periods)
            .map(|p| {
                fields.iter().enumerate().fold(
                    PeriodRecord::new(format!("Q{} {}", p % 4 + 1, 2024 + p / 4)),
                    |record, (f, name)| record.with_field(*name, 500.0 + (p * 7 + f * 13) as f64),
                )
            })
            .collect(),
    )
    .expect("revenue series is valid")
}

fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("sensitivity_engine");
    let levels = LevelSet::symmetric(&[5.0, 10.0, 15.0, 20.0, 25.0]).expect("finite levels");

    for n_periods in [8, 64, 512] {
        let series = synthetic_series(n_periods);
        let engine = SensitivityEngine::new(PeriodSum::new(FieldSum::new("f00")))
            .with_parameters(FIELDS)
            .with_levels(levels.clone())
            .with_parallel_config(ParallelConfig::always());

        group.bench_with_input(BenchmarkId::new("sequential", n_periods), &series, |b, s| {
            b.iter(|| engine.run(black_box(s)))
        });
        group.bench_with_input(BenchmarkId::new("parallel", n_periods), &series, |b, s| {
            b.iter(|| engine.run_parallel(black_box(s)))
        });
    }

    group.finish();
}

fn bench_presets(c: &mut Criterion) {
    let series = revenue_series(40);
    let preset = SensitivityPreset::for_dashboard(DashboardKind::Revenue);

    c.bench_function("revenue_preset_run", |b| b.iter(|| preset.run(black_box(&series))));
    c.bench_function("revenue_band", |b| {
        b.iter(|| {
            ForecastBand::compute(
                black_box(&series),
                &DashboardKind::Revenue.metric(),
                DashboardKind::Revenue.variable_fields(),
                20.0,
            )
        })
    });
}

criterion_group!(benches, bench_engine, bench_presets);
criterion_main!(benches);
