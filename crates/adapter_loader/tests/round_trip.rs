//! Export/import round trips through files and arbitrary values.

use adapter_loader::{read_from_file, read_series, write_series, write_to_file, SeriesCsv};
use forecast_core::types::{BaselineSeries, PeriodRecord};
use proptest::prelude::*;
use tempfile::tempdir;

fn quarterly(values: &[(f64, f64)]) -> BaselineSeries {
    BaselineSeries::new(
        values
            .iter()
            .enumerate()
            .map(|(i, &(sales, days))| {
                PeriodRecord::new(format!("Q{} {}", i % 4 + 1, 2024 + i / 4))
                    .with_field("sales_revenue", sales)
                    .with_field("accounts_receivable_days", days)
            })
            .collect(),
    )
    .unwrap()
}

#[test]
fn test_file_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cashflow.csv");
    let series = quarterly(&[(12_500.75, 45.0), (13_020.125, 47.5), (11_999.999, 44.0)]);

    write_to_file(&series, &path).unwrap();
    let back = read_from_file(&path).unwrap();

    assert_eq!(back, series);
    assert_eq!(back.labels(), vec!["Q1 2024", "Q2 2024", "Q3 2024"]);
}

#[test]
fn test_tab_delimited_file_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cashflow.tsv");
    let series = quarterly(&[(1.0, 2.0)]);
    let tsv = SeriesCsv::new().with_delimiter(b'\t');

    tsv.write_to_file(&series, &path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("period\tsales_revenue\taccounts_receivable_days\n"));
    assert_eq!(tsv.read_from_file(&path).unwrap(), series);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = read_from_file(dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, adapter_loader::LoaderError::Io(_)));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn test_values_survive_export(
        values in prop::collection::vec((-1.0e12..1.0e12f64, 1.0e-6..365.0f64), 1..12),
    ) {
        let series = quarterly(&values);
        let mut buf = Vec::new();
        write_series(&series, &mut buf).unwrap();
        let back = read_series(buf.as_slice()).unwrap();
        prop_assert_eq!(back, series);
    }
}
