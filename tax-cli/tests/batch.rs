//! CSV batch estimates end to end.

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_cli::{BatchEstimator, EstimateRecord};
use tax_core::FilingStatus;

const ESTIMATES_CSV: &str = include_str!("../test-data/estimates.csv");

#[test]
fn parses_fixture() {
    let records = BatchEstimator::parse(ESTIMATES_CSV.as_bytes()).unwrap();

    assert_eq!(records.len(), 4);
    assert_eq!(
        records[1],
        EstimateRecord {
            label: "household".to_string(),
            filing_status: FilingStatus::MarriedFilingJointly,
            gross_income: dec!(185000.50),
        }
    );
    assert_eq!(
        records[3].filing_status,
        FilingStatus::QualifyingSurvivingSpouse
    );
}

#[test]
fn estimates_fixture() {
    let records = BatchEstimator::parse(ESTIMATES_CSV.as_bytes()).unwrap();

    let estimates = BatchEstimator::estimate(&records).unwrap();

    let taxes: Vec<(&str, Decimal)> = estimates
        .iter()
        .map(|e| (e.label.as_str(), e.estimated_tax))
        .collect();
    assert_eq!(
        taxes,
        vec![
            // 37400 taxable: 1160 + 25800 × 12%
            ("new grad", dec!(4256.00)),
            // 155800.50 taxable: 2320 + 8532 + 61500.50 × 22%
            ("household", dec!(24382.11)),
            ("part time", dec!(0)),
            ("retired", dec!(0)),
        ]
    );
    assert_eq!(estimates[1].marginal_rate, dec!(0.22));
    assert_eq!(estimates[2].taxable_income, dec!(0));
}

#[test]
fn output_round_trips_row_count() {
    let records = BatchEstimator::parse(ESTIMATES_CSV.as_bytes()).unwrap();
    let estimates = BatchEstimator::estimate(&records).unwrap();
    let mut out = Vec::new();

    BatchEstimator::write(&mut out, &estimates).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().count(), 5);
    assert!(text.lines().nth(2).unwrap().starts_with("household,MARRIED_FILING_JOINTLY,185000.50,"));
}

#[test]
fn header_only_is_empty_batch() {
    let records = BatchEstimator::parse("label,filing_status,gross_income\n".as_bytes()).unwrap();

    assert!(records.is_empty());
    assert!(BatchEstimator::estimate(&records).unwrap().is_empty());
}
