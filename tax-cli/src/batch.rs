use std::io::{Read, Write};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tax_core::{FilingStatus, ValidationError, quick_estimate};
use thiserror::Error;

/// Errors that can occur when running a batch of estimates.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Row '{label}': {source}")]
    Invalid {
        label: String,
        #[source]
        source: ValidationError,
    },

    #[error("CSV write error: {0}")]
    CsvWrite(String),
}

impl From<csv::Error> for BatchError {
    fn from(err: csv::Error) -> Self {
        BatchError::CsvParse(err.to_string())
    }
}

/// A single row of the batch input.
///
/// - `label`: free text carried through to the output
/// - `filing_status`: canonical name (`SINGLE`) or short code (`S`)
/// - `gross_income`: non-negative amount
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct EstimateRecord {
    pub label: String,
    pub filing_status: FilingStatus,
    pub gross_income: Decimal,
}

/// A single row of the batch output.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BatchEstimate {
    pub label: String,
    pub filing_status: FilingStatus,
    pub gross_income: Decimal,
    pub standard_deduction: Decimal,
    pub taxable_income: Decimal,
    pub estimated_tax: Decimal,
    pub effective_rate: Decimal,
    pub marginal_rate: Decimal,
}

/// Quick estimates over a CSV of `label,filing_status,gross_income` rows.
pub struct BatchEstimator;

impl BatchEstimator {
    /// Parse records from a CSV reader with a header row.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<EstimateRecord>, BatchError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: EstimateRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Estimate every record, stopping at the first invalid one.
    pub fn estimate(records: &[EstimateRecord]) -> Result<Vec<BatchEstimate>, BatchError> {
        records
            .iter()
            .map(|record| {
                let estimate = quick_estimate(record.gross_income, record.filing_status)
                    .map_err(|source| BatchError::Invalid {
                        label: record.label.clone(),
                        source,
                    })?;
                Ok(BatchEstimate {
                    label: record.label.clone(),
                    filing_status: estimate.filing_status,
                    gross_income: estimate.gross_income,
                    standard_deduction: estimate.standard_deduction,
                    taxable_income: estimate.taxable_income,
                    estimated_tax: estimate.estimated_tax,
                    effective_rate: estimate.effective_rate,
                    marginal_rate: estimate.marginal_rate,
                })
            })
            .collect()
    }

    /// Write estimates as CSV with a header row.
    pub fn write<W: Write>(
        writer: W,
        estimates: &[BatchEstimate],
    ) -> Result<(), BatchError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for estimate in estimates {
            csv_writer
                .serialize(estimate)
                .map_err(|e| BatchError::CsvWrite(e.to_string()))?;
        }
        csv_writer
            .flush()
            .map_err(|e| BatchError::CsvWrite(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parses_codes_and_names() {
        let csv = "label,filing_status,gross_income\na,S,100\nb, MARRIED_FILING_JOINTLY ,2000.50\n";

        let records = BatchEstimator::parse(csv.as_bytes()).unwrap();

        assert_eq!(
            records,
            vec![
                EstimateRecord {
                    label: "a".to_string(),
                    filing_status: FilingStatus::Single,
                    gross_income: dec!(100),
                },
                EstimateRecord {
                    label: "b".to_string(),
                    filing_status: FilingStatus::MarriedFilingJointly,
                    gross_income: dec!(2000.50),
                },
            ]
        );
    }

    #[test]
    fn unknown_status_is_a_parse_error() {
        let csv = "label,filing_status,gross_income\na,WIDOWED,100\n";

        let result = BatchEstimator::parse(csv.as_bytes());

        assert!(matches!(result, Err(BatchError::CsvParse(msg)) if msg.contains("WIDOWED")));
    }

    #[test]
    fn negative_income_names_the_row() {
        let records = vec![EstimateRecord {
            label: "oops".to_string(),
            filing_status: FilingStatus::Single,
            gross_income: dec!(-5),
        }];

        let result = BatchEstimator::estimate(&records);

        assert!(matches!(
            result,
            Err(BatchError::Invalid { ref label, .. }) if label == "oops"
        ));
    }

    #[test]
    fn writes_header_and_rows() {
        let estimates = BatchEstimator::estimate(&[EstimateRecord {
            label: "x".to_string(),
            filing_status: FilingStatus::Single,
            gross_income: dec!(100000),
        }])
        .unwrap();
        let mut out = Vec::new();

        BatchEstimator::write(&mut out, &estimates).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "label,filing_status,gross_income,standard_deduction,taxable_income,estimated_tax,effective_rate,marginal_rate"
        );
        let fields: Vec<&str> = lines[1].split(',').collect();
        assert_eq!(fields[..2], ["x", "SINGLE"]);
        assert_eq!(fields[4].parse::<Decimal>().unwrap(), dec!(85400));
        assert_eq!(fields[5].parse::<Decimal>().unwrap(), dec!(13841));
        assert_eq!(fields[6], "0.162073");
        assert_eq!(lines.len(), 2);
    }
}
