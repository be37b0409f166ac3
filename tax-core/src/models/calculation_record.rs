use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{FilingStatus, FullTaxCalculationResult, TaxReturnInput};

/// A history row without the input/result documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationSummary {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub filing_status: FilingStatus,
    pub total_income: Decimal,
    pub agi: Decimal,
    pub taxable_income: Decimal,
    pub federal_tax: Decimal,
    pub total_credits: Decimal,
    pub total_tax: Decimal,
    pub effective_rate: Decimal,
    pub marginal_rate: Decimal,
    pub refund_or_owed: Decimal,
}

/// A persisted calculation with the documents it was produced from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCalculation {
    pub summary: CalculationSummary,
    pub input: TaxReturnInput,
    pub result: FullTaxCalculationResult,
}
