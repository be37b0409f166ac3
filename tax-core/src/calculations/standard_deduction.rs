use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::TaxYearConfig;
use crate::models::FilingStatus;
use crate::tables::standard_deduction_base;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardDeductionResult {
    pub filing_status: FilingStatus,
    pub base_amount: Decimal,

    /// Per-condition amount times the number of conditions (65+, blind).
    pub additional_amount: Decimal,
    pub total_deduction: Decimal,
}

/// Standard deduction for `filing_status`, including the additional amount
/// for taxpayers who are 65 or older or blind.
///
/// Single and head of household filers get the larger per-condition amount;
/// every married or surviving-spouse status gets the smaller one.
pub fn standard_deduction(
    filing_status: FilingStatus,
    is_blind: bool,
    is_over_65: bool,
) -> StandardDeductionResult {
    let config = &TaxYearConfig::YEAR_2024;
    let per_condition = match filing_status {
        FilingStatus::Single | FilingStatus::HeadOfHousehold => {
            config.additional_deduction_single_hoh
        }
        FilingStatus::MarriedFilingJointly
        | FilingStatus::MarriedFilingSeparately
        | FilingStatus::QualifyingSurvivingSpouse => config.additional_deduction_married,
    };
    let conditions = Decimal::from(u8::from(is_blind) + u8::from(is_over_65));

    let base_amount = standard_deduction_base(filing_status);
    let additional_amount = per_condition * conditions;

    StandardDeductionResult {
        filing_status,
        base_amount,
        additional_amount,
        total_deduction: base_amount + additional_amount,
    }
}
