//! Back-of-the-envelope estimate from a single gross income figure.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::calculate_bracket_tax;
use crate::calculations::common::{max, round_half_up};
use crate::error::{ValidationError, ensure_amount};
use crate::models::FilingStatus;
use crate::tables::standard_deduction_base;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateResult {
    pub gross_income: Decimal,
    pub filing_status: FilingStatus,
    pub standard_deduction: Decimal,
    pub taxable_income: Decimal,
    pub estimated_tax: Decimal,
    pub effective_rate: Decimal,
    pub marginal_rate: Decimal,
}

/// Treats all of `gross_income` as ordinary income, takes the base standard
/// deduction and runs the bracket schedule.
///
/// # Errors
///
/// Fails when `gross_income` is negative.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::{FilingStatus, quick_estimate};
///
/// let estimate = quick_estimate(dec!(100000), FilingStatus::Single).unwrap();
///
/// assert_eq!(estimate.taxable_income, dec!(85400.00));
/// assert_eq!(estimate.marginal_rate, dec!(0.22));
/// ```
pub fn quick_estimate(
    gross_income: Decimal,
    filing_status: FilingStatus,
) -> Result<EstimateResult, ValidationError> {
    ensure_amount("gross_income", gross_income)?;

    let standard_deduction = standard_deduction_base(filing_status);
    let taxable_income = round_half_up(max(gross_income - standard_deduction, Decimal::ZERO));
    let brackets = calculate_bracket_tax(taxable_income, filing_status)?;

    Ok(EstimateResult {
        gross_income: round_half_up(gross_income),
        filing_status,
        standard_deduction: round_half_up(standard_deduction),
        taxable_income,
        estimated_tax: brackets.total_tax,
        effective_rate: brackets.effective_rate,
        marginal_rate: brackets.marginal_rate,
    })
}
