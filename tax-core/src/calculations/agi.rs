//! Adjusted gross income: gross income less the Schedule 1 adjustments.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculations::common::{max, round_half_up};
use crate::error::{ValidationError, ensure_non_negative};

/// Schedule 1, Part II adjustments to income.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AboveLineDeductions {
    pub educator_expenses: Decimal,
    pub student_loan_interest: Decimal,
    pub hsa_deduction: Decimal,
    pub ira_deduction: Decimal,

    /// Deductible half of self-employment tax, from the FICA stage.
    pub se_tax_deduction: Decimal,
    pub self_employed_health_insurance: Decimal,
    pub penalty_early_withdrawal: Decimal,
    pub alimony_paid: Decimal,
}

impl AboveLineDeductions {
    pub fn total(&self) -> Decimal {
        self.educator_expenses
            + self.student_loan_interest
            + self.hsa_deduction
            + self.ira_deduction
            + self.se_tax_deduction
            + self.self_employed_health_insurance
            + self.penalty_early_withdrawal
            + self.alimony_paid
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            ("educator_expenses", self.educator_expenses),
            ("student_loan_interest", self.student_loan_interest),
            ("hsa_deduction", self.hsa_deduction),
            ("ira_deduction", self.ira_deduction),
            ("se_tax_deduction", self.se_tax_deduction),
            (
                "self_employed_health_insurance",
                self.self_employed_health_insurance,
            ),
            ("penalty_early_withdrawal", self.penalty_early_withdrawal),
            ("alimony_paid", self.alimony_paid),
        ];
        for (field, value) in fields {
            ensure_non_negative(field, value)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgiResult {
    pub total_gross_income: Decimal,
    pub above_line_deductions: AboveLineDeductions,
    pub total_above_line_deductions: Decimal,

    /// Never below zero.
    pub agi: Decimal,
}

/// Subtracts the above-the-line deductions from gross income.
///
/// Gross income may be negative when capital losses exceed other income; AGI
/// is floored at zero either way.
///
/// # Errors
///
/// Fails when any deduction is negative.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::{AboveLineDeductions, calculate_agi};
///
/// let deductions = AboveLineDeductions {
///     student_loan_interest: dec!(2500),
///     se_tax_deduction: dec!(7064.78),
///     ..Default::default()
/// };
/// let result = calculate_agi(dec!(150000), deductions).unwrap();
///
/// assert_eq!(result.agi, dec!(140435.22));
/// ```
pub fn calculate_agi(
    total_gross_income: Decimal,
    above_line_deductions: AboveLineDeductions,
) -> Result<AgiResult, ValidationError> {
    above_line_deductions.validate()?;

    if total_gross_income < Decimal::ZERO {
        warn!(
            total_gross_income = %total_gross_income,
            "Gross income is negative; AGI floored at zero"
        );
    }

    let total_above_line_deductions = round_half_up(above_line_deductions.total());
    let agi = round_half_up(max(
        total_gross_income - total_above_line_deductions,
        Decimal::ZERO,
    ));

    Ok(AgiResult {
        total_gross_income: round_half_up(total_gross_income),
        above_line_deductions,
        total_above_line_deductions,
        agi,
    })
}
