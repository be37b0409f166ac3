use tracing::debug;

use crate::error::ValidationError;
use crate::models::{FullTaxCalculationResult, TaxReturnInput};
use crate::workflows::{agi, credits, deduction, fica, income, summary, tax_computation};

/// Runs the full calculation for one return.
///
/// The input is validated before any stage runs. Stages run in a fixed
/// order, each taking only the outputs of earlier stages: AGI needs the SE
/// tax deduction from FICA, so FICA must precede it.
///
/// # Errors
///
/// Returns the first [`ValidationError`] found in `input`.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::{FilingStatus, TaxReturnInput, W2Income, calculate_full_tax};
///
/// let mut input = TaxReturnInput::new(FilingStatus::Single);
/// input.w2s.push(W2Income { wages: dec!(75000), federal_withholding: dec!(9000) });
///
/// let result = calculate_full_tax(&input).unwrap();
///
/// assert_eq!(result.summary.taxable_income, dec!(60400.00));
/// assert_eq!(result.summary.ordinary_tax, dec!(8341.00));
/// assert_eq!(result.summary.refund_or_owed, dec!(-659.00));
/// ```
pub fn calculate_full_tax(
    input: &TaxReturnInput,
) -> Result<FullTaxCalculationResult, ValidationError> {
    input.validate()?;

    let income = income::run(input);
    let fica = fica::run(input, &income)?;
    let agi = agi::run(input, &income, &fica)?;
    debug!(agi = %agi.agi, total_fica = %fica.total_fica, "AGI determined");

    let deductions = deduction::run(input, &income, &agi);
    let tax_computation = tax_computation::run(&income, &agi, &deductions, input.filing_status)?;
    let credits = credits::run(input, &agi, &tax_computation)?;
    let summary = summary::run(
        input,
        &income,
        &fica,
        &agi,
        &deductions,
        &tax_computation,
        &credits,
    )?;

    debug!(
        filing_status = %input.filing_status,
        total_tax = %summary.total_tax,
        refund_or_owed = %summary.refund_or_owed,
        "calculation complete"
    );

    Ok(FullTaxCalculationResult {
        income,
        fica,
        agi,
        deductions,
        tax_computation,
        credits,
        summary,
    })
}
