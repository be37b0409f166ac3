use rust_decimal::Decimal;

use crate::calculations::common::{max, round_half_up, round_rate};
use crate::calculations::{AgiResult, FicaResult, calculate_bracket_tax};
use crate::error::ValidationError;
use crate::models::{
    CreditsResult, DeductionResult, IncomeResult, TaxComputationResult, TaxReturnInput, TaxSummary,
};

/// The Form 1040 bottom line.
///
/// `total_tax` adds FICA to income tax after credits, but `refund_or_owed`
/// offsets payments against income tax only.
pub fn run(
    input: &TaxReturnInput,
    income: &IncomeResult,
    fica: &FicaResult,
    agi: &AgiResult,
    deductions: &DeductionResult,
    tax: &TaxComputationResult,
    credits: &CreditsResult,
) -> Result<TaxSummary, ValidationError> {
    let total_withholding = input.total_withholding();
    let total_payments = total_withholding + input.estimated_payments;

    let income_tax_after_credits = credits.tax_after_credits;
    let total_tax = income_tax_after_credits + fica.total_fica;
    let refund_or_owed = income_tax_after_credits - total_payments;

    // A net capital loss can push gross income below zero; the summary
    // reports it floored so that income >= AGI still holds.
    let total_income = max(income.total_gross_income, Decimal::ZERO);
    let effective_rate = round_rate(if total_income > Decimal::ZERO {
        total_tax / total_income
    } else {
        Decimal::ZERO
    });
    let marginal_rate =
        calculate_bracket_tax(deductions.taxable_income, input.filing_status)?.marginal_rate;

    Ok(TaxSummary {
        filing_status: input.filing_status,
        total_income: round_half_up(total_income),
        agi: agi.agi,
        deduction_amount: deductions.deduction_amount,
        taxable_income: deductions.taxable_income,
        ordinary_tax: tax.ordinary_tax,
        qualified_dividend_tax: tax.qualified_dividend_tax,
        capital_gains_tax: tax.capital_gains_tax,
        niit: tax.niit,
        total_income_tax_before_credits: tax.total_income_tax,
        total_credits: credits.total_credits_applied,
        income_tax_after_credits: round_half_up(income_tax_after_credits),
        total_fica: fica.total_fica,
        total_tax: round_half_up(total_tax),
        effective_rate,
        marginal_rate,
        total_withholding: round_half_up(total_withholding),
        estimated_payments: round_half_up(input.estimated_payments),
        total_payments: round_half_up(total_payments),
        refund_or_owed: round_half_up(refund_or_owed),
    })
}
