//! Child tax credit: gross credit after phaseout, applied first as a
//! non-refundable credit, then the refundable remainder (the additional child
//! tax credit) against what is left.

use rust_decimal::Decimal;
use tracing::debug;

use crate::TaxYearConfig;
use crate::calculations::common::{max, min, round_half_up};
use crate::calculations::{AgiResult, apply_credit};
use crate::error::ValidationError;
use crate::models::{CreditsResult, FilingStatus, TaxComputationResult, TaxReturnInput};
use crate::tables::ctc_phaseout_threshold;

/// Gross credit for `children` after the AGI phaseout.
///
/// Every $1,000 of AGI over the threshold, or part of $1,000, removes $50.
pub fn child_tax_credit(
    children: u32,
    agi: Decimal,
    filing_status: FilingStatus,
) -> Decimal {
    let config = &TaxYearConfig::YEAR_2024;

    let maximum = config.ctc_per_child * Decimal::from(children);
    let excess = max(agi - ctc_phaseout_threshold(filing_status), Decimal::ZERO);
    let steps = (excess / config.ctc_phaseout_step).ceil();
    let phaseout = steps * config.ctc_phaseout_per_step;

    round_half_up(max(maximum - phaseout, Decimal::ZERO))
}

pub fn run(
    input: &TaxReturnInput,
    agi: &AgiResult,
    tax: &TaxComputationResult,
) -> Result<CreditsResult, ValidationError> {
    let children = input.credits.num_qualifying_children;
    let ctc = child_tax_credit(children, agi.agi, input.filing_status);

    let nonrefundable = apply_credit(tax.total_income_tax, ctc, false)?;

    let refundable_cap =
        TaxYearConfig::YEAR_2024.ctc_refundable_per_child * Decimal::from(children);
    let unused = ctc - nonrefundable.credit_applied;
    let refundable = apply_credit(nonrefundable.tax_after, min(unused, refundable_cap), true)?;

    let total_credits_applied =
        round_half_up(nonrefundable.credit_applied + refundable.credit_applied);

    debug!(
        children,
        %ctc,
        nonrefundable = %nonrefundable.credit_applied,
        refundable = %refundable.credit_applied,
        "credits applied"
    );

    Ok(CreditsResult {
        child_tax_credit: ctc,
        nonrefundable_ctc_applied: nonrefundable.credit_applied,
        refundable_ctc_applied: refundable.credit_applied,
        total_credits_applied,
        tax_after_credits: refundable.tax_after,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::AboveLineDeductions;

    fn agi(agi: Decimal) -> AgiResult {
        AgiResult {
            total_gross_income: agi,
            above_line_deductions: AboveLineDeductions::default(),
            total_above_line_deductions: Decimal::ZERO,
            agi,
        }
    }

    fn tax(total_income_tax: Decimal) -> TaxComputationResult {
        TaxComputationResult {
            ordinary_tax: total_income_tax,
            qualified_dividend_tax: Decimal::ZERO,
            capital_gains_tax: Decimal::ZERO,
            niit: Decimal::ZERO,
            total_income_tax,
        }
    }

    fn with_children(
        status: FilingStatus,
        children: u32,
    ) -> TaxReturnInput {
        let mut input = TaxReturnInput::new(status);
        input.credits.num_qualifying_children = children;
        input
    }

    // =========================================================================
    // child_tax_credit tests
    // =========================================================================

    #[test]
    fn no_children_no_credit() {
        assert_eq!(
            child_tax_credit(0, dec!(50000), FilingStatus::Single),
            dec!(0)
        );
    }

    #[test]
    fn phaseout_in_whole_steps() {
        // 10 steps × $50
        assert_eq!(
            child_tax_credit(1, dec!(210000), FilingStatus::Single),
            dec!(1500.00)
        );
    }

    #[test]
    fn partial_step_rounds_up() {
        assert_eq!(
            child_tax_credit(1, dec!(200001), FilingStatus::Single),
            dec!(1950.00)
        );
        assert_eq!(
            child_tax_credit(1, dec!(210500), FilingStatus::Single),
            dec!(1450.00)
        );
    }

    #[test]
    fn joint_threshold_is_higher() {
        assert_eq!(
            child_tax_credit(2, dec!(410000), FilingStatus::MarriedFilingJointly),
            dec!(3500.00)
        );
    }

    #[test]
    fn credit_never_negative() {
        assert_eq!(
            child_tax_credit(1, dec!(250000), FilingStatus::Single),
            dec!(0)
        );
        assert_eq!(
            child_tax_credit(1, dec!(900000), FilingStatus::HeadOfHousehold),
            dec!(0)
        );
    }

    // =========================================================================
    // run tests
    // =========================================================================

    #[test]
    fn credit_within_liability_is_all_nonrefundable() {
        let input = with_children(FilingStatus::MarriedFilingJointly, 2);

        let result = run(&input, &agi(dec!(120000)), &tax(dec!(10000))).unwrap();

        assert_eq!(
            result,
            CreditsResult {
                child_tax_credit: dec!(4000.00),
                nonrefundable_ctc_applied: dec!(4000.00),
                refundable_ctc_applied: dec!(0.00),
                total_credits_applied: dec!(4000.00),
                tax_after_credits: dec!(6000.00),
            }
        );
    }

    #[test]
    fn remainder_becomes_refundable() {
        let input = with_children(FilingStatus::Single, 2);

        let result = run(&input, &agi(dec!(30000)), &tax(dec!(1000))).unwrap();

        assert_eq!(result.nonrefundable_ctc_applied, dec!(1000.00));
        assert_eq!(result.refundable_ctc_applied, dec!(3000.00));
        assert_eq!(result.total_credits_applied, dec!(4000.00));
        assert_eq!(result.tax_after_credits, dec!(-3000.00));
    }

    #[test]
    fn refundable_portion_capped_per_child() {
        let input = with_children(FilingStatus::HeadOfHousehold, 1);

        let result = run(&input, &agi(dec!(20000)), &tax(dec!(0))).unwrap();

        assert_eq!(result.nonrefundable_ctc_applied, dec!(0.00));
        assert_eq!(result.refundable_ctc_applied, dec!(1700.00));
        assert_eq!(result.tax_after_credits, dec!(-1700.00));
    }

    #[test]
    fn tax_after_credits_matches_total() {
        let input = with_children(FilingStatus::Single, 3);
        let tax = tax(dec!(2345.67));

        let result = run(&input, &agi(dec!(45000)), &tax).unwrap();

        assert_eq!(
            result.tax_after_credits,
            tax.total_income_tax - result.total_credits_applied
        );
    }
}
