use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::round_half_up;
use crate::calculations::{
    AgiResult, calculate_bracket_tax, calculate_niit, capital_gains_tax, qualified_dividend_tax,
};
use crate::error::ValidationError;
use crate::models::{DeductionResult, FilingStatus, IncomeResult, TaxComputationResult};

/// Income tax before credits.
///
/// Ordinary income fills the brackets first, qualified dividends stack on
/// top of it, and long-term gains stack on top of both. NIIT is added on
/// the result.
pub fn run(
    income: &IncomeResult,
    agi: &AgiResult,
    deductions: &DeductionResult,
    filing_status: FilingStatus,
) -> Result<TaxComputationResult, ValidationError> {
    let ordinary_tax =
        calculate_bracket_tax(deductions.ordinary_taxable_income, filing_status)?.total_tax;

    let qualified_dividend_tax = qualified_dividend_tax(
        deductions.preferential_qualified_dividends,
        deductions.ordinary_taxable_income,
        filing_status,
    )?
    .tax;

    // Short-term gains are already in ordinary taxable income.
    let stacked_on =
        deductions.ordinary_taxable_income + deductions.preferential_qualified_dividends;
    let capital_gains_tax = capital_gains_tax(
        Decimal::ZERO,
        deductions.preferential_long_term_gains,
        stacked_on,
        filing_status,
    )?
    .tax;

    let niit = calculate_niit(agi.agi, income.net_investment_income, filing_status)?.niit;

    let total_income_tax =
        round_half_up(ordinary_tax + qualified_dividend_tax + capital_gains_tax + niit);

    debug!(
        %ordinary_tax,
        %qualified_dividend_tax,
        %capital_gains_tax,
        %niit,
        %total_income_tax,
        "income tax computed"
    );

    Ok(TaxComputationResult {
        ordinary_tax: round_half_up(ordinary_tax),
        qualified_dividend_tax: round_half_up(qualified_dividend_tax),
        capital_gains_tax: round_half_up(capital_gains_tax),
        niit: round_half_up(niit),
        total_income_tax,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::AboveLineDeductions;

    fn deductions(
        ordinary: Decimal,
        qualified: Decimal,
        long_term: Decimal,
    ) -> DeductionResult {
        DeductionResult {
            standard_deduction_amount: dec!(14600),
            itemized_total: Decimal::ZERO,
            used_standard: true,
            deduction_amount: dec!(14600),
            taxable_income: ordinary + qualified + long_term,
            ordinary_taxable_income: ordinary,
            preferential_qualified_dividends: qualified,
            preferential_long_term_gains: long_term,
        }
    }

    fn income(net_investment_income: Decimal) -> IncomeResult {
        IncomeResult {
            wages: Decimal::ZERO,
            self_employment_income: Decimal::ZERO,
            interest_income: Decimal::ZERO,
            ordinary_dividends: Decimal::ZERO,
            qualified_dividends: Decimal::ZERO,
            short_term_gains: Decimal::ZERO,
            long_term_gains: Decimal::ZERO,
            total_gross_income: Decimal::ZERO,
            net_investment_income,
        }
    }

    fn agi(agi: Decimal) -> AgiResult {
        AgiResult {
            total_gross_income: agi,
            above_line_deductions: AboveLineDeductions::default(),
            total_above_line_deductions: Decimal::ZERO,
            agi,
        }
    }

    #[test]
    fn ordinary_income_only() {
        let result = run(
            &income(dec!(0)),
            &agi(dec!(75000)),
            &deductions(dec!(60400), dec!(0), dec!(0)),
            FilingStatus::Single,
        )
        .unwrap();

        assert_eq!(result.ordinary_tax, dec!(8341.00));
        assert_eq!(result.qualified_dividend_tax, dec!(0));
        assert_eq!(result.capital_gains_tax, dec!(0));
        assert_eq!(result.total_income_tax, dec!(8341.00));
    }

    #[test]
    fn gains_stack_above_dividends() {
        // Dividends fill 40000..47025 at 0% and 2975 at 15%; gains are all 15%.
        let result = run(
            &income(dec!(20000)),
            &agi(dec!(74600)),
            &deductions(dec!(40000), dec!(10000), dec!(10000)),
            FilingStatus::Single,
        )
        .unwrap();

        assert_eq!(result.qualified_dividend_tax, dec!(446.25));
        assert_eq!(result.capital_gains_tax, dec!(1500.00));
        assert_eq!(result.niit, dec!(0));
        assert_eq!(
            result.total_income_tax,
            result.ordinary_tax
                + result.qualified_dividend_tax
                + result.capital_gains_tax
                + result.niit
        );
    }

    #[test]
    fn niit_added_above_threshold() {
        let result = run(
            &income(dec!(30000)),
            &agi(dec!(250000)),
            &deductions(dec!(205400), dec!(0), dec!(30000)),
            FilingStatus::Single,
        )
        .unwrap();

        assert_eq!(result.niit, dec!(1140.00));
        assert_eq!(result.capital_gains_tax, dec!(4500.00));
    }
}
