use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::common::{max, round_half_up};
use crate::models::{IncomeResult, TaxReturnInput};

/// Totals every income-source record by category.
pub fn run(input: &TaxReturnInput) -> IncomeResult {
    let wages: Decimal = input.w2s.iter().map(|w2| w2.wages).sum();
    let self_employment_income: Decimal =
        input.income_1099_nec.iter().map(|nec| nec.compensation).sum();
    let interest_income: Decimal = input.income_1099_int.iter().map(|f| f.interest).sum();
    let ordinary_dividends: Decimal = input
        .income_1099_div
        .iter()
        .map(|f| f.ordinary_dividends)
        .sum();
    let qualified_dividends: Decimal = input
        .income_1099_div
        .iter()
        .map(|f| f.qualified_dividends)
        .sum();
    let short_term_gains: Decimal = input.income_1099_b.iter().map(|f| f.short_term_gains).sum();
    let long_term_gains: Decimal = input.income_1099_b.iter().map(|f| f.long_term_gains).sum();

    // Qualified dividends are already inside ordinary dividends.
    let total_gross_income = wages
        + self_employment_income
        + interest_income
        + ordinary_dividends
        + short_term_gains
        + long_term_gains;
    let net_investment_income = interest_income
        + ordinary_dividends
        + max(short_term_gains + long_term_gains, Decimal::ZERO);

    if total_gross_income < Decimal::ZERO {
        warn!(
            %total_gross_income,
            %short_term_gains,
            %long_term_gains,
            "Net capital loss exceeds other income"
        );
    }
    debug!(%total_gross_income, %net_investment_income, "income aggregated");

    IncomeResult {
        wages: round_half_up(wages),
        self_employment_income: round_half_up(self_employment_income),
        interest_income: round_half_up(interest_income),
        ordinary_dividends: round_half_up(ordinary_dividends),
        qualified_dividends: round_half_up(qualified_dividends),
        short_term_gains: round_half_up(short_term_gains),
        long_term_gains: round_half_up(long_term_gains),
        total_gross_income: round_half_up(total_gross_income),
        net_investment_income: round_half_up(net_investment_income),
    }
}
