//! Standard versus itemized deduction, taxable income, and the split of
//! taxable income into ordinary and preferential portions.

use rust_decimal::Decimal;
use tracing::debug;

use crate::TaxYearConfig;
use crate::calculations::common::{max, min, round_half_up};
use crate::calculations::{AgiResult, standard_deduction};
use crate::models::{DeductionResult, FilingStatus, IncomeResult, ItemizedDeductions, TaxReturnInput};

/// Schedule A total after the medical floor and the SALT cap.
fn itemized_total(
    item: &ItemizedDeductions,
    filing_status: FilingStatus,
    agi: Decimal,
) -> Decimal {
    let config = &TaxYearConfig::YEAR_2024;

    let medical_floor = round_half_up(agi * config.medical_agi_floor_rate);
    let medical = max(item.medical - medical_floor, Decimal::ZERO);

    let salt_cap = match filing_status {
        FilingStatus::MarriedFilingSeparately => config.salt_cap_mfs,
        FilingStatus::Single
        | FilingStatus::MarriedFilingJointly
        | FilingStatus::HeadOfHousehold
        | FilingStatus::QualifyingSurvivingSpouse => config.salt_cap,
    };
    let salt = min(item.state_and_local_taxes, salt_cap);

    round_half_up(
        medical + salt + item.mortgage_interest + item.charitable + item.casualty + item.other,
    )
}

pub fn run(
    input: &TaxReturnInput,
    income: &IncomeResult,
    agi: &AgiResult,
) -> DeductionResult {
    let standard =
        standard_deduction(input.filing_status, input.is_blind, input.is_over_65).total_deduction;
    let itemized = input
        .itemized_deductions
        .as_ref()
        .map(|item| itemized_total(item, input.filing_status, agi.agi));

    let (used_standard, deduction_amount) = match itemized {
        _ if input.force_standard_deduction => (true, standard),
        Some(total) if total > standard => (false, total),
        _ => (true, standard),
    };

    let taxable_income = round_half_up(max(agi.agi - deduction_amount, Decimal::ZERO));

    // Losses are not preferential.
    let mut preferential_qualified_dividends = income.qualified_dividends;
    let mut preferential_long_term_gains = max(income.long_term_gains, Decimal::ZERO);
    let total_preferential = preferential_qualified_dividends + preferential_long_term_gains;

    if total_preferential > taxable_income && total_preferential > Decimal::ZERO {
        // Scale dividends, then give gains the exact remainder so the parts
        // sum to taxable income.
        let ratio = taxable_income / total_preferential;
        preferential_qualified_dividends = round_half_up(preferential_qualified_dividends * ratio);
        preferential_long_term_gains =
            round_half_up(taxable_income - preferential_qualified_dividends);
    }

    let ordinary_taxable_income = max(
        taxable_income - preferential_qualified_dividends - preferential_long_term_gains,
        Decimal::ZERO,
    );

    debug!(
        used_standard,
        %deduction_amount,
        %taxable_income,
        %ordinary_taxable_income,
        "deduction selected"
    );

    DeductionResult {
        standard_deduction_amount: round_half_up(standard),
        itemized_total: round_half_up(itemized.unwrap_or(Decimal::ZERO)),
        used_standard,
        deduction_amount: round_half_up(deduction_amount),
        taxable_income,
        ordinary_taxable_income: round_half_up(ordinary_taxable_income),
        preferential_qualified_dividends: round_half_up(preferential_qualified_dividends),
        preferential_long_term_gains: round_half_up(preferential_long_term_gains),
    }
}
