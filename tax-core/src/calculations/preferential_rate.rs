//! The 0% / 15% / 20% schedule for qualified dividends and long-term capital
//! gains.
//!
//! Preferential income is stacked on top of the income already placed on the
//! scale (ordinary taxable income, and for gains also the qualified
//! dividends). The tier bounds apply to that combined total, so ordinary
//! income can use up some or all of the 0% tier before any preferential
//! amount is taxed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::{max, min, round_half_up};
use crate::error::{ValidationError, ensure_non_negative};
use crate::models::FilingStatus;
use crate::tables::preferential_tiers;

/// One tier's share of a preferential amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferentialRateDetail {
    pub rate: Decimal,

    /// Position on the combined income scale where this slice starts.
    pub bracket_bottom: Decimal,
    pub bracket_top: Option<Decimal>,
    pub taxable_in_bracket: Decimal,
    pub tax_in_bracket: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualifiedDividendTaxResult {
    pub qualified_dividends: Decimal,
    pub ordinary_taxable_income: Decimal,
    pub tax: Decimal,
    pub breakdown: Vec<PreferentialRateDetail>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapitalGainsTaxResult {
    /// Passed through untaxed here; short-term gains are ordinary income.
    pub short_term_gains: Decimal,
    pub long_term_gains: Decimal,

    /// Ordinary taxable income plus preferential qualified dividends.
    pub stacked_on: Decimal,
    pub tax: Decimal,
    pub breakdown: Vec<PreferentialRateDetail>,
}

/// Taxes `amount` stacked directly above `stacked_on`.
///
/// Returns a zero tax and an empty breakdown when `amount` is zero or
/// negative; losses are never taxed here.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::FilingStatus;
/// use tax_core::calculations::compute_preferential_tax;
///
/// let (tax, breakdown) =
///     compute_preferential_tax(dec!(30000), dec!(40000), FilingStatus::Single);
///
/// assert_eq!(tax, dec!(3446.25));
/// assert_eq!(breakdown[0].taxable_in_bracket, dec!(7025.00));
/// ```
pub fn compute_preferential_tax(
    amount: Decimal,
    stacked_on: Decimal,
    filing_status: FilingStatus,
) -> (Decimal, Vec<PreferentialRateDetail>) {
    if amount <= Decimal::ZERO {
        return (round_half_up(Decimal::ZERO), Vec::new());
    }

    let mut remaining = amount;
    let mut cursor = stacked_on;
    let mut total = Decimal::ZERO;
    let mut breakdown = Vec::new();

    for tier in preferential_tiers(filing_status) {
        if remaining <= Decimal::ZERO {
            break;
        }

        let room = match tier.upper_bound {
            Some(upper) => max(upper - cursor, Decimal::ZERO),
            None => remaining,
        };
        if room <= Decimal::ZERO {
            continue;
        }

        let take = min(remaining, room);
        let tax = round_half_up(take * tier.rate);
        breakdown.push(PreferentialRateDetail {
            rate: tier.rate,
            bracket_bottom: cursor,
            bracket_top: tier.upper_bound,
            taxable_in_bracket: round_half_up(take),
            tax_in_bracket: tax,
        });

        total += tax;
        remaining -= take;
        cursor += take;
    }

    (round_half_up(total), breakdown)
}

/// Tax on qualified dividends stacked on ordinary taxable income.
///
/// # Errors
///
/// Fails when either argument is negative.
pub fn qualified_dividend_tax(
    qualified_dividends: Decimal,
    ordinary_taxable_income: Decimal,
    filing_status: FilingStatus,
) -> Result<QualifiedDividendTaxResult, ValidationError> {
    ensure_non_negative("qualified_dividends", qualified_dividends)?;
    ensure_non_negative("ordinary_taxable_income", ordinary_taxable_income)?;

    let (tax, breakdown) =
        compute_preferential_tax(qualified_dividends, ordinary_taxable_income, filing_status);
    debug!(%qualified_dividends, %ordinary_taxable_income, %tax, "qualified dividend tax");

    Ok(QualifiedDividendTaxResult {
        qualified_dividends,
        ordinary_taxable_income,
        tax,
        breakdown,
    })
}

/// Tax on long-term gains stacked on `stacked_on`. A net long-term loss
/// yields zero tax.
///
/// # Errors
///
/// Fails when `stacked_on` is negative.
pub fn capital_gains_tax(
    short_term_gains: Decimal,
    long_term_gains: Decimal,
    stacked_on: Decimal,
    filing_status: FilingStatus,
) -> Result<CapitalGainsTaxResult, ValidationError> {
    ensure_non_negative("stacked_on", stacked_on)?;

    let (tax, breakdown) = compute_preferential_tax(long_term_gains, stacked_on, filing_status);
    debug!(%long_term_gains, %stacked_on, %tax, "capital gains tax");

    Ok(CapitalGainsTaxResult {
        short_term_gains,
        long_term_gains,
        stacked_on,
        tax,
        breakdown,
    })
}
