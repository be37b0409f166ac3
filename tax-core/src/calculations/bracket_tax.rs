//! Progressive bracket tax on ordinary taxable income.
//!
//! Income is walked through the filing status's schedule from the bottom; each
//! bracket taxes only the slice of income between the previous bracket's upper
//! bound and its own. The tax for each slice is rounded to cents on its own,
//! so the breakdown always sums exactly to the total.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::FilingStatus;
//! use tax_core::calculations::calculate_bracket_tax;
//!
//! let result = calculate_bracket_tax(dec!(60400), FilingStatus::Single).unwrap();
//!
//! assert_eq!(result.total_tax, dec!(8341.00));
//! assert_eq!(result.marginal_rate, dec!(0.22));
//! assert_eq!(result.breakdown.len(), 3);
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{min, round_half_up, round_rate};
use crate::error::{ValidationError, ensure_non_negative};
use crate::models::FilingStatus;
use crate::tables::federal_brackets;

/// One slice of income taxed at a single rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketDetail {
    pub rate: Decimal,
    pub bracket_bottom: Decimal,

    /// `None` for the top, unbounded bracket.
    pub bracket_top: Option<Decimal>,
    pub taxable_in_bracket: Decimal,
    pub tax_in_bracket: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketTaxResult {
    pub taxable_income: Decimal,
    pub filing_status: FilingStatus,
    pub total_tax: Decimal,

    /// `total_tax / taxable_income` to six places; zero when income is zero.
    pub effective_rate: Decimal,

    /// Rate of the last bracket income reached.
    pub marginal_rate: Decimal,

    /// Only brackets that taxed a positive slice of income.
    pub breakdown: Vec<BracketDetail>,
}

/// Computes the progressive tax on `taxable_income`.
///
/// # Errors
///
/// Returns [`ValidationError::NegativeAmount`] when `taxable_income` is
/// negative.
pub fn calculate_bracket_tax(
    taxable_income: Decimal,
    filing_status: FilingStatus,
) -> Result<BracketTaxResult, ValidationError> {
    ensure_non_negative("taxable_income", taxable_income)?;

    let brackets = federal_brackets(filing_status);
    let mut total_tax = Decimal::ZERO;
    let mut marginal_rate = brackets[0].rate;
    let mut breakdown = Vec::new();
    let mut prev_top = Decimal::ZERO;

    for bracket in brackets {
        if taxable_income <= prev_top {
            break;
        }

        let slice_top = match bracket.upper_bound {
            Some(upper) => min(taxable_income, upper),
            None => taxable_income,
        };
        let taxable_in_bracket = slice_top - prev_top;
        let tax_in_bracket = round_half_up(taxable_in_bracket * bracket.rate);

        breakdown.push(BracketDetail {
            rate: bracket.rate,
            bracket_bottom: prev_top,
            bracket_top: bracket.upper_bound,
            taxable_in_bracket: round_half_up(taxable_in_bracket),
            tax_in_bracket,
        });
        total_tax += tax_in_bracket;
        marginal_rate = bracket.rate;

        match bracket.upper_bound {
            Some(upper) => prev_top = upper,
            None => break,
        }
    }

    let total_tax = round_half_up(total_tax);
    let effective_rate = round_rate(if taxable_income > Decimal::ZERO {
        total_tax / taxable_income
    } else {
        Decimal::ZERO
    });

    Ok(BracketTaxResult {
        taxable_income: round_half_up(taxable_income),
        filing_status,
        total_tax,
        effective_rate,
        marginal_rate,
        breakdown,
    })
}
