use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{max, round_half_up};
use crate::error::{ValidationError, ensure_non_negative};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditApplication {
    pub tax_before: Decimal,
    pub credit_applied: Decimal,
    pub tax_after: Decimal,
}

/// Applies `credit` against `tax`.
///
/// A non-refundable credit cannot take the tax below zero, so only
/// `min(credit, tax)` is applied. A refundable credit is applied in full and
/// may leave a negative balance.
///
/// # Errors
///
/// Fails when `credit` is negative.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::apply_credit;
///
/// let capped = apply_credit(dec!(1000), dec!(4000), false).unwrap();
/// assert_eq!(capped.credit_applied, dec!(1000.00));
/// assert_eq!(capped.tax_after, dec!(0));
///
/// let refundable = apply_credit(dec!(0), dec!(1700), true).unwrap();
/// assert_eq!(refundable.tax_after, dec!(-1700.00));
/// ```
pub fn apply_credit(
    tax: Decimal,
    credit: Decimal,
    refundable: bool,
) -> Result<CreditApplication, ValidationError> {
    ensure_non_negative("credit", credit)?;

    let mut tax_after = tax - credit;
    if !refundable {
        tax_after = max(tax_after, Decimal::ZERO);
    }
    let tax_after = round_half_up(tax_after);

    Ok(CreditApplication {
        tax_before: tax,
        credit_applied: round_half_up(tax - tax_after),
        tax_after,
    })
}
