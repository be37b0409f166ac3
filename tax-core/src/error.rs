//! Validation errors raised before (or at the entry of) any calculation stage.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

/// Largest magnitude accepted for any dollar amount. Keeps every sum and
/// product in the pipeline well inside `Decimal`'s range.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000000);

/// Reasons an input cannot be calculated.
///
/// Every calculator and workflow returns this type; once an input has passed
/// [`crate::TaxReturnInput::validate`] the pipeline itself never produces one.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A field that must be non-negative received a negative value.
    #[error("{field} must be >= 0, got {value}")]
    NegativeAmount { field: String, value: Decimal },

    /// An amount's magnitude exceeds [`MAX_AMOUNT`].
    #[error("{field} must be at most {max} in magnitude, got {value}", max = MAX_AMOUNT)]
    AmountTooLarge { field: String, value: Decimal },

    /// A 1099-DIV record reports more qualified than ordinary dividends.
    #[error(
        "income_1099_div[{record}]: qualified dividends {qualified} exceed ordinary dividends {ordinary}"
    )]
    QualifiedExceedsOrdinary {
        record: usize,
        qualified: Decimal,
        ordinary: Decimal,
    },

    /// The filing status is not one of the five recognized variants.
    #[error("unrecognized filing status '{0}'")]
    UnrecognizedFilingStatus(String),

    /// A calculator parameter (rate, wage base) is outside its valid range.
    #[error("{name} is out of range, got {value}")]
    InvalidParameter { name: &'static str, value: Decimal },

    /// The input document could not be deserialized.
    #[error("malformed input: {0}")]
    Malformed(String),
}

impl ValidationError {
    pub(crate) fn negative(
        field: impl Into<String>,
        value: Decimal,
    ) -> Self {
        Self::NegativeAmount {
            field: field.into(),
            value,
        }
    }
}

/// Fails with [`ValidationError::NegativeAmount`] when `value` is below zero.
pub(crate) fn ensure_non_negative(
    field: &str,
    value: Decimal,
) -> Result<(), ValidationError> {
    if value < Decimal::ZERO {
        return Err(ValidationError::negative(field, value));
    }
    Ok(())
}

/// [`ensure_non_negative`] plus the [`MAX_AMOUNT`] bound. Applied to amounts
/// entering the pipeline; intermediate totals may exceed the bound.
pub(crate) fn ensure_amount(
    field: &str,
    value: Decimal,
) -> Result<(), ValidationError> {
    ensure_non_negative(field, value)?;
    ensure_within_limit(field, value)
}

/// Bounds a signed amount such as a capital gain or loss.
pub(crate) fn ensure_within_limit(
    field: &str,
    value: Decimal,
) -> Result<(), ValidationError> {
    if value.abs() > MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}
