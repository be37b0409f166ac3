//! Net investment income tax (IRC §1411).
//!
//! 3.8% of the lesser of net investment income and the amount by which
//! modified AGI exceeds the filing-status threshold. MAGI is taken to be AGI.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::TaxYearConfig;
use crate::calculations::common::{max, min, round_half_up};
use crate::error::{ValidationError, ensure_non_negative};
use crate::models::FilingStatus;
use crate::tables::niit_threshold;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NiitResult {
    pub magi: Decimal,
    pub threshold: Decimal,
    pub excess_magi: Decimal,
    pub net_investment_income: Decimal,
    pub niit: Decimal,
}

/// # Errors
///
/// Fails when `magi` or `net_investment_income` is negative.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::FilingStatus;
/// use tax_core::calculations::calculate_niit;
///
/// let result = calculate_niit(dec!(250000), dec!(30000), FilingStatus::Single).unwrap();
///
/// assert_eq!(result.excess_magi, dec!(50000));
/// assert_eq!(result.niit, dec!(1140.00));
/// ```
pub fn calculate_niit(
    magi: Decimal,
    net_investment_income: Decimal,
    filing_status: FilingStatus,
) -> Result<NiitResult, ValidationError> {
    ensure_non_negative("magi", magi)?;
    ensure_non_negative("net_investment_income", net_investment_income)?;

    let threshold = niit_threshold(filing_status);
    let excess_magi = max(magi - threshold, Decimal::ZERO);
    let niit = round_half_up(
        min(net_investment_income, excess_magi) * TaxYearConfig::YEAR_2024.niit_rate,
    );

    debug!(%magi, %threshold, %net_investment_income, %niit, "NIIT calculated");

    Ok(NiitResult {
        magi,
        threshold,
        excess_magi,
        net_investment_income,
        niit,
    })
}
