//! Tax year 2024 tables keyed by filing status.
//!
//! Sources: Rev. Proc. 2023-34 (brackets, standard deduction, §1(h)
//! thresholds), IRC §1411 (NIIT), IRC §3101(b)(2) (additional Medicare),
//! IRC §24 (child tax credit).
//!
//! Every lookup is an exhaustive `match`, so adding a filing status without a
//! table entry fails to compile.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{FilingStatus, TaxBracket};

const SINGLE_BRACKETS: [TaxBracket; 7] = [
    TaxBracket::capped(dec!(11600), dec!(0.10)),
    TaxBracket::capped(dec!(47150), dec!(0.12)),
    TaxBracket::capped(dec!(100525), dec!(0.22)),
    TaxBracket::capped(dec!(191950), dec!(0.24)),
    TaxBracket::capped(dec!(243725), dec!(0.32)),
    TaxBracket::capped(dec!(609350), dec!(0.35)),
    TaxBracket::unbounded(dec!(0.37)),
];

// Married filing jointly and qualifying surviving spouse share Schedule Y-1.
const JOINT_BRACKETS: [TaxBracket; 7] = [
    TaxBracket::capped(dec!(23200), dec!(0.10)),
    TaxBracket::capped(dec!(94300), dec!(0.12)),
    TaxBracket::capped(dec!(201050), dec!(0.22)),
    TaxBracket::capped(dec!(383900), dec!(0.24)),
    TaxBracket::capped(dec!(487450), dec!(0.32)),
    TaxBracket::capped(dec!(731200), dec!(0.35)),
    TaxBracket::unbounded(dec!(0.37)),
];

const SEPARATE_BRACKETS: [TaxBracket; 7] = [
    TaxBracket::capped(dec!(11600), dec!(0.10)),
    TaxBracket::capped(dec!(47150), dec!(0.12)),
    TaxBracket::capped(dec!(100525), dec!(0.22)),
    TaxBracket::capped(dec!(191950), dec!(0.24)),
    TaxBracket::capped(dec!(243725), dec!(0.32)),
    TaxBracket::capped(dec!(365600), dec!(0.35)),
    TaxBracket::unbounded(dec!(0.37)),
];

const HEAD_OF_HOUSEHOLD_BRACKETS: [TaxBracket; 7] = [
    TaxBracket::capped(dec!(16550), dec!(0.10)),
    TaxBracket::capped(dec!(63100), dec!(0.12)),
    TaxBracket::capped(dec!(100500), dec!(0.22)),
    TaxBracket::capped(dec!(191950), dec!(0.24)),
    TaxBracket::capped(dec!(243700), dec!(0.32)),
    TaxBracket::capped(dec!(609350), dec!(0.35)),
    TaxBracket::unbounded(dec!(0.37)),
];

const SINGLE_TIERS: [TaxBracket; 3] = [
    TaxBracket::capped(dec!(47025), dec!(0.00)),
    TaxBracket::capped(dec!(518900), dec!(0.15)),
    TaxBracket::unbounded(dec!(0.20)),
];

const JOINT_TIERS: [TaxBracket; 3] = [
    TaxBracket::capped(dec!(94050), dec!(0.00)),
    TaxBracket::capped(dec!(583750), dec!(0.15)),
    TaxBracket::unbounded(dec!(0.20)),
];

const SEPARATE_TIERS: [TaxBracket; 3] = [
    TaxBracket::capped(dec!(47025), dec!(0.00)),
    TaxBracket::capped(dec!(291850), dec!(0.15)),
    TaxBracket::unbounded(dec!(0.20)),
];

const HEAD_OF_HOUSEHOLD_TIERS: [TaxBracket; 3] = [
    TaxBracket::capped(dec!(63000), dec!(0.00)),
    TaxBracket::capped(dec!(551350), dec!(0.15)),
    TaxBracket::unbounded(dec!(0.20)),
];

/// Ordinary income brackets, ascending by upper bound.
pub fn federal_brackets(status: FilingStatus) -> &'static [TaxBracket] {
    match status {
        FilingStatus::Single => &SINGLE_BRACKETS,
        FilingStatus::MarriedFilingJointly => &JOINT_BRACKETS,
        FilingStatus::MarriedFilingSeparately => &SEPARATE_BRACKETS,
        FilingStatus::HeadOfHousehold => &HEAD_OF_HOUSEHOLD_BRACKETS,
        FilingStatus::QualifyingSurvivingSpouse => &JOINT_BRACKETS,
    }
}

/// The 0% / 15% / 20% tiers for qualified dividends and long-term gains.
/// Bounds are on total taxable income, not on the preferential amount.
pub fn preferential_tiers(status: FilingStatus) -> &'static [TaxBracket] {
    match status {
        FilingStatus::Single => &SINGLE_TIERS,
        FilingStatus::MarriedFilingJointly => &JOINT_TIERS,
        FilingStatus::MarriedFilingSeparately => &SEPARATE_TIERS,
        FilingStatus::HeadOfHousehold => &HEAD_OF_HOUSEHOLD_TIERS,
        FilingStatus::QualifyingSurvivingSpouse => &JOINT_TIERS,
    }
}

pub fn standard_deduction_base(status: FilingStatus) -> Decimal {
    match status {
        FilingStatus::Single => dec!(14600),
        FilingStatus::MarriedFilingJointly => dec!(29200),
        FilingStatus::MarriedFilingSeparately => dec!(14600),
        FilingStatus::HeadOfHousehold => dec!(21900),
        FilingStatus::QualifyingSurvivingSpouse => dec!(29200),
    }
}

pub fn additional_medicare_threshold(status: FilingStatus) -> Decimal {
    match status {
        FilingStatus::Single => dec!(200000),
        FilingStatus::MarriedFilingJointly => dec!(250000),
        FilingStatus::MarriedFilingSeparately => dec!(125000),
        FilingStatus::HeadOfHousehold => dec!(200000),
        FilingStatus::QualifyingSurvivingSpouse => dec!(250000),
    }
}

pub fn niit_threshold(status: FilingStatus) -> Decimal {
    match status {
        FilingStatus::Single => dec!(200000),
        FilingStatus::MarriedFilingJointly => dec!(250000),
        FilingStatus::MarriedFilingSeparately => dec!(125000),
        FilingStatus::HeadOfHousehold => dec!(200000),
        FilingStatus::QualifyingSurvivingSpouse => dec!(250000),
    }
}

pub fn ctc_phaseout_threshold(status: FilingStatus) -> Decimal {
    match status {
        FilingStatus::Single => dec!(200000),
        FilingStatus::MarriedFilingJointly => dec!(400000),
        FilingStatus::MarriedFilingSeparately => dec!(200000),
        FilingStatus::HeadOfHousehold => dec!(200000),
        FilingStatus::QualifyingSurvivingSpouse => dec!(400000),
    }
}
