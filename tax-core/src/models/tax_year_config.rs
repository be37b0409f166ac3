use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Scalar parameters for one tax year. Filing-status keyed amounts live in
/// [`crate::tables`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearConfig {
    pub tax_year: i32,

    // FICA / self-employment
    pub ss_wage_base: Decimal,
    pub ss_employee_rate: Decimal,
    pub medicare_employee_rate: Decimal,
    pub se_ss_rate: Decimal,
    pub se_medicare_rate: Decimal,
    pub se_net_earnings_factor: Decimal,
    pub se_deduction_factor: Decimal,
    pub additional_medicare_rate: Decimal,

    // Net investment income tax
    pub niit_rate: Decimal,

    // Standard deduction additions, per condition (age 65+, blindness)
    pub additional_deduction_single_hoh: Decimal,
    pub additional_deduction_married: Decimal,

    // Itemized deductions
    pub salt_cap: Decimal,
    pub salt_cap_mfs: Decimal,
    pub medical_agi_floor_rate: Decimal,

    // Child tax credit
    pub ctc_per_child: Decimal,
    pub ctc_refundable_per_child: Decimal,
    pub ctc_phaseout_step: Decimal,
    pub ctc_phaseout_per_step: Decimal,
}

impl TaxYearConfig {
    /// Rev. Proc. 2023-34 and the 2024 SSA wage base.
    pub const YEAR_2024: TaxYearConfig = TaxYearConfig {
        tax_year: 2024,
        ss_wage_base: dec!(168600),
        ss_employee_rate: dec!(0.062),
        medicare_employee_rate: dec!(0.0145),
        se_ss_rate: dec!(0.124),
        se_medicare_rate: dec!(0.029),
        se_net_earnings_factor: dec!(0.9235),
        se_deduction_factor: dec!(0.5),
        additional_medicare_rate: dec!(0.009),
        niit_rate: dec!(0.038),
        additional_deduction_single_hoh: dec!(1950),
        additional_deduction_married: dec!(1550),
        salt_cap: dec!(10000),
        salt_cap_mfs: dec!(5000),
        medical_agi_floor_rate: dec!(0.075),
        ctc_per_child: dec!(2000),
        ctc_refundable_per_child: dec!(1700),
        ctc_phaseout_step: dec!(1000),
        ctc_phaseout_per_step: dec!(50),
    };
}
