//! Single-purpose tax calculators.
//!
//! Each calculator is a pure function of its arguments and the 2024 tables.
//! The workflows in [`crate::workflows`] compose them into the full pipeline.

pub mod agi;
pub mod bracket_tax;
pub mod common;
pub mod credit;
pub mod fica;
pub mod niit;
pub mod preferential_rate;
pub mod standard_deduction;

pub use agi::{AboveLineDeductions, AgiResult, calculate_agi};
pub use bracket_tax::{BracketDetail, BracketTaxResult, calculate_bracket_tax};
pub use credit::{CreditApplication, apply_credit};
pub use fica::{FicaCalculator, FicaConfig, FicaResult};
pub use niit::{NiitResult, calculate_niit};
pub use preferential_rate::{
    CapitalGainsTaxResult, PreferentialRateDetail, QualifiedDividendTaxResult, capital_gains_tax,
    compute_preferential_tax, qualified_dividend_tax,
};
pub use standard_deduction::{StandardDeductionResult, standard_deduction};
