//! Outputs of the pipeline stages, in pipeline order.
//!
//! Each value is produced once by its workflow and never mutated afterwards.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::{AgiResult, FicaResult};
use crate::models::FilingStatus;

/// Canonical income totals aggregated from the source records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeResult {
    pub wages: Decimal,
    pub self_employment_income: Decimal,
    pub interest_income: Decimal,
    pub ordinary_dividends: Decimal,
    pub qualified_dividends: Decimal,
    pub short_term_gains: Decimal,
    pub long_term_gains: Decimal,
    pub total_gross_income: Decimal,

    /// Interest + ordinary dividends + net gains floored at zero.
    pub net_investment_income: Decimal,
}

/// Deduction choice and the ordinary/preferential split of taxable income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionResult {
    pub standard_deduction_amount: Decimal,
    pub itemized_total: Decimal,
    pub used_standard: bool,
    pub deduction_amount: Decimal,
    pub taxable_income: Decimal,
    pub ordinary_taxable_income: Decimal,
    pub preferential_qualified_dividends: Decimal,
    pub preferential_long_term_gains: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxComputationResult {
    pub ordinary_tax: Decimal,
    pub qualified_dividend_tax: Decimal,
    pub capital_gains_tax: Decimal,
    pub niit: Decimal,

    /// Exactly the sum of the four components.
    pub total_income_tax: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditsResult {
    /// Child tax credit after phaseout, before the refundable split.
    pub child_tax_credit: Decimal,
    pub nonrefundable_ctc_applied: Decimal,
    pub refundable_ctc_applied: Decimal,
    pub total_credits_applied: Decimal,

    /// Negative only when the refundable portion exceeds the liability.
    pub tax_after_credits: Decimal,
}

/// The bottom line of a return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSummary {
    pub filing_status: FilingStatus,
    pub total_income: Decimal,
    pub agi: Decimal,
    pub deduction_amount: Decimal,
    pub taxable_income: Decimal,

    pub ordinary_tax: Decimal,
    pub qualified_dividend_tax: Decimal,
    pub capital_gains_tax: Decimal,
    pub niit: Decimal,
    pub total_income_tax_before_credits: Decimal,
    pub total_credits: Decimal,
    pub income_tax_after_credits: Decimal,
    pub total_fica: Decimal,

    /// Income tax after credits plus FICA.
    pub total_tax: Decimal,

    /// `total_tax / total_income`, six decimal places.
    pub effective_rate: Decimal,

    /// Rate of the highest ordinary bracket reached by taxable income.
    pub marginal_rate: Decimal,

    pub total_withholding: Decimal,
    pub estimated_payments: Decimal,
    pub total_payments: Decimal,

    /// Negative is a refund, positive is owed. FICA is not offset.
    pub refund_or_owed: Decimal,
}

/// Every stage output of one calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullTaxCalculationResult {
    pub income: IncomeResult,
    pub fica: FicaResult,
    pub agi: AgiResult,
    pub deductions: DeductionResult,
    pub tax_computation: TaxComputationResult,
    pub credits: CreditsResult,
    pub summary: TaxSummary,
}

impl FullTaxCalculationResult {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
