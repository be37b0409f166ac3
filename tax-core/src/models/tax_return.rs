//! The input side of a calculation: one tax return's income-source records,
//! deductions, credit inputs and payments.
//!
//! Every amount is a [`Decimal`] carried over JSON as a base-10 string; a JSON
//! number is rejected at deserialization so no value ever passes through
//! binary floating point.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ensure_amount, ensure_within_limit};
use crate::models::FilingStatus;

/// Form W-2.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct W2Income {
    /// Box 1: wages, tips, other compensation.
    #[serde(default, with = "rust_decimal::serde::str")]
    pub wages: Decimal,

    /// Box 2: federal income tax withheld.
    #[serde(default, with = "rust_decimal::serde::str")]
    pub federal_withholding: Decimal,
}

/// Form 1099-NEC.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Income1099Nec {
    /// Box 1: nonemployee compensation.
    #[serde(default, with = "rust_decimal::serde::str")]
    pub compensation: Decimal,
}

/// Form 1099-INT.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Income1099Int {
    #[serde(default, with = "rust_decimal::serde::str")]
    pub interest: Decimal,
}

/// Form 1099-DIV. Qualified dividends are a subset of ordinary dividends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Income1099Div {
    /// Box 1a.
    #[serde(default, with = "rust_decimal::serde::str")]
    pub ordinary_dividends: Decimal,

    /// Box 1b.
    #[serde(default, with = "rust_decimal::serde::str")]
    pub qualified_dividends: Decimal,
}

/// Form 1099-B, netted per holding period. Either figure may be a loss.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Income1099B {
    #[serde(default, with = "rust_decimal::serde::str")]
    pub short_term_gains: Decimal,

    #[serde(default, with = "rust_decimal::serde::str")]
    pub long_term_gains: Decimal,
}

/// Schedule A.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemizedDeductions {
    /// Medical and dental expenses before the AGI floor.
    #[serde(default, with = "rust_decimal::serde::str")]
    pub medical: Decimal,

    /// State and local taxes before the SALT cap.
    #[serde(default, with = "rust_decimal::serde::str")]
    pub state_and_local_taxes: Decimal,

    #[serde(default, with = "rust_decimal::serde::str")]
    pub mortgage_interest: Decimal,

    #[serde(default, with = "rust_decimal::serde::str")]
    pub charitable: Decimal,

    #[serde(default, with = "rust_decimal::serde::str")]
    pub casualty: Decimal,

    #[serde(default, with = "rust_decimal::serde::str")]
    pub other: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxCredits {
    #[serde(default)]
    pub num_qualifying_children: u32,
}

/// One tax return: the single input of the calculation pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxReturnInput {
    pub filing_status: FilingStatus,

    #[serde(default)]
    pub is_over_65: bool,

    #[serde(default)]
    pub is_blind: bool,

    #[serde(default)]
    pub w2s: Vec<W2Income>,

    #[serde(default)]
    pub income_1099_nec: Vec<Income1099Nec>,

    #[serde(default)]
    pub income_1099_int: Vec<Income1099Int>,

    #[serde(default)]
    pub income_1099_div: Vec<Income1099Div>,

    #[serde(default)]
    pub income_1099_b: Vec<Income1099B>,

    #[serde(default)]
    pub itemized_deductions: Option<ItemizedDeductions>,

    #[serde(default)]
    pub force_standard_deduction: bool,

    // Above-the-line deductions; the SE tax deduction is derived, not supplied.
    #[serde(default, with = "rust_decimal::serde::str")]
    pub hsa_deduction: Decimal,

    #[serde(default, with = "rust_decimal::serde::str")]
    pub student_loan_interest: Decimal,

    #[serde(default, with = "rust_decimal::serde::str")]
    pub educator_expenses: Decimal,

    #[serde(default, with = "rust_decimal::serde::str")]
    pub ira_deduction: Decimal,

    #[serde(default, with = "rust_decimal::serde::str")]
    pub self_employed_health_insurance: Decimal,

    #[serde(default, with = "rust_decimal::serde::str")]
    pub penalty_early_withdrawal: Decimal,

    #[serde(default, with = "rust_decimal::serde::str")]
    pub alimony_paid: Decimal,

    #[serde(default)]
    pub credits: TaxCredits,

    #[serde(default, with = "rust_decimal::serde::str")]
    pub estimated_payments: Decimal,
}

impl TaxReturnInput {
    /// An empty return for `filing_status`: no income, no deductions, no payments.
    pub fn new(filing_status: FilingStatus) -> Self {
        Self {
            filing_status,
            is_over_65: false,
            is_blind: false,
            w2s: Vec::new(),
            income_1099_nec: Vec::new(),
            income_1099_int: Vec::new(),
            income_1099_div: Vec::new(),
            income_1099_b: Vec::new(),
            itemized_deductions: None,
            force_standard_deduction: false,
            hsa_deduction: Decimal::ZERO,
            student_loan_interest: Decimal::ZERO,
            educator_expenses: Decimal::ZERO,
            ira_deduction: Decimal::ZERO,
            self_employed_health_insurance: Decimal::ZERO,
            penalty_early_withdrawal: Decimal::ZERO,
            alimony_paid: Decimal::ZERO,
            credits: TaxCredits::default(),
            estimated_payments: Decimal::ZERO,
        }
    }

    /// Deserializes a return from JSON and validates it.
    ///
    /// # Errors
    ///
    /// * [`ValidationError::UnrecognizedFilingStatus`] for an unknown status.
    /// * [`ValidationError::Malformed`] for any other deserialization failure,
    ///   including decimals supplied as JSON numbers.
    /// * Any error [`TaxReturnInput::validate`] reports.
    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        let input: TaxReturnInput = serde_json::from_str(json).map_err(|e| {
            let message = e.to_string();
            match unrecognized_status(&message) {
                Some(status) => ValidationError::UnrecognizedFilingStatus(status),
                None => ValidationError::Malformed(message),
            }
        })?;
        input.validate()?;
        Ok(input)
    }

    /// Checks every non-negative field, the magnitude of every amount and
    /// the per-record dividend invariant.
    ///
    /// Capital gains on 1099-B records are the only amounts allowed to be
    /// negative.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (i, w2) in self.w2s.iter().enumerate() {
            ensure_amount(&format!("w2s[{i}].wages"), w2.wages)?;
            ensure_amount(
                &format!("w2s[{i}].federal_withholding"),
                w2.federal_withholding,
            )?;
        }
        for (i, nec) in self.income_1099_nec.iter().enumerate() {
            ensure_amount(
                &format!("income_1099_nec[{i}].compensation"),
                nec.compensation,
            )?;
        }
        for (i, form) in self.income_1099_int.iter().enumerate() {
            ensure_amount(&format!("income_1099_int[{i}].interest"), form.interest)?;
        }
        for (i, form) in self.income_1099_div.iter().enumerate() {
            ensure_amount(
                &format!("income_1099_div[{i}].ordinary_dividends"),
                form.ordinary_dividends,
            )?;
            ensure_amount(
                &format!("income_1099_div[{i}].qualified_dividends"),
                form.qualified_dividends,
            )?;
            if form.qualified_dividends > form.ordinary_dividends {
                return Err(ValidationError::QualifiedExceedsOrdinary {
                    record: i,
                    qualified: form.qualified_dividends,
                    ordinary: form.ordinary_dividends,
                });
            }
        }
        for (i, form) in self.income_1099_b.iter().enumerate() {
            ensure_within_limit(
                &format!("income_1099_b[{i}].short_term_gains"),
                form.short_term_gains,
            )?;
            ensure_within_limit(
                &format!("income_1099_b[{i}].long_term_gains"),
                form.long_term_gains,
            )?;
        }
        if let Some(item) = &self.itemized_deductions {
            let fields = [
                ("itemized_deductions.medical", item.medical),
                (
                    "itemized_deductions.state_and_local_taxes",
                    item.state_and_local_taxes,
                ),
                (
                    "itemized_deductions.mortgage_interest",
                    item.mortgage_interest,
                ),
                ("itemized_deductions.charitable", item.charitable),
                ("itemized_deductions.casualty", item.casualty),
                ("itemized_deductions.other", item.other),
            ];
            for (field, value) in fields {
                ensure_amount(field, value)?;
            }
        }

        let fields = [
            ("hsa_deduction", self.hsa_deduction),
            ("student_loan_interest", self.student_loan_interest),
            ("educator_expenses", self.educator_expenses),
            ("ira_deduction", self.ira_deduction),
            (
                "self_employed_health_insurance",
                self.self_employed_health_insurance,
            ),
            ("penalty_early_withdrawal", self.penalty_early_withdrawal),
            ("alimony_paid", self.alimony_paid),
            ("estimated_payments", self.estimated_payments),
        ];
        for (field, value) in fields {
            ensure_amount(field, value)?;
        }

        Ok(())
    }

    /// Sum of Box 2 withholding across all W-2s.
    pub fn total_withholding(&self) -> Decimal {
        self.w2s.iter().map(|w2| w2.federal_withholding).sum()
    }
}

// serde reports try_from failures as a plain message; recover the status so
// callers can match on the variant instead of a string.
fn unrecognized_status(message: &str) -> Option<String> {
    let rest = message.strip_prefix("unrecognized filing status '")?;
    let end = rest.find('\'')?;
    Some(rest[..end].to_string())
}
