use crate::calculations::{AboveLineDeductions, AgiResult, FicaResult, calculate_agi};
use crate::error::ValidationError;
use crate::models::{IncomeResult, TaxReturnInput};

/// AGI with the SE tax deduction from `fica` injected alongside the
/// adjustments on the return.
pub fn run(
    input: &TaxReturnInput,
    income: &IncomeResult,
    fica: &FicaResult,
) -> Result<AgiResult, ValidationError> {
    let deductions = AboveLineDeductions {
        educator_expenses: input.educator_expenses,
        student_loan_interest: input.student_loan_interest,
        hsa_deduction: input.hsa_deduction,
        ira_deduction: input.ira_deduction,
        se_tax_deduction: fica.se_tax_deduction,
        self_employed_health_insurance: input.self_employed_health_insurance,
        penalty_early_withdrawal: input.penalty_early_withdrawal,
        alimony_paid: input.alimony_paid,
    };

    calculate_agi(income.total_gross_income, deductions)
}
