use crate::calculations::{FicaCalculator, FicaResult};
use crate::error::ValidationError;
use crate::models::{IncomeResult, TaxReturnInput};

/// FICA on total W-2 wages and 1099-NEC compensation.
pub fn run(
    input: &TaxReturnInput,
    income: &IncomeResult,
) -> Result<FicaResult, ValidationError> {
    FicaCalculator::default().calculate(
        income.wages,
        income.self_employment_income,
        input.filing_status,
    )
}
