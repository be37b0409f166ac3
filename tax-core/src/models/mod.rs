mod calculation_record;
mod filing_status;
mod tax_bracket;
mod tax_return;
mod tax_year_config;
mod workflow_results;

pub use calculation_record::{CalculationSummary, StoredCalculation};
pub use filing_status::FilingStatus;
pub use tax_bracket::TaxBracket;
pub use tax_return::{
    Income1099B, Income1099Div, Income1099Int, Income1099Nec, ItemizedDeductions, TaxCredits,
    TaxReturnInput, W2Income,
};
pub use tax_year_config::TaxYearConfig;
pub use workflow_results::{
    CreditsResult, DeductionResult, FullTaxCalculationResult, IncomeResult, TaxComputationResult,
    TaxSummary,
};
