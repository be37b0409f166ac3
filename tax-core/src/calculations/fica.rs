//! Social Security, Medicare and self-employment tax.
//!
//! # Rules
//!
//! | Step | Amount |
//! |------|--------|
//! | W-2 Social Security | `min(wages, wage base) × 6.2%` |
//! | W-2 Medicare | `wages × 1.45%`, uncapped |
//! | SE base | `SE income × 92.35%` |
//! | SE Social Security | `min(SE base, max(wage base − wages, 0)) × 12.4%` |
//! | SE Medicare | `SE base × 2.9%`, uncapped |
//! | Additional Medicare | `max(wages + SE base − threshold, 0) × 0.9%` |
//! | SE deduction | `SE tax × 50%` |
//!
//! The Social Security wage base is shared: wages consume it first and only
//! what is left is available to self-employment earnings.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::{FilingStatus, TaxYearConfig};
//! use tax_core::calculations::{FicaCalculator, FicaConfig};
//!
//! let calculator = FicaCalculator::new(FicaConfig::from_tax_year_config(&TaxYearConfig::YEAR_2024));
//! let result = calculator
//!     .calculate(dec!(50000.00), dec!(100000.00), FilingStatus::Single)
//!     .unwrap();
//!
//! assert_eq!(result.se_net_earnings, dec!(92350.00));
//! assert_eq!(result.self_employment_tax, dec!(14129.55));
//! assert_eq!(result.se_tax_deduction, dec!(7064.78));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::TaxYearConfig;
use crate::calculations::common::{max, min, round_half_up};
use crate::error::{ValidationError, ensure_non_negative};
use crate::models::FilingStatus;
use crate::tables::additional_medicare_threshold;

/// Rates and limits for the FICA calculation.
///
/// Usually derived from a [`TaxYearConfig`]; the additional Medicare threshold
/// depends on filing status and comes from [`crate::tables`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FicaConfig {
    /// Maximum earnings subject to Social Security tax. $168,600 for 2024.
    pub ss_wage_base: Decimal,

    /// Employee share of Social Security on wages, 6.2%.
    pub ss_employee_rate: Decimal,

    /// Employee share of Medicare on wages, 1.45%.
    pub medicare_employee_rate: Decimal,

    /// Combined employer and employee Social Security rate on SE earnings, 12.4%.
    pub se_ss_rate: Decimal,

    /// Combined employer and employee Medicare rate on SE earnings, 2.9%.
    pub se_medicare_rate: Decimal,

    /// Portion of SE income subject to SE tax, 92.35%.
    pub net_earnings_factor: Decimal,

    /// Deductible portion of SE tax, 50%.
    pub deduction_factor: Decimal,

    pub additional_medicare_rate: Decimal,
}

impl FicaConfig {
    pub fn from_tax_year_config(config: &TaxYearConfig) -> Self {
        Self {
            ss_wage_base: config.ss_wage_base,
            ss_employee_rate: config.ss_employee_rate,
            medicare_employee_rate: config.medicare_employee_rate,
            se_ss_rate: config.se_ss_rate,
            se_medicare_rate: config.se_medicare_rate,
            net_earnings_factor: config.se_net_earnings_factor,
            deduction_factor: config.se_deduction_factor,
            additional_medicare_rate: config.additional_medicare_rate,
        }
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidParameter`] if:
    /// - `net_earnings_factor` is not in (0, 1]
    /// - any rate or the deduction factor is not in [0, 1]
    /// - `ss_wage_base` is not positive
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use tax_core::{TaxYearConfig, ValidationError};
    /// use tax_core::calculations::FicaConfig;
    ///
    /// let config = FicaConfig {
    ///     ss_wage_base: dec!(-1000.00),
    ///     ..FicaConfig::from_tax_year_config(&TaxYearConfig::YEAR_2024)
    /// };
    ///
    /// assert_eq!(
    ///     config.validate(),
    ///     Err(ValidationError::InvalidParameter { name: "ss_wage_base", value: dec!(-1000.00) })
    /// );
    /// ```
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.net_earnings_factor <= Decimal::ZERO || self.net_earnings_factor > Decimal::ONE {
            return Err(ValidationError::InvalidParameter {
                name: "net_earnings_factor",
                value: self.net_earnings_factor,
            });
        }

        let fractions = [
            ("ss_employee_rate", self.ss_employee_rate),
            ("medicare_employee_rate", self.medicare_employee_rate),
            ("se_ss_rate", self.se_ss_rate),
            ("se_medicare_rate", self.se_medicare_rate),
            ("deduction_factor", self.deduction_factor),
            ("additional_medicare_rate", self.additional_medicare_rate),
        ];
        for (name, value) in fractions {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(ValidationError::InvalidParameter { name, value });
            }
        }

        if self.ss_wage_base <= Decimal::ZERO {
            return Err(ValidationError::InvalidParameter {
                name: "ss_wage_base",
                value: self.ss_wage_base,
            });
        }
        Ok(())
    }
}

impl Default for FicaConfig {
    fn default() -> Self {
        Self::from_tax_year_config(&TaxYearConfig::YEAR_2024)
    }
}

/// Payroll and self-employment tax owed on one return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FicaResult {
    /// W-2 and SE Social Security combined.
    pub ss_tax: Decimal,

    /// W-2 and SE Medicare combined, excluding the additional 0.9%.
    pub medicare_tax: Decimal,
    pub additional_medicare_tax: Decimal,

    /// SE income × net earnings factor; zero without SE income.
    pub se_net_earnings: Decimal,
    pub se_social_security_tax: Decimal,
    pub se_medicare_tax: Decimal,
    pub self_employment_tax: Decimal,

    /// Above-the-line deduction consumed by the AGI stage.
    pub se_tax_deduction: Decimal,

    /// W-2 Social Security + W-2 Medicare + SE tax + additional Medicare.
    pub total_fica: Decimal,
}

#[derive(Debug, Clone, Default)]
pub struct FicaCalculator {
    config: FicaConfig,
}

impl FicaCalculator {
    pub fn new(config: FicaConfig) -> Self {
        Self { config }
    }

    /// Computes FICA on W-2 wages and net self-employment income.
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid or either amount is negative.
    pub fn calculate(
        &self,
        wages: Decimal,
        se_income: Decimal,
        filing_status: FilingStatus,
    ) -> Result<FicaResult, ValidationError> {
        self.config.validate()?;
        ensure_non_negative("wages", wages)?;
        ensure_non_negative("self_employment_income", se_income)?;

        let w2_ss_tax = self.wage_social_security_tax(wages);
        let w2_medicare_tax = round_half_up(wages * self.config.medicare_employee_rate);

        let (se_net_earnings, se_ss_tax, se_medicare_tax) = if se_income > Decimal::ZERO {
            let base = round_half_up(se_income * self.config.net_earnings_factor);
            let ss_room = self.remaining_ss_wage_base(wages);
            (
                base,
                round_half_up(min(base, ss_room) * self.config.se_ss_rate),
                round_half_up(base * self.config.se_medicare_rate),
            )
        } else {
            (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO)
        };
        let self_employment_tax = round_half_up(se_ss_tax + se_medicare_tax);

        let additional_medicare_tax =
            self.additional_medicare_tax(wages + se_net_earnings, filing_status);
        let se_tax_deduction = round_half_up(self_employment_tax * self.config.deduction_factor);

        let total_fica = round_half_up(
            w2_ss_tax + w2_medicare_tax + self_employment_tax + additional_medicare_tax,
        );

        debug!(
            %wages,
            %se_income,
            %self_employment_tax,
            %additional_medicare_tax,
            %total_fica,
            "FICA calculated"
        );

        Ok(FicaResult {
            ss_tax: round_half_up(w2_ss_tax + se_ss_tax),
            medicare_tax: round_half_up(w2_medicare_tax + se_medicare_tax),
            additional_medicare_tax,
            se_net_earnings: round_half_up(se_net_earnings),
            se_social_security_tax: round_half_up(se_ss_tax),
            se_medicare_tax: round_half_up(se_medicare_tax),
            self_employment_tax,
            se_tax_deduction,
            total_fica,
        })
    }

    fn wage_social_security_tax(
        &self,
        wages: Decimal,
    ) -> Decimal {
        round_half_up(min(wages, self.config.ss_wage_base) * self.config.ss_employee_rate)
    }

    /// Wage base left for SE earnings after wages.
    fn remaining_ss_wage_base(
        &self,
        wages: Decimal,
    ) -> Decimal {
        let remaining = self.config.ss_wage_base - wages;

        if remaining <= Decimal::ZERO {
            warn!(
                ss_wage_base = %self.config.ss_wage_base,
                wages = %wages,
                "Wages meet the SS wage base; no SS tax on SE income"
            );
            return Decimal::ZERO;
        }

        remaining
    }

    /// 0.9% on combined Medicare earnings above the filing-status threshold.
    fn additional_medicare_tax(
        &self,
        medicare_earnings: Decimal,
        filing_status: FilingStatus,
    ) -> Decimal {
        let threshold = additional_medicare_threshold(filing_status);
        let excess = max(medicare_earnings - threshold, Decimal::ZERO);
        round_half_up(excess * self.config.additional_medicare_rate)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tracing_subscriber::fmt::format::FmtSpan;

    use super::*;

    fn calculator() -> FicaCalculator {
        FicaCalculator::new(FicaConfig::default())
    }

    /// Initializes tracing subscriber for tests that verify log output.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_span_events(FmtSpan::NONE)
            .with_test_writer()
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    // =========================================================================
    // FicaConfig::validate tests
    // =========================================================================

    #[test]
    fn validate_accepts_2024_config() {
        assert_eq!(FicaConfig::default().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_zero_net_earnings_factor() {
        let config = FicaConfig {
            net_earnings_factor: dec!(0.00),
            ..FicaConfig::default()
        };

        let result = config.validate();

        assert_eq!(
            result,
            Err(ValidationError::InvalidParameter {
                name: "net_earnings_factor",
                value: dec!(0.00),
            })
        );
    }

    #[test]
    fn validate_rejects_rate_above_one() {
        let config = FicaConfig {
            se_medicare_rate: dec!(1.5),
            ..FicaConfig::default()
        };

        let result = config.validate();

        assert_eq!(
            result,
            Err(ValidationError::InvalidParameter {
                name: "se_medicare_rate",
                value: dec!(1.5),
            })
        );
    }

    #[test]
    fn calculate_fails_on_invalid_config() {
        let calculator = FicaCalculator::new(FicaConfig {
            ss_wage_base: dec!(0),
            ..FicaConfig::default()
        });

        let result = calculator.calculate(dec!(1000), dec!(0), FilingStatus::Single);

        assert!(matches!(
            result,
            Err(ValidationError::InvalidParameter { name: "ss_wage_base", .. })
        ));
    }

    // =========================================================================
    // calculate tests
    // =========================================================================

    #[test]
    fn wages_only() {
        let result = calculator()
            .calculate(dec!(50000), dec!(0), FilingStatus::Single)
            .unwrap();

        assert_eq!(
            result,
            FicaResult {
                ss_tax: dec!(3100.00),
                medicare_tax: dec!(725.00),
                additional_medicare_tax: dec!(0.00),
                se_net_earnings: dec!(0),
                se_social_security_tax: dec!(0),
                se_medicare_tax: dec!(0),
                self_employment_tax: dec!(0),
                se_tax_deduction: dec!(0),
                total_fica: dec!(3825.00),
            }
        );
    }

    #[test]
    fn social_security_stops_at_wage_base() {
        let result = calculator()
            .calculate(dec!(250000), dec!(0), FilingStatus::Single)
            .unwrap();

        assert_eq!(result.ss_tax, dec!(10453.20));
        assert_eq!(result.medicare_tax, dec!(3625.00));
        assert_eq!(result.additional_medicare_tax, dec!(450.00));
        assert_eq!(result.total_fica, dec!(14528.20));
    }

    #[test]
    fn self_employment_with_wages() {
        let result = calculator()
            .calculate(dec!(50000), dec!(100000), FilingStatus::Single)
            .unwrap();

        assert_eq!(result.se_net_earnings, dec!(92350.00));
        assert_eq!(result.se_social_security_tax, dec!(11451.40));
        assert_eq!(result.se_medicare_tax, dec!(2678.15));
        assert_eq!(result.self_employment_tax, dec!(14129.55));
        assert_eq!(result.se_tax_deduction, dec!(7064.78));
        assert_eq!(result.ss_tax, dec!(14551.40));
        assert_eq!(result.medicare_tax, dec!(3403.15));
        assert_eq!(result.total_fica, dec!(17954.55));
    }

    #[test]
    fn wages_at_wage_base_leave_no_se_social_security() {
        let _guard = init_test_tracing();

        let result = calculator()
            .calculate(dec!(200000), dec!(50000), FilingStatus::Single)
            .unwrap();

        assert_eq!(result.se_social_security_tax, dec!(0));
        assert_eq!(result.se_medicare_tax, dec!(1339.08));
        // (200000 + 46175 - 200000) × 0.9%
        assert_eq!(result.additional_medicare_tax, dec!(415.58));
    }

    #[test]
    fn additional_medicare_threshold_follows_filing_status() {
        let single = calculator()
            .calculate(dec!(230000), dec!(0), FilingStatus::Single)
            .unwrap();
        let joint = calculator()
            .calculate(dec!(230000), dec!(0), FilingStatus::MarriedFilingJointly)
            .unwrap();
        let separate = calculator()
            .calculate(dec!(230000), dec!(0), FilingStatus::MarriedFilingSeparately)
            .unwrap();

        assert_eq!(single.additional_medicare_tax, dec!(270.00));
        assert_eq!(joint.additional_medicare_tax, dec!(0.00));
        assert_eq!(separate.additional_medicare_tax, dec!(945.00));
    }

    #[test]
    fn small_se_income_is_still_taxed() {
        let result = calculator()
            .calculate(dec!(0), dec!(300), FilingStatus::Single)
            .unwrap();

        assert_eq!(result.se_net_earnings, dec!(277.05));
        assert_eq!(result.self_employment_tax, dec!(42.38));
    }

    #[test]
    fn negative_inputs_are_rejected() {
        let wages = calculator().calculate(dec!(-1), dec!(0), FilingStatus::Single);
        let se = calculator().calculate(dec!(0), dec!(-1), FilingStatus::Single);

        assert_eq!(wages, Err(ValidationError::negative("wages", dec!(-1))));
        assert_eq!(
            se,
            Err(ValidationError::negative("self_employment_income", dec!(-1)))
        );
    }
}
