//! The boundary between the pure pipeline and storage.

use std::sync::Arc;

use tracing::{info, warn};

use crate::db::CalculationRepository;
use crate::error::ValidationError;
use crate::models::{FullTaxCalculationResult, TaxReturnInput};
use crate::workflows::calculate_full_tax;

/// Runs calculations and records each successful one in an optional
/// repository.
#[derive(Clone, Default)]
pub struct TaxCalculator {
    repository: Option<Arc<dyn CalculationRepository>>,
}

impl TaxCalculator {
    /// A calculator that stores nothing.
    pub fn new() -> Self {
        Self { repository: None }
    }

    pub fn with_repository(repository: Arc<dyn CalculationRepository>) -> Self {
        Self {
            repository: Some(repository),
        }
    }

    /// Whether results are recorded anywhere.
    pub fn saves_results(&self) -> bool {
        self.repository.is_some()
    }

    /// Calculates `input` and, when a repository is attached, saves the
    /// result once.
    ///
    /// A storage failure is logged and otherwise ignored: the returned
    /// result is the same whether or not it was saved.
    ///
    /// # Errors
    ///
    /// Only validation errors from the input.
    pub async fn calculate(
        &self,
        input: &TaxReturnInput,
    ) -> Result<FullTaxCalculationResult, ValidationError> {
        let result = calculate_full_tax(input)?;

        if let Some(repository) = &self.repository {
            match repository.save_calculation(input, &result).await {
                Ok(id) => info!(id, filing_status = %input.filing_status, "Calculation saved"),
                Err(e) => warn!(error = %e, "Failed to save calculation"),
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::db::RepositoryError;
    use crate::models::{CalculationSummary, FilingStatus, StoredCalculation, W2Income};

    /// Records how many saves were attempted; optionally fails every save.
    #[derive(Default)]
    struct RecordingRepository {
        saves: Mutex<u32>,
        fail: bool,
    }

    #[async_trait]
    impl CalculationRepository for RecordingRepository {
        async fn save_calculation(
            &self,
            _input: &TaxReturnInput,
            _result: &FullTaxCalculationResult,
        ) -> Result<i64, RepositoryError> {
            let mut saves = self.saves.lock().unwrap();
            *saves += 1;
            if self.fail {
                return Err(RepositoryError::Database("disk full".to_string()));
            }
            Ok(i64::from(*saves))
        }
        async fn list_calculations(&self) -> Result<Vec<CalculationSummary>, RepositoryError> {
            Ok(Vec::new())
        }
        async fn get_calculation(
            &self,
            _id: i64,
        ) -> Result<StoredCalculation, RepositoryError> {
            Err(RepositoryError::NotFound)
        }
        async fn delete_calculation(
            &self,
            _id: i64,
        ) -> Result<(), RepositoryError> {
            Err(RepositoryError::NotFound)
        }
    }

    fn input() -> TaxReturnInput {
        let mut input = TaxReturnInput::new(FilingStatus::Single);
        input.w2s.push(W2Income {
            wages: dec!(75000),
            federal_withholding: dec!(8000),
        });
        input
    }

    #[tokio::test]
    async fn saves_once_per_calculation() {
        let repository = Arc::new(RecordingRepository::default());
        let calculator = TaxCalculator::with_repository(repository.clone());

        calculator.calculate(&input()).await.unwrap();

        assert_eq!(*repository.saves.lock().unwrap(), 1);
    }

    #[test]
    fn only_an_attached_repository_saves() {
        let repository = Arc::new(RecordingRepository::default());

        assert!(!TaxCalculator::new().saves_results());
        assert!(TaxCalculator::with_repository(repository).saves_results());
    }

    #[tokio::test]
    async fn storage_failure_does_not_change_result() {
        let repository = Arc::new(RecordingRepository {
            fail: true,
            ..Default::default()
        });
        let calculator = TaxCalculator::with_repository(repository.clone());

        let stored = calculator.calculate(&input()).await.unwrap();
        let pure = calculate_full_tax(&input()).unwrap();

        assert_eq!(stored, pure);
        assert_eq!(*repository.saves.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn invalid_input_is_not_saved() {
        let repository = Arc::new(RecordingRepository::default());
        let calculator = TaxCalculator::with_repository(repository.clone());
        let mut input = input();
        input.estimated_payments = dec!(-100);

        let result = calculator.calculate(&input).await;

        assert!(matches!(result, Err(ValidationError::NegativeAmount { .. })));
        assert_eq!(*repository.saves.lock().unwrap(), 0);
    }
}
