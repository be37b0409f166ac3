use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    CalculationSummary, FullTaxCalculationResult, StoredCalculation, TaxReturnInput,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for RepositoryError {
    fn from(e: serde_json::Error) -> Self {
        RepositoryError::Serialization(e.to_string())
    }
}

/// Storage for completed calculations.
#[async_trait]
pub trait CalculationRepository: Send + Sync {
    /// Stores one calculation and returns its id.
    async fn save_calculation(
        &self,
        input: &TaxReturnInput,
        result: &FullTaxCalculationResult,
    ) -> Result<i64, RepositoryError>;

    /// Every stored calculation, newest first.
    async fn list_calculations(&self) -> Result<Vec<CalculationSummary>, RepositoryError>;

    async fn get_calculation(&self, id: i64) -> Result<StoredCalculation, RepositoryError>;

    async fn delete_calculation(&self, id: i64) -> Result<(), RepositoryError>;
}
