pub mod calculations;
pub mod db;
pub mod error;
pub mod estimate;
pub mod models;
pub mod service;
pub mod tables;
pub mod workflows;

pub use db::{CalculationRepository, RepositoryError};
pub use error::{MAX_AMOUNT, ValidationError};
pub use estimate::{EstimateResult, quick_estimate};
pub use models::*;
pub use service::TaxCalculator;
pub use workflows::calculate_full_tax;
