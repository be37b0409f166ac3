pub mod batch;
pub mod history;
pub mod logging;
pub mod output;
pub mod report;

pub use batch::{BatchError, BatchEstimate, BatchEstimator, EstimateRecord};
pub use history::{calculator_for, open_repository};
