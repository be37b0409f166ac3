//! The calculation pipeline.
//!
//! Income → FICA → AGI → Deduction → Tax computation → Credits → Summary.
//! Each stage is a pure function of the return and the results of the stages
//! before it.

pub mod agi;
pub mod credits;
pub mod deduction;
pub mod fica;
pub mod income;
pub mod orchestrator;
pub mod summary;
pub mod tax_computation;

pub use orchestrator::calculate_full_tax;
