//! Financing engine for the Hogares Connect property portal.
//!
//! Every calculation is a pure function over decimal inputs: mortgage
//! amortization, closing-cost estimates, debt-service affordability and the
//! product rate table. Nothing is rounded inside the engine.

pub mod acquisition;
pub mod affordability;
pub mod config;
pub mod error;
pub mod investment;
pub mod mortgage;
pub mod rates;
pub mod simulation;
pub mod types;

pub use acquisition::{compute_acquisition_costs, AcquisitionCosts};
pub use affordability::{check_affordability, AffordabilityAssessment, AffordabilityTier};
pub use error::FinancingError;
pub use mortgage::{compute_mortgage, DownPayment, MortgageResult};
pub use rates::{resolve_rate, ClientProfile, LoanType, RateProfile};
pub use types::*;

/// Standard result type for all financing operations
pub type FinancingResult<T> = Result<T, FinancingError>;
