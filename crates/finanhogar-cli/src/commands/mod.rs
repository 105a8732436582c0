pub mod acquisition;
pub mod affordability;
pub mod investment;
pub mod mortgage;
pub mod rates;
pub mod simulation;
