//! Domain layer for the Report Intake Engine.

pub mod entities;
pub mod errors;
pub mod rate_limit;
pub mod validation;

pub use entities::*;
pub use errors::*;
pub use rate_limit::*;
pub use validation::*;
