//! Domain layer for the Points Award Engine.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
