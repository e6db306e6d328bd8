//! Domain layer for the Interaction Toggle Engine.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
