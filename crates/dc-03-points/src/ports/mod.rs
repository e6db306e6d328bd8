//! Ports layer for the Points Award Engine.

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
