//! Ports layer for the Interaction Toggle Engine.
//!
//! - Inbound (Driving) ports: API exposed to the HTTP surface
//! - Outbound (Driven) ports: the persistent edge table

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
