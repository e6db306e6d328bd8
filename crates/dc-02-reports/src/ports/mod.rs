//! Ports layer for the Report Intake Engine.

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
