//! # Integration Tests
//!
//! Engines wired to real stores, exercised the way the gateway drives them.

pub mod donation_flow;
pub mod http_flows;
pub mod persistence;
pub mod races;
pub mod runtime;
