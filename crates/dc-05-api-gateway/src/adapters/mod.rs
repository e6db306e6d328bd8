//! Adapters for the API Gateway.
//!
//! Conversions from engine errors into the HTTP error model.

pub mod error_conversions;

pub use error_conversions::item_report_error;
