//! # Service Container
//!
//! Configuration plus the wired engines for one node.

pub mod config;
pub mod subsystems;

pub use config::{ConfigError, NodeConfig, StoreBackend, StoreConfig};
pub use subsystems::{Maintenance, NodeStore, ServiceContainer};
