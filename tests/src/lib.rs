//! # Donation Commons Test Suite
//!
//! Cross-crate tests that need more than one engine, a real store, or the
//! full HTTP stack.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs          # Node wiring, users, items
//! └── integration/
//!     ├── donation_flow.rs # list → give → award → award again
//!     ├── races.rs         # concurrent toggles, reports, follows, awards
//!     ├── http_flows.rs    # signed sessions through the router
//!     ├── runtime.rs       # NodeRuntime on a real socket
//!     └── persistence.rs   # RocksDB restart (feature `rocksdb`)
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p dc-tests
//! cargo test -p dc-tests --features rocksdb
//! cargo bench -p dc-tests
//! ```

pub mod fixtures;
pub mod integration;
