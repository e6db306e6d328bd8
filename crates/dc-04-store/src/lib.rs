//! # Persistent Store
//!
//! **Component:** dc-04
//!
//! Implements the outbound ports of every engine. The engines never talk to
//! each other; the only coordination between concurrent requests is what
//! this crate enforces.
//!
//! ## Tables
//!
//! | Table | Unique key | Port |
//! |-------|-----------|------|
//! | interaction edges | `(kind, subject, actor)` | `InteractionStore` |
//! | reports | `(reporter, item)` for item targets | `ReportStore` |
//! | items | `id` | `ItemCatalog`, [`ItemRegistry`] |
//! | awards | `item_id` | `PointsLedger` |
//! | balances | `user_id` | `PointsLedger` |
//!
//! ## Atomic Award Procedure
//!
//! `award_points_for_item` runs as one serialized step: re-read the item,
//! re-check owner and status, return `AlreadyAwarded` if an award row
//! exists, otherwise write the award row and the balance together. Points
//! and ranks come from [`LedgerPolicy`] and nowhere else.
//!
//! ## Backends
//!
//! | Backend | Type | Serialization point |
//! |---------|------|---------------------|
//! | memory | [`InMemoryStore`] | one `parking_lot::RwLock` per table |
//! | rocksdb (feature) | `RocksDbStore` | write lock on the DB for conditional writes, `WriteBatch` for multi-key effects |

pub mod ledger;
pub mod memory;
pub mod seed;

#[cfg(feature = "rocksdb")]
pub mod rocksdb_adapter;

pub use ledger::{BalanceRow, LedgerPolicy, LedgerPolicyError, RankThreshold};
pub use memory::InMemoryStore;
pub use seed::{load_seed_items, seed_items, ItemRegistry, SeedError};

#[cfg(feature = "rocksdb")]
pub use rocksdb_adapter::{RocksDbConfig, RocksDbStore, COLUMN_FAMILIES};

use shared_types::Timestamp;

pub(crate) fn now_millis() -> Timestamp {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as Timestamp
}
