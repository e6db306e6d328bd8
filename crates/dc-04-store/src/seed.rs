//! Item registration and startup seeding.
//!
//! Items belong to the external listing subsystem. The registry port is how
//! that subsystem (or the runtime's seed file, or a test) puts them in the
//! store the Points Award Engine reads.

use async_trait::async_trait;
use shared_types::{Item, StoreError};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Write side of the item table.
#[async_trait]
pub trait ItemRegistry: Send + Sync {
    /// Inserts or replaces the item with the same id.
    async fn upsert_item(&self, item: Item) -> Result<(), StoreError>;
}

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse seed file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Reads a JSON array of items.
pub fn load_seed_items(path: &Path) -> Result<Vec<Item>, SeedError> {
    let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| SeedError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Upserts every item and returns how many were written.
pub async fn seed_items<R>(registry: &R, items: Vec<Item>) -> Result<usize, StoreError>
where
    R: ItemRegistry + ?Sized,
{
    let count = items.len();
    for item in items {
        registry.upsert_item(item).await?;
    }
    info!(count, "items seeded");
    Ok(count)
}
