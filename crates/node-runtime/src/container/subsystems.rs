//! # Service Container
//!
//! Opens the configured store, seeds items and wires the three engines
//! into the gateway's [`AppState`].

use std::sync::Arc;

use anyhow::{Context, Result};
use dc_01_interactions::{InteractionService, InteractionStore};
use dc_02_reports::{ReportService, ReportStore};
use dc_03_points::{ItemCatalog, PointsLedger, PointsService};
use dc_04_store::{load_seed_items, seed_items, InMemoryStore, ItemRegistry};
use dc_05_api_gateway::AppState;
use tracing::info;

use super::config::{NodeConfig, StoreBackend};

/// Periodic housekeeping an engine wants run in the background.
pub trait Maintenance: Send + Sync {
    fn run_maintenance(&self);
}

impl<S: ReportStore + 'static> Maintenance for ReportService<S> {
    fn run_maintenance(&self) {
        self.cleanup();
    }
}

/// Every port the engines need, implemented by one store.
pub trait NodeStore:
    InteractionStore + ReportStore + ItemCatalog + PointsLedger + ItemRegistry + 'static
{
}

impl<T> NodeStore for T where
    T: InteractionStore + ReportStore + ItemCatalog + PointsLedger + ItemRegistry + 'static
{
}

/// Engines and their shared store, ready to serve.
pub struct ServiceContainer {
    /// Handler state for the gateway.
    pub state: AppState,
    /// Backend the engines run on.
    pub backend: StoreBackend,
    /// Items loaded from the seed file.
    pub seeded_items: usize,
    maintenance: Arc<dyn Maintenance>,
}

impl ServiceContainer {
    /// Opens the configured backend and wires the engines onto it.
    pub async fn build(config: &NodeConfig) -> Result<Self> {
        match config.store.backend {
            StoreBackend::Memory => {
                info!("Using in-memory store");
                let store = Arc::new(InMemoryStore::new(config.ledger.clone()));
                Self::assemble(store, config).await
            }
            StoreBackend::Rocksdb => Self::build_rocksdb(config).await,
        }
    }

    #[cfg(feature = "rocksdb")]
    async fn build_rocksdb(config: &NodeConfig) -> Result<Self> {
        use dc_04_store::{RocksDbConfig, RocksDbStore};

        let db_config = RocksDbConfig {
            path: config.store.data_dir.join("rocksdb"),
            sync_writes: config.store.sync_writes,
            ..RocksDbConfig::default()
        };
        info!(path = ?db_config.path, "Opening RocksDB store");
        let store = RocksDbStore::open(db_config, config.ledger.clone())
            .context("Failed to open RocksDB store")?;
        Self::assemble(Arc::new(store), config).await
    }

    #[cfg(not(feature = "rocksdb"))]
    async fn build_rocksdb(_config: &NodeConfig) -> Result<Self> {
        anyhow::bail!("rocksdb backend requested but node-runtime was built without --features rocksdb")
    }

    /// Wires the engines onto `store`.
    pub async fn assemble<S: NodeStore>(store: Arc<S>, config: &NodeConfig) -> Result<Self> {
        let seeded_items = match &config.store.seed_items {
            Some(path) => {
                let items = load_seed_items(path).context("Failed to load seed items")?;
                let count = seed_items(store.as_ref(), items)
                    .await
                    .context("Failed to seed items")?;
                info!(count, path = ?path, "Seeded items");
                count
            }
            None => 0,
        };

        let interactions = Arc::new(InteractionService::new(Arc::clone(&store)));
        let reports = Arc::new(ReportService::new(Arc::clone(&store), &config.reports));
        let points = Arc::new(PointsService::new(Arc::clone(&store), Arc::clone(&store)));

        Ok(Self {
            state: AppState::new(interactions, reports.clone(), points),
            backend: config.store.backend,
            seeded_items,
            maintenance: reports,
        })
    }

    /// Background housekeeping hook.
    pub fn maintenance(&self) -> Arc<dyn Maintenance> {
        Arc::clone(&self.maintenance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{Caller, UserId};

    #[tokio::test]
    async fn test_memory_container_seeds_items() {
        let dir = tempfile::tempdir().unwrap();
        let seed = dir.path().join("items.json");
        std::fs::write(
            &seed,
            serde_json::json!([
                {"id": "item-1", "ownerId": "alice", "status": "given"},
                {"id": "item-2", "ownerId": "bob", "status": "available"}
            ])
            .to_string(),
        )
        .unwrap();

        let mut config = NodeConfig::default();
        config.store.seed_items = Some(seed);
        let container = ServiceContainer::build(&config).await.unwrap();
        assert_eq!(container.seeded_items, 2);
        assert_eq!(container.backend, StoreBackend::Memory);

        let alice = Caller::Authenticated(UserId::parse("alice").unwrap());
        let outcome = container
            .state
            .points
            .award_for_item(&alice, "item-1")
            .await
            .unwrap();
        assert!(outcome.awarded());

        container.maintenance().run_maintenance();
    }

    #[tokio::test]
    async fn test_missing_seed_file_fails() {
        let mut config = NodeConfig::default();
        config.store.seed_items = Some("/nonexistent/items.json".into());
        assert!(ServiceContainer::build(&config).await.is_err());
    }
}
