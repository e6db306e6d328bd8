//! Shared wiring for the suite.

use std::sync::Arc;

use dc_01_interactions::{InteractionApi, InteractionService};
use dc_02_reports::{ReportApi, ReportLimits, ReportService};
use dc_03_points::{PointsApi, PointsService};
use dc_04_store::{InMemoryStore, ItemRegistry, LedgerPolicy};
use shared_types::{Caller, Item, ItemId, ItemStatus, UserId};

pub fn user(raw: &str) -> UserId {
    UserId::parse(raw).expect("valid user id")
}

pub fn caller(raw: &str) -> Caller {
    Caller::Authenticated(user(raw))
}

pub fn item(id: &str, owner: &str, status: ItemStatus) -> Item {
    Item::new(ItemId::parse(id).expect("valid item id"), user(owner), status)
}

/// Three engines over one in-memory store.
pub struct Node {
    pub store: Arc<InMemoryStore>,
    pub interactions: Arc<InteractionService<InMemoryStore>>,
    pub reports: Arc<ReportService<InMemoryStore>>,
    pub points: Arc<PointsService<InMemoryStore, InMemoryStore>>,
}

impl Node {
    /// Default ledger policy, report throttling off.
    pub fn new() -> Self {
        Self::with(LedgerPolicy::default(), ReportLimits::disabled())
    }

    pub fn with(policy: LedgerPolicy, limits: ReportLimits) -> Self {
        let store = Arc::new(InMemoryStore::new(policy));
        Self {
            interactions: Arc::new(InteractionService::new(Arc::clone(&store))),
            reports: Arc::new(ReportService::new(Arc::clone(&store), &limits)),
            points: Arc::new(PointsService::new(Arc::clone(&store), Arc::clone(&store))),
            store,
        }
    }

    /// Stands in for the listing subsystem.
    pub async fn list(&self, item: Item) {
        self.store
            .upsert_item(item)
            .await
            .expect("in-memory upsert cannot fail");
    }

    pub fn interaction_api(&self) -> Arc<dyn InteractionApi> {
        self.interactions.clone()
    }

    pub fn report_api(&self) -> Arc<dyn ReportApi> {
        self.reports.clone()
    }

    pub fn points_api(&self) -> Arc<dyn PointsApi> {
        self.points.clone()
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}
