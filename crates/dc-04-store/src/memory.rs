//! In-memory store.
//!
//! Each table sits behind its own `parking_lot::RwLock` and every port call
//! takes a table lock once, so each call is atomic on its own. The award
//! procedure is the one call that touches two tables; it always locks
//! `items` before `ledger`.

use async_trait::async_trait;
use dc_01_interactions::{InteractionEdge, InteractionKind, InteractionStore, Subject};
use dc_02_reports::{Report, ReportStore};
use dc_03_points::{AwardOutcome, AwardRecord, ItemCatalog, PointsBalance, PointsLedger};
use parking_lot::RwLock;
use shared_types::{Item, ItemId, StoreError, UserId};
use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::ledger::{BalanceRow, LedgerPolicy};
use crate::now_millis;
use crate::seed::ItemRegistry;

#[derive(Default)]
struct ReportTable {
    rows: Vec<Report>,
    /// Unique index on `(reporter, item)`.
    item_index: HashSet<(UserId, ItemId)>,
}

#[derive(Default)]
struct LedgerTables {
    awards: HashMap<ItemId, AwardRecord>,
    balances: HashMap<UserId, BalanceRow>,
}

/// All tables in process memory.
#[derive(Default)]
pub struct InMemoryStore {
    edges: RwLock<HashSet<InteractionEdge>>,
    reports: RwLock<ReportTable>,
    items: RwLock<HashMap<ItemId, Item>>,
    ledger: RwLock<LedgerTables>,
    policy: LedgerPolicy,
}

impl InMemoryStore {
    pub fn new(policy: LedgerPolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    pub fn policy(&self) -> &LedgerPolicy {
        &self.policy
    }

    pub fn edge_count(&self) -> usize {
        self.edges.read().len()
    }

    pub fn report_count(&self) -> usize {
        self.reports.read().rows.len()
    }

    pub fn award_count(&self) -> usize {
        self.ledger.read().awards.len()
    }

    pub fn award_for(&self, item: &ItemId) -> Option<AwardRecord> {
        self.ledger.read().awards.get(item).cloned()
    }
}

#[async_trait]
impl InteractionStore for InMemoryStore {
    async fn edge_exists(&self, edge: &InteractionEdge) -> Result<bool, StoreError> {
        Ok(self.edges.read().contains(edge))
    }

    async fn insert_edge(&self, edge: &InteractionEdge) -> Result<(), StoreError> {
        if !self.edges.write().insert(edge.clone()) {
            return Err(StoreError::conflict("interaction_edges_pkey"));
        }
        Ok(())
    }

    async fn delete_edge(&self, edge: &InteractionEdge) -> Result<bool, StoreError> {
        Ok(self.edges.write().remove(edge))
    }

    async fn count_edges(
        &self,
        kind: InteractionKind,
        subject: &Subject,
    ) -> Result<u64, StoreError> {
        let edges = self.edges.read();
        Ok(edges
            .iter()
            .filter(|e| e.kind == kind && &e.subject == subject)
            .count() as u64)
    }
}

#[async_trait]
impl ReportStore for InMemoryStore {
    async fn has_item_report(&self, reporter: &UserId, item: &ItemId) -> Result<bool, StoreError> {
        Ok(self
            .reports
            .read()
            .item_index
            .contains(&(reporter.clone(), item.clone())))
    }

    async fn insert_report(&self, report: &Report) -> Result<(), StoreError> {
        let mut table = self.reports.write();
        if let Some(item) = report.target.item() {
            if !table
                .item_index
                .insert((report.reporter.clone(), item.clone()))
            {
                return Err(StoreError::conflict("reports_reporter_item_key"));
            }
        }
        table.rows.push(report.clone());
        Ok(())
    }
}

#[async_trait]
impl ItemCatalog for InMemoryStore {
    async fn get_item(&self, id: &ItemId) -> Result<Option<Item>, StoreError> {
        Ok(self.items.read().get(id).cloned())
    }
}

#[async_trait]
impl ItemRegistry for InMemoryStore {
    async fn upsert_item(&self, item: Item) -> Result<(), StoreError> {
        self.items.write().insert(item.id.clone(), item);
        Ok(())
    }
}

#[async_trait]
impl PointsLedger for InMemoryStore {
    async fn award_points_for_item(
        &self,
        giver: &UserId,
        item_id: &ItemId,
    ) -> Result<AwardOutcome, StoreError> {
        let items = self.items.read();
        let item = items
            .get(item_id)
            .ok_or_else(|| StoreError::NotFound(format!("item {item_id}")))?;
        if !item.is_owned_by(giver) {
            return Err(StoreError::Rejected(format!(
                "item {item_id} is not owned by {giver}"
            )));
        }
        if !item.status.is_given() {
            return Err(StoreError::Rejected(format!(
                "item {item_id} has status {}",
                item.status
            )));
        }

        let mut ledger = self.ledger.write();
        if ledger.awards.contains_key(item_id) {
            debug!(item = %item_id, "award already recorded");
            return Ok(AwardOutcome::AlreadyAwarded);
        }

        let points = self.policy.points_for(item);
        ledger.awards.insert(
            item_id.clone(),
            AwardRecord {
                item_id: item_id.clone(),
                giver_id: giver.clone(),
                points,
                campaign_id: item.campaign_id.clone(),
                awarded_at: now_millis(),
            },
        );
        let row = ledger.balances.entry(giver.clone()).or_default();
        *row = row.credit(points);
        Ok(AwardOutcome::Credited { points })
    }

    async fn balance(&self, user: &UserId) -> Result<PointsBalance, StoreError> {
        let row = self
            .ledger
            .read()
            .balances
            .get(user)
            .copied()
            .unwrap_or_default();
        Ok(self.policy.balance(user, row))
    }
}
