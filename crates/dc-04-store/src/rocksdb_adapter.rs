//! # RocksDB Store Adapter
//!
//! Production implementation of every store port.
//!
//! ## Column Families
//!
//! - `edges` - interaction edges, value-less keys
//! - `reports` - report rows by id
//! - `report_index` - unique `(reporter, item)` index
//! - `items` - item rows
//! - `awards` - award records by item id
//! - `balances` - running totals by user id
//!
//! ## Keys
//!
//! Key segments are joined with `0x00`. Identifiers never contain control
//! characters, so the separator cannot appear inside a segment.
//!
//! ```text
//! edges:        <kind> 00 <subject_type> 00 <subject_id> 00 <actor>
//! report_index: <reporter> 00 <item>
//! ```
//!
//! ## Atomicity
//!
//! Reads share the DB read lock. Conditional writes (insert-if-absent, the
//! award procedure) hold the write lock across their check and their write,
//! and multi-key effects go through a single `WriteBatch`.

use async_trait::async_trait;
use dc_01_interactions::{InteractionEdge, InteractionKind, InteractionStore, Subject};
use dc_02_reports::{Report, ReportStore};
use dc_03_points::{AwardOutcome, AwardRecord, ItemCatalog, PointsBalance, PointsLedger};
use parking_lot::RwLock;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, Direction, IteratorMode, Options, WriteBatch, DB};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::{Item, ItemId, StoreError, UserId};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use crate::ledger::{BalanceRow, LedgerPolicy};
use crate::now_millis;
use crate::seed::ItemRegistry;

pub const CF_EDGES: &str = "edges";
pub const CF_REPORTS: &str = "reports";
pub const CF_REPORT_INDEX: &str = "report_index";
pub const CF_ITEMS: &str = "items";
pub const CF_AWARDS: &str = "awards";
pub const CF_BALANCES: &str = "balances";

/// All column families used by the store
pub const COLUMN_FAMILIES: &[&str] = &[
    CF_EDGES,
    CF_REPORTS,
    CF_REPORT_INDEX,
    CF_ITEMS,
    CF_AWARDS,
    CF_BALANCES,
];

const SEP: u8 = 0;

/// RocksDB configuration
#[derive(Debug, Clone)]
pub struct RocksDbConfig {
    /// Path to the database directory
    pub path: PathBuf,
    /// Block cache size in bytes (default: 64MB)
    pub block_cache_size: usize,
    /// Write buffer size in bytes (default: 16MB)
    pub write_buffer_size: usize,
    /// Enable fsync after each write (default: true for durability)
    pub sync_writes: bool,
}

impl Default for RocksDbConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./data/rocksdb"),
            block_cache_size: 64 * 1024 * 1024,
            write_buffer_size: 16 * 1024 * 1024,
            sync_writes: true,
        }
    }
}

impl RocksDbConfig {
    /// Create config for testing (smaller buffers, no sync)
    pub fn for_testing(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            block_cache_size: 8 * 1024 * 1024,
            write_buffer_size: 4 * 1024 * 1024,
            sync_writes: false,
        }
    }
}

fn io_err(op: &str, e: rocksdb::Error) -> StoreError {
    StoreError::Unavailable(format!("RocksDB {op} failed: {e}"))
}

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, StoreError> {
    bincode::serialize(value).map_err(|e| StoreError::Corrupt(format!("encode: {e}")))
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, StoreError> {
    bincode::deserialize(bytes).map_err(|e| StoreError::Corrupt(format!("decode: {e}")))
}

fn join_key(segments: &[&str]) -> Vec<u8> {
    let mut key = Vec::with_capacity(segments.iter().map(|s| s.len() + 1).sum());
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            key.push(SEP);
        }
        key.extend_from_slice(segment.as_bytes());
    }
    key
}

fn edge_prefix(kind: InteractionKind, subject: &Subject) -> Vec<u8> {
    let mut key = join_key(&[kind.as_str(), subject.subject_type().as_str(), subject.id()]);
    key.push(SEP);
    key
}

fn edge_key(edge: &InteractionEdge) -> Vec<u8> {
    let mut key = edge_prefix(edge.kind, &edge.subject);
    key.extend_from_slice(edge.actor.as_str().as_bytes());
    key
}

fn report_index_key(reporter: &UserId, item: &ItemId) -> Vec<u8> {
    join_key(&[reporter.as_str(), item.as_str()])
}

/// RocksDB-backed store implementing every port
pub struct RocksDbStore {
    db: Arc<RwLock<DB>>,
    config: RocksDbConfig,
    policy: LedgerPolicy,
}

impl RocksDbStore {
    /// Open or create the database
    pub fn open(config: RocksDbConfig, policy: LedgerPolicy) -> Result<Self, StoreError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);
        opts.set_write_buffer_size(config.write_buffer_size);
        opts.set_compression_type(rocksdb::DBCompressionType::Snappy);

        let mut block_opts = rocksdb::BlockBasedOptions::default();
        block_opts.set_bloom_filter(10.0, false);
        block_opts.set_block_cache(&rocksdb::Cache::new_lru_cache(config.block_cache_size));
        opts.set_block_based_table_factory(&block_opts);

        let cf_descriptors: Vec<ColumnFamilyDescriptor> = COLUMN_FAMILIES
            .iter()
            .map(|name| {
                let mut cf_opts = Options::default();
                cf_opts.set_compression_type(rocksdb::DBCompressionType::Snappy);
                ColumnFamilyDescriptor::new(*name, cf_opts)
            })
            .collect();

        let db = DB::open_cf_descriptors(&opts, &config.path, cf_descriptors)
            .map_err(|e| io_err("open", e))?;
        info!(path = %config.path.display(), "RocksDB store opened");

        Ok(Self {
            db: Arc::new(RwLock::new(db)),
            config,
            policy,
        })
    }

    pub fn policy(&self) -> &LedgerPolicy {
        &self.policy
    }

    fn write_opts(&self) -> rocksdb::WriteOptions {
        let mut opts = rocksdb::WriteOptions::default();
        opts.set_sync(self.config.sync_writes);
        opts
    }

    fn cf<'a>(db: &'a DB, name: &str) -> Result<&'a ColumnFamily, StoreError> {
        db.cf_handle(name)
            .ok_or_else(|| StoreError::Unavailable(format!("missing column family {name}")))
    }

    fn get_raw(db: &DB, cf: &str, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        db.get_cf(Self::cf(db, cf)?, key).map_err(|e| io_err("get", e))
    }

    fn exists(db: &DB, cf: &str, key: &[u8]) -> Result<bool, StoreError> {
        db.get_pinned_cf(Self::cf(db, cf)?, key)
            .map(|v| v.is_some())
            .map_err(|e| io_err("exists", e))
    }

    fn get_decoded<T: DeserializeOwned>(
        db: &DB,
        cf: &str,
        key: &[u8],
    ) -> Result<Option<T>, StoreError> {
        Self::get_raw(db, cf, key)?
            .map(|bytes| decode(&bytes))
            .transpose()
    }
}

#[async_trait]
impl InteractionStore for RocksDbStore {
    async fn edge_exists(&self, edge: &InteractionEdge) -> Result<bool, StoreError> {
        let db = self.db.read();
        Self::exists(&db, CF_EDGES, &edge_key(edge))
    }

    async fn insert_edge(&self, edge: &InteractionEdge) -> Result<(), StoreError> {
        let key = edge_key(edge);
        let db = self.db.write();
        if Self::exists(&db, CF_EDGES, &key)? {
            return Err(StoreError::conflict("interaction_edges_pkey"));
        }
        db.put_cf_opt(Self::cf(&db, CF_EDGES)?, &key, b"", &self.write_opts())
            .map_err(|e| io_err("put", e))
    }

    async fn delete_edge(&self, edge: &InteractionEdge) -> Result<bool, StoreError> {
        let key = edge_key(edge);
        let db = self.db.write();
        if !Self::exists(&db, CF_EDGES, &key)? {
            return Ok(false);
        }
        db.delete_cf_opt(Self::cf(&db, CF_EDGES)?, &key, &self.write_opts())
            .map_err(|e| io_err("delete", e))?;
        Ok(true)
    }

    async fn count_edges(
        &self,
        kind: InteractionKind,
        subject: &Subject,
    ) -> Result<u64, StoreError> {
        let prefix = edge_prefix(kind, subject);
        let db = self.db.read();
        let iter = db.iterator_cf(
            Self::cf(&db, CF_EDGES)?,
            IteratorMode::From(&prefix, Direction::Forward),
        );

        let mut count = 0;
        for entry in iter {
            let (key, _) = entry.map_err(|e| io_err("scan", e))?;
            if !key.starts_with(&prefix) {
                break;
            }
            count += 1;
        }
        Ok(count)
    }
}

#[async_trait]
impl ReportStore for RocksDbStore {
    async fn has_item_report(&self, reporter: &UserId, item: &ItemId) -> Result<bool, StoreError> {
        let db = self.db.read();
        Self::exists(&db, CF_REPORT_INDEX, &report_index_key(reporter, item))
    }

    async fn insert_report(&self, report: &Report) -> Result<(), StoreError> {
        let row = encode(report)?;
        let id = report.id.as_bytes().to_vec();

        let db = self.db.write();
        let mut batch = WriteBatch::default();
        if let Some(item) = report.target.item() {
            let index_key = report_index_key(&report.reporter, item);
            if Self::exists(&db, CF_REPORT_INDEX, &index_key)? {
                return Err(StoreError::conflict("reports_reporter_item_key"));
            }
            batch.put_cf(Self::cf(&db, CF_REPORT_INDEX)?, &index_key, &id);
        }
        batch.put_cf(Self::cf(&db, CF_REPORTS)?, &id, &row);
        db.write_opt(batch, &self.write_opts())
            .map_err(|e| io_err("batch write", e))
    }
}

#[async_trait]
impl ItemCatalog for RocksDbStore {
    async fn get_item(&self, id: &ItemId) -> Result<Option<Item>, StoreError> {
        let db = self.db.read();
        Self::get_decoded(&db, CF_ITEMS, id.as_str().as_bytes())
    }
}

#[async_trait]
impl ItemRegistry for RocksDbStore {
    async fn upsert_item(&self, item: Item) -> Result<(), StoreError> {
        let row = encode(&item)?;
        let db = self.db.write();
        db.put_cf_opt(
            Self::cf(&db, CF_ITEMS)?,
            item.id.as_str().as_bytes(),
            &row,
            &self.write_opts(),
        )
        .map_err(|e| io_err("put", e))
    }
}

#[async_trait]
impl PointsLedger for RocksDbStore {
    async fn award_points_for_item(
        &self,
        giver: &UserId,
        item_id: &ItemId,
    ) -> Result<AwardOutcome, StoreError> {
        let item_key = item_id.as_str().as_bytes();
        let giver_key = giver.as_str().as_bytes();

        let db = self.db.write();
        let item: Item = Self::get_decoded(&db, CF_ITEMS, item_key)?
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
        if Self::exists(&db, CF_AWARDS, item_key)? {
            debug!(item = %item_id, "award already recorded");
            return Ok(AwardOutcome::AlreadyAwarded);
        }

        let points = self.policy.points_for(&item);
        let record = AwardRecord {
            item_id: item_id.clone(),
            giver_id: giver.clone(),
            points,
            campaign_id: item.campaign_id.clone(),
            awarded_at: now_millis(),
        };
        let balance: BalanceRow = Self::get_decoded(&db, CF_BALANCES, giver_key)?.unwrap_or_default();

        let mut batch = WriteBatch::default();
        batch.put_cf(Self::cf(&db, CF_AWARDS)?, item_key, encode(&record)?);
        batch.put_cf(
            Self::cf(&db, CF_BALANCES)?,
            giver_key,
            encode(&balance.credit(points))?,
        );
        db.write_opt(batch, &self.write_opts())
            .map_err(|e| io_err("batch write", e))?;

        Ok(AwardOutcome::Credited { points })
    }

    async fn balance(&self, user: &UserId) -> Result<PointsBalance, StoreError> {
        let db = self.db.read();
        let row: BalanceRow =
            Self::get_decoded(&db, CF_BALANCES, user.as_str().as_bytes())?.unwrap_or_default();
        Ok(self.policy.balance(user, row))
    }
}
