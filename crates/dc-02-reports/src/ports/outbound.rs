//! Outbound (Driven) ports for the Report Intake Engine.

use async_trait::async_trait;
use shared_types::{ItemId, StoreError, Timestamp, UserId};

use crate::domain::Report;

/// The report table.
///
/// The store enforces a unique key on `(reporter, item)` for item targets.
#[async_trait]
pub trait ReportStore: Send + Sync {
    async fn has_item_report(&self, reporter: &UserId, item: &ItemId) -> Result<bool, StoreError>;

    /// Inserts a report.
    ///
    /// # Errors
    /// - `StoreError::Conflict` when `(reporter, item)` already has a report
    async fn insert_report(&self, report: &Report) -> Result<(), StoreError>;
}

/// Time source for report timestamps.
///
/// Abstracted to allow testing with deterministic time.
pub trait TimeSource: Send + Sync {
    /// Returns the current timestamp in milliseconds.
    fn now(&self) -> Timestamp;
}

/// Default system time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as Timestamp
    }
}

/// Fixed time source for testing.
#[cfg(test)]
pub struct MockTimeSource {
    time: std::sync::atomic::AtomicU64,
}

#[cfg(test)]
impl MockTimeSource {
    pub fn new(initial: Timestamp) -> Self {
        Self {
            time: std::sync::atomic::AtomicU64::new(initial),
        }
    }
}

#[cfg(test)]
impl TimeSource for MockTimeSource {
    fn now(&self) -> Timestamp {
        self.time.load(std::sync::atomic::Ordering::SeqCst)
    }
}
