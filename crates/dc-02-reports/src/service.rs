//! Report Service
//!
//! Implements `ReportApi`: validate, throttle, suppress duplicates, insert.

use async_trait::async_trait;
use shared_types::{Caller, UserId};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::{
    validate_generic, validate_item, ItemReportSubmission, Report, ReportError, ReportLimits,
    ReportRateLimiter, ReportSubmission, ReportTarget, SubmitOutcome, ValidatedReport,
};
use crate::ports::{ReportApi, ReportStore, SystemTimeSource, TimeSource};

/// Report Intake Engine.
pub struct ReportService<S: ReportStore> {
    store: Arc<S>,
    limiter: ReportRateLimiter,
    time: Arc<dyn TimeSource>,
}

impl<S: ReportStore> ReportService<S> {
    pub fn new(store: Arc<S>, limits: &ReportLimits) -> Self {
        Self::with_time_source(store, limits, Arc::new(SystemTimeSource))
    }

    pub fn with_time_source(
        store: Arc<S>,
        limits: &ReportLimits,
        time: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            store,
            limiter: ReportRateLimiter::new(limits),
            time,
        }
    }

    /// Periodic housekeeping for the rate limiter.
    pub fn cleanup(&self) {
        self.limiter.cleanup();
    }

    fn reporter(caller: &Caller) -> Result<&UserId, ReportError> {
        caller.user_id().ok_or(ReportError::Unauthenticated)
    }

    fn throttle(&self, reporter: &UserId) -> Result<(), ReportError> {
        self.limiter
            .check(reporter)
            .map_err(|retry_after| ReportError::RateLimited { retry_after })
    }

    fn build(&self, reporter: &UserId, validated: ValidatedReport) -> Report {
        Report {
            id: Uuid::new_v4(),
            reporter: reporter.clone(),
            target: validated.target,
            reason: validated.reason,
            details: validated.details,
            created_at: self.time.now(),
        }
    }

    /// Whether the reporter already has a report on this target. User
    /// targets are never deduplicated.
    async fn already_reported(
        &self,
        reporter: &UserId,
        target: &ReportTarget,
    ) -> Result<bool, ReportError> {
        match target.item() {
            Some(item) => Ok(self.store.has_item_report(reporter, item).await?),
            None => Ok(false),
        }
    }
}

#[async_trait]
impl<S: ReportStore + 'static> ReportApi for ReportService<S> {
    async fn submit_report(
        &self,
        caller: &Caller,
        submission: ReportSubmission,
    ) -> Result<SubmitOutcome, ReportError> {
        let reporter = Self::reporter(caller)?;
        let validated = validate_generic(&submission)?;
        self.throttle(reporter)?;

        if self.already_reported(reporter, &validated.target).await? {
            debug!(reporter = %reporter, "duplicate report ignored");
            return Ok(SubmitOutcome::AlreadyReported);
        }

        let report = self.build(reporter, validated);
        match self.store.insert_report(&report).await {
            Ok(()) => {}
            Err(e) if e.is_conflict() => {
                debug!(reporter = %reporter, "concurrent duplicate report ignored");
                return Ok(SubmitOutcome::AlreadyReported);
            }
            Err(e) => return Err(e.into()),
        }

        info!(
            report_id = %report.id,
            reporter = %reporter,
            target = report.target.kind(),
            reason = %report.reason,
            "report recorded"
        );
        Ok(SubmitOutcome::Recorded)
    }

    async fn submit_item_report(
        &self,
        caller: &Caller,
        submission: ItemReportSubmission,
    ) -> Result<(), ReportError> {
        let reporter = Self::reporter(caller)?;
        let validated = validate_item(&submission)?;
        self.throttle(reporter)?;

        if self.already_reported(reporter, &validated.target).await? {
            return Err(ReportError::DuplicateReport);
        }

        let report = self.build(reporter, validated);
        match self.store.insert_report(&report).await {
            Ok(()) => {}
            Err(e) if e.is_conflict() => return Err(ReportError::DuplicateReport),
            Err(e) => return Err(e.into()),
        }

        info!(
            report_id = %report.id,
            reporter = %reporter,
            target = report.target.kind(),
            "item report recorded"
        );
        Ok(())
    }
}
