//! # Inbound Port - ReportApi

use async_trait::async_trait;
use shared_types::Caller;

use crate::domain::{ItemReportSubmission, ReportError, ReportSubmission, SubmitOutcome};

/// Primary API of the Report Intake Engine.
#[async_trait]
pub trait ReportApi: Send + Sync {
    /// Generic form: taxonomy reasons, item or user target.
    ///
    /// A repeated `(reporter, item)` report succeeds with
    /// `SubmitOutcome::AlreadyReported` and writes nothing.
    ///
    /// # Errors
    /// - `Unauthenticated`, `InvalidInput`, `RateLimited`, `Store`
    async fn submit_report(
        &self,
        caller: &Caller,
        submission: ReportSubmission,
    ) -> Result<SubmitOutcome, ReportError>;

    /// Item form: free-text reason, item target only.
    ///
    /// # Errors
    /// - `DuplicateReport` when the reporter already reported the item
    /// - `Unauthenticated`, `InvalidInput`, `RateLimited`, `Store`
    async fn submit_item_report(
        &self,
        caller: &Caller,
        submission: ItemReportSubmission,
    ) -> Result<(), ReportError>;
}
