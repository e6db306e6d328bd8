//! # Report Intake Engine
//!
//! **Component:** dc-02
//! **Status:** Production-Ready
//!
//! ## Purpose
//!
//! Accepts abuse reports against items or users. Enforces the reason
//! taxonomy and length limits, throttles each reporter, and suppresses
//! duplicate item reports.
//!
//! ## Two Intake Modes
//!
//! | Mode | Entry point | Reason | Duplicate `(reporter, item)` |
//! |------|-------------|--------|------------------------------|
//! | Generic | `submit_report()` | must be one of [`ReportReason::ALL`] | silent success, no row |
//! | Item-specific | `submit_item_report()` | free text, at most 100 chars | `DuplicateReport` |
//!
//! Both modes are kept. Clients of the generic form rely on the silent
//! no-op; clients of the item form show "already reported".
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Exactly one of item / user is targeted | `domain/validation.rs` - `validate_generic()` |
//! | `Other` requires details | `domain/validation.rs` - `require_details_for_other()` |
//! | reason <= 100 chars, details <= 1000 chars | `domain/validation.rs` |
//! | At most one report per `(reporter, item)` | store unique key; `service.rs` maps `Conflict` per mode |
//! | User-target reports are not deduplicated | `service.rs` - no existence check for users |
//! | Validation precedes every store call | `service.rs` |
//!
//! ## Intake Pipeline
//!
//! ```text
//! caller ──► validate ──► rate limit ──► duplicate check ──► insert
//!   │401        │400          │429            │ (mode)          │500
//! ```

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::*;
pub use ports::*;
pub use service::ReportService;
