//! # Points Award Engine
//!
//! **Component:** dc-03
//! **Status:** Production-Ready
//!
//! ## Purpose
//!
//! Credits a giver once for each item they donated. The engine is a gate in
//! front of the store's atomic award procedure; it never computes points and
//! never changes an item's status.
//!
//! ## Award Gate
//!
//! ```text
//! caller ──► item exists? ──no──► NotFound (404)
//!               │yes
//!               ▼
//!        owner == caller? ──no──► Forbidden (403)
//!               │yes
//!               ▼
//!        status == given? ──no──► InvalidState (400)
//!               │yes
//!               ▼
//!   ledger.award_points_for_item(giver, item)
//!               │
//!     ┌─────────┴──────────┐
//!  Credited { points }  AlreadyAwarded      (both success)
//! ```
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Gate order NotFound, Forbidden, InvalidState | `service.rs` - `check_gate()` |
//! | At most one credit per item | store procedure keyed by item id |
//! | Procedure failures are never retried | `service.rs` - single call, mapped to `AwardFailed` |
//!
//! ## Outbound Dependencies
//!
//! | Port | Purpose |
//! |------|---------|
//! | `ItemCatalog` | Read-only item lookup |
//! | `PointsLedger` | Atomic, idempotent award procedure and balances |

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::*;
pub use ports::*;
pub use service::PointsService;
