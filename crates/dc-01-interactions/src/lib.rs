//! # Interaction Toggle Engine
//!
//! **Component:** dc-01
//! **Status:** Production-Ready
//!
//! ## Purpose
//!
//! Flips like/save/share/follow edges between an authenticated actor and a
//! subject (an item or another user). Existence of an edge means "on",
//! absence means "off". Edges are created and destroyed, never mutated.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | At most one edge per `(kind, subject, actor)` | store unique key; `service.rs` absorbs `Conflict` as `Added` |
//! | Toggle parity: N toggles leave the edge on iff N is odd | `service.rs` - `toggle()` |
//! | A user never follows themselves | `service.rs` - `reject_self_follow()` |
//! | Every store call is scoped to the actor | `domain/entities.rs` - `InteractionEdge` carries the actor |
//!
//! ## Toggle Flow
//!
//! ```text
//! caller ──► authenticated? ──no──► Unauthenticated
//!               │yes
//!               ▼
//!        subject id valid? ──no──► InvalidSubject
//!               │yes
//!               ▼
//!          edge exists? ──yes──► delete ──► Removed
//!               │no
//!               ▼
//!            insert ──ok / Conflict──► Added
//! ```
//!
//! The check and the act are two separate store calls. A racing request can
//! insert the same edge in between; the store rejects the second insert with
//! `Conflict` and the engine reports `Added` because the edge is on.
//!
//! ## Module Structure
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  ports/inbound.rs  - InteractionApi trait                       │
//! │  ports/outbound.rs - InteractionStore trait                     │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  domain/entities.rs - InteractionKind, Subject, InteractionEdge │
//! │  domain/errors.rs   - InteractionError                          │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::*;
pub use ports::*;
pub use service::InteractionService;
