//! # Shared Types Crate
//!
//! Types that cross subsystem boundaries in the donation core.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: identifiers, the item read model and the
//!   store error type are defined once here.
//! - **Validated Identifiers**: `UserId` and `ItemId` can only be built through
//!   `parse`, so every engine receives well-formed ids.
//! - **Identity Is Resolved Once**: the transport resolves a [`Caller`] and the
//!   engines only ever see that value.

pub mod entities;
pub mod errors;
pub mod identity;
pub mod security;

pub use entities::*;
pub use errors::*;
pub use identity::Caller;
pub use security::{current_timestamp, SessionError, SessionVerifier};
