//! # Session Token Verification
//!
//! Verifies the opaque session tokens that the identity service issues. This
//! crate never issues tokens for production use; signing is only compiled for
//! tests and local tooling (`test-utils`).
//!
//! ## Token Format
//!
//! ```text
//! <user_id>.<expires_at_unix_secs>.<hex(HMAC-SHA256(secret, "<user_id>.<expires_at_unix_secs>"))>
//! ```
//!
//! ## Security Properties
//!
//! - **HMAC-SHA256 Signatures**: tokens are bound to the shared secret
//! - **Constant-Time Comparison**: via `Mac::verify_slice`
//! - **Expiry**: a token is rejected once `now >= expires_at`

use crate::entities::UserId;
use crate::errors::IdError;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Separator between the token segments.
pub const TOKEN_SEPARATOR: char = '.';

/// Why a session token was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("session token is malformed")]
    Malformed,

    #[error("session token carries an invalid user id: {0}")]
    InvalidUser(IdError),

    #[error("session token signature mismatch")]
    BadSignature,

    #[error("session token expired at {expires_at} (now {now})")]
    Expired { expires_at: u64, now: u64 },
}

/// Verifies HMAC-signed session tokens against a shared secret.
#[derive(Clone)]
pub struct SessionVerifier {
    secret: Vec<u8>,
}

impl std::fmt::Debug for SessionVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionVerifier")
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl SessionVerifier {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Verifies `token` at `now` (Unix seconds) and returns the session user.
    pub fn verify(&self, token: &str, now: u64) -> Result<UserId, SessionError> {
        // The user id may itself contain separators, so split from the right.
        let mut parts = token.trim().rsplitn(3, TOKEN_SEPARATOR);
        let signature_hex = parts.next().ok_or(SessionError::Malformed)?;
        let expires_raw = parts.next().ok_or(SessionError::Malformed)?;
        let user_raw = parts.next().ok_or(SessionError::Malformed)?;

        let expires_at: u64 = expires_raw.parse().map_err(|_| SessionError::Malformed)?;
        let signature = hex::decode(signature_hex).map_err(|_| SessionError::Malformed)?;

        let mut mac = match HmacSha256::new_from_slice(&self.secret) {
            Ok(m) => m,
            Err(_) => return Err(SessionError::BadSignature),
        };
        mac.update(signed_payload(user_raw, expires_at).as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| SessionError::BadSignature)?;

        if now >= expires_at {
            return Err(SessionError::Expired { expires_at, now });
        }

        UserId::parse(user_raw).map_err(SessionError::InvalidUser)
    }
}

fn signed_payload(user: &str, expires_at: u64) -> String {
    format!("{user}{TOKEN_SEPARATOR}{expires_at}")
}

/// Signs a session token. Only for tests and local tooling.
#[cfg(any(test, feature = "test-utils"))]
pub fn sign_session_token(secret: &[u8], user: &UserId, expires_at: u64) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    let payload = signed_payload(user.as_str(), expires_at);
    mac.update(payload.as_bytes());
    let signature = hex::encode(mac.finalize().into_bytes());
    format!("{payload}{TOKEN_SEPARATOR}{signature}")
}

/// Returns the current Unix timestamp in seconds.
///
/// If the system clock is before UNIX_EPOCH it returns 0.
pub fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
