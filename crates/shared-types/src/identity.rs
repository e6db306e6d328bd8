//! Caller identity as resolved by the transport layer.

use crate::entities::UserId;

/// The identity attached to a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Caller {
    /// No session, or a session that failed verification.
    #[default]
    Anonymous,
    /// A verified user.
    Authenticated(UserId),
}

impl Caller {
    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            Self::Authenticated(user) => Some(user),
            Self::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

impl From<Option<UserId>> for Caller {
    fn from(user: Option<UserId>) -> Self {
        user.map_or(Self::Anonymous, Self::Authenticated)
    }
}
