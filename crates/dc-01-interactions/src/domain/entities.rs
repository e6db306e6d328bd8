//! Interaction edges and the values that key them.

use shared_types::{IdError, ItemId, UserId};
use std::fmt;

/// What an interaction edge targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubjectType {
    Item,
    User,
}

impl SubjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Item => "item",
            Self::User => "user",
        }
    }
}

/// Kind of interaction.
///
/// `Like`, `Save` and `Share` target items. `Follow` targets users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionKind {
    Like,
    Save,
    Share,
    Follow,
}

impl InteractionKind {
    pub const ALL: [InteractionKind; 4] = [Self::Like, Self::Save, Self::Share, Self::Follow];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Save => "save",
            Self::Share => "share",
            Self::Follow => "follow",
        }
    }

    pub fn subject_type(&self) -> SubjectType {
        match self {
            Self::Like | Self::Save | Self::Share => SubjectType::Item,
            Self::Follow => SubjectType::User,
        }
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The item or user an interaction targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Subject {
    Item(ItemId),
    User(UserId),
}

impl Subject {
    /// Parses a raw subject id as the subject type `kind` targets.
    pub fn parse(kind: InteractionKind, raw: &str) -> Result<Self, IdError> {
        match kind.subject_type() {
            SubjectType::Item => ItemId::parse(raw).map(Self::Item),
            SubjectType::User => UserId::parse(raw).map(Self::User),
        }
    }

    pub fn subject_type(&self) -> SubjectType {
        match self {
            Self::Item(_) => SubjectType::Item,
            Self::User(_) => SubjectType::User,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Item(id) => id.as_str(),
            Self::User(id) => id.as_str(),
        }
    }
}

/// One interaction edge. Its fields are also its unique key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InteractionEdge {
    pub kind: InteractionKind,
    pub subject: Subject,
    pub actor: UserId,
}

impl InteractionEdge {
    pub fn new(kind: InteractionKind, subject: Subject, actor: UserId) -> Self {
        Self {
            kind,
            subject,
            actor,
        }
    }

    /// Whether this edge would make the actor follow themselves.
    pub fn is_self_follow(&self) -> bool {
        matches!(&self.subject, Subject::User(target) if self.kind == InteractionKind::Follow && target == &self.actor)
    }
}

/// Result of a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    Added,
    Removed,
}

impl ToggleAction {
    /// Past-tense label for `kind`, as returned to clients (`liked`, `unsaved`, ...).
    pub fn label(&self, kind: InteractionKind) -> &'static str {
        match (kind, self) {
            (InteractionKind::Like, Self::Added) => "liked",
            (InteractionKind::Like, Self::Removed) => "unliked",
            (InteractionKind::Save, Self::Added) => "saved",
            (InteractionKind::Save, Self::Removed) => "unsaved",
            (InteractionKind::Share, Self::Added) => "shared",
            (InteractionKind::Share, Self::Removed) => "unshared",
            (InteractionKind::Follow, Self::Added) => "followed",
            (InteractionKind::Follow, Self::Removed) => "unfollowed",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Removed => "removed",
        }
    }
}
