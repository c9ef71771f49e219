//! Recorded insights.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Realm;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(self) -> Uuid {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An immutable recorded insight.
///
/// Two entries with identical content and category still have distinct ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    id: EntryId,
    created_at: DateTime<Utc>,
    content: String,
    category: Realm,
}

impl Entry {
    /// Record a new entry stamped with a fresh id and the current time.
    #[must_use]
    pub fn new(content: impl Into<String>, category: Realm) -> Self {
        Self {
            id: EntryId::generate(),
            created_at: Utc::now(),
            content: content.into(),
            category,
        }
    }

    /// Rebuild an entry from stored fields.
    #[must_use]
    pub fn from_parts(
        id: EntryId,
        created_at: DateTime<Utc>,
        content: impl Into<String>,
        category: Realm,
    ) -> Self {
        Self {
            id,
            created_at,
            content: content.into(),
            category,
        }
    }

    #[must_use]
    pub fn id(&self) -> EntryId {
        self.id
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn category(&self) -> Realm {
        self.category
    }
}
