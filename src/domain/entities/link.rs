//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A stored link.
///
/// `code` is always the codec encoding of `id`; it is persisted alongside the
/// record so raw lookups and database inspection do not need the salt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub source: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        code: String,
        source: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        deleted_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            code,
            source,
            created_at,
            updated_at,
            deleted_at,
        }
    }

    /// Returns true if the link has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Input data for persisting a new link.
///
/// The identifier is assigned by the registry before the record reaches the
/// store; the store never picks one on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub id: i64,
    pub code: String,
    pub source: String,
}
