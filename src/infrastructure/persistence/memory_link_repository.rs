//! In-process link repository.
//!
//! Backs `STORAGE=memory` deployments and the HTTP integration tests. Records
//! live for the lifetime of the process.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// In-memory implementation of [`LinkRepository`] using `DashMap`.
///
/// Soft-deleted links stay in the map, so `count_all` keeps counting them.
#[derive(Debug)]
pub struct MemoryLinkRepository {
    links: DashMap<i64, Link>,
    codes: DashMap<String, i64>,
    sequence: AtomicI64,
}

impl MemoryLinkRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self {
            links: DashMap::new(),
            codes: DashMap::new(),
            sequence: AtomicI64::new(1),
        }
    }
}

impl Default for MemoryLinkRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        // Lock order: codes, then links.
        let code_slot = match self.codes.entry(new_link.code.clone()) {
            Entry::Occupied(_) => {
                return Err(AppError::conflict(format!(
                    "Code '{}' already exists",
                    new_link.code
                )));
            }
            Entry::Vacant(slot) => slot,
        };

        let link = match self.links.entry(new_link.id) {
            Entry::Occupied(_) => {
                return Err(AppError::conflict(format!(
                    "Identifier {} already exists",
                    new_link.id
                )));
            }
            Entry::Vacant(slot) => {
                let now = Utc::now();
                let link = Link::new(
                    new_link.id,
                    new_link.code,
                    new_link.source,
                    now,
                    now,
                    None,
                );
                slot.insert(link.clone());
                link
            }
        };

        code_slot.insert(link.id);
        Ok(link)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        Ok(self
            .links
            .get(&id)
            .filter(|link| !link.is_deleted())
            .map(|link| link.value().clone()))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let Some(id) = self.codes.get(code).map(|id| *id) else {
            return Ok(None);
        };

        self.find_by_id(id).await
    }

    async fn count_all(&self) -> Result<i64, AppError> {
        Ok(self.links.len() as i64)
    }

    async fn count_deleted(&self) -> Result<i64, AppError> {
        Ok(self.links.iter().filter(|link| link.is_deleted()).count() as i64)
    }

    async fn soft_delete(&self, id: i64) -> Result<bool, AppError> {
        let Some(mut link) = self.links.get_mut(&id) else {
            return Ok(false);
        };

        if link.is_deleted() {
            return Ok(false);
        }

        let now = Utc::now();
        link.deleted_at = Some(now);
        link.updated_at = now;
        Ok(true)
    }

    async fn next_sequence_value(&self) -> Result<i64, AppError> {
        Ok(self.sequence.fetch_add(1, Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_link(id: i64, code: &str) -> NewLink {
        NewLink {
            id,
            code: code.to_string(),
            source: format!("https://example.com/{id}"),
        }
    }

    #[tokio::test]
    async fn save_and_find() {
        let repo = MemoryLinkRepository::new();

        let created = repo.create(new_link(1, "n4lm9")).await.unwrap();
        assert_eq!(created.source, "https://example.com/1");

        let by_id = repo.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(by_id, created);

        let by_code = repo.find_by_code("n4lm9").await.unwrap().unwrap();
        assert_eq!(by_code.id, 1);
    }

    #[tokio::test]
    async fn find_nonexistent() {
        let repo = MemoryLinkRepository::new();

        assert!(repo.find_by_id(42).await.unwrap().is_none());
        assert!(repo.find_by_code("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_identifier_conflicts() {
        let repo = MemoryLinkRepository::new();
        repo.create(new_link(1, "aaaaa")).await.unwrap();

        let err = repo.create(new_link(1, "bbbbb")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict { .. }));

        // The rejected code must not be left behind in the index.
        assert!(repo.find_by_code("bbbbb").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_code_conflicts() {
        let repo = MemoryLinkRepository::new();
        repo.create(new_link(1, "aaaaa")).await.unwrap();

        let err = repo.create(new_link(2, "aaaaa")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict { .. }));
        assert_eq!(repo.count_all().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn soft_delete_hides_link_but_keeps_count() {
        let repo = MemoryLinkRepository::new();
        repo.create(new_link(1, "aaaaa")).await.unwrap();
        repo.create(new_link(2, "bbbbb")).await.unwrap();

        assert!(repo.soft_delete(1).await.unwrap());
        assert!(!repo.soft_delete(1).await.unwrap());
        assert!(!repo.soft_delete(99).await.unwrap());

        assert!(repo.find_by_id(1).await.unwrap().is_none());
        assert!(repo.find_by_code("aaaaa").await.unwrap().is_none());
        assert_eq!(repo.count_all().await.unwrap(), 2);
        assert_eq!(repo.count_deleted().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn sequence_is_monotonic() {
        let repo = MemoryLinkRepository::new();

        assert_eq!(repo.next_sequence_value().await.unwrap(), 1);
        assert_eq!(repo.next_sequence_value().await.unwrap(), 2);
        assert_eq!(repo.next_sequence_value().await.unwrap(), 3);
    }
}
