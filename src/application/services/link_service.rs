//! Link registry: identifier assignment, creation, resolution and removal.

use std::str::FromStr;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::codec::Codec;
use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Where new link identifiers come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdStrategy {
    /// In-process counter seeded once from the store's total link count and
    /// advanced under a lock after each successful insert.
    ///
    /// Correct for a single service process only.
    #[default]
    Counter,
    /// Store-managed sequence; safe with several processes sharing one store.
    Sequence,
}

impl FromStr for IdStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "counter" => Ok(Self::Counter),
            "sequence" => Ok(Self::Sequence),
            other => Err(format!(
                "ID_STRATEGY must be 'counter' or 'sequence', got '{}'",
                other
            )),
        }
    }
}

/// Service owning link creation and code resolution.
///
/// Codes are never generated independently: a link's code is always
/// `codec.encode(id)`, so code uniqueness follows from identifier uniqueness.
///
/// # Resolution failures
///
/// Undecodable codes, unknown identifiers and soft-deleted links all surface
/// as the same [`AppError::NotFound`]. The distinction is only logged.
pub struct LinkService<L: LinkRepository + ?Sized> {
    repository: Arc<L>,
    codec: Codec,
    strategy: IdStrategy,
    base_url: String,
    /// Next identifier to hand out; `None` until the store has been counted.
    next_id: Mutex<Option<i64>>,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service.
    pub fn new(
        repository: Arc<L>,
        codec: Codec,
        strategy: IdStrategy,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            codec,
            strategy,
            base_url: base_url.into(),
            next_id: Mutex::new(None),
        }
    }

    /// Stores a new link for `source` and returns it with its public code.
    ///
    /// With [`IdStrategy::Counter`] the counter is read, used and advanced
    /// under one lock, and only advanced once the insert succeeded. An
    /// identifier the store reports as taken is skipped.
    ///
    /// # Errors
    ///
    /// Store failures are returned as produced by the repository:
    /// [`AppError::Internal`] when the store is unavailable. With
    /// [`IdStrategy::Sequence`], [`AppError::Conflict`] if the sequence
    /// hands out an identifier that is already stored.
    pub async fn create(&self, source: String) -> Result<Link, AppError> {
        let link = match self.strategy {
            IdStrategy::Sequence => {
                let id = self.repository.next_sequence_value().await?;
                self.insert(id, source).await?
            }
            IdStrategy::Counter => self.create_with_counter(source).await?,
        };

        info!(id = link.id, code = %link.code, "Link created");
        metrics::counter!("links_created_total").increment(1);

        Ok(link)
    }

    /// Resolves a public code to its live link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code does not decode, or no live
    /// link has the decoded identifier. Returns [`AppError::Internal`] on store
    /// errors.
    pub async fn resolve(&self, code: &str) -> Result<Link, AppError> {
        let outcome = self.lookup(code).await;

        let label = match &outcome {
            Ok(_) => "found",
            Err(AppError::NotFound) => "not_found",
            Err(_) => "error",
        };
        metrics::counter!("link_resolutions_total", "outcome" => label).increment(1);

        outcome
    }

    /// Soft-deletes the link behind `code`.
    ///
    /// Removing an already removed link yields [`AppError::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] under the same conditions as
    /// [`Self::resolve`]. Returns [`AppError::Internal`] on store errors.
    pub async fn remove(&self, code: &str) -> Result<(), AppError> {
        let Some(id) = self.decode(code) else {
            return Err(AppError::NotFound);
        };

        if !self.repository.soft_delete(id).await? {
            debug!(id, "No live link to remove");
            return Err(AppError::NotFound);
        }

        info!(id, code, "Link removed");
        metrics::counter!("links_removed_total").increment(1);

        Ok(())
    }

    /// Counts every link ever created. Used as a storage liveness probe.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn count_links(&self) -> Result<i64, AppError> {
        self.repository.count_all().await
    }

    /// Builds the public short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }

    async fn lookup(&self, code: &str) -> Result<Link, AppError> {
        let Some(id) = self.decode(code) else {
            return Err(AppError::NotFound);
        };

        match self.repository.find_by_id(id).await? {
            Some(link) if !link.is_deleted() => Ok(link),
            _ => {
                debug!(id, "Decoded code has no live link");
                Err(AppError::NotFound)
            }
        }
    }

    async fn create_with_counter(&self, source: String) -> Result<Link, AppError> {
        let mut next_id = self.next_id.lock().await;

        let mut id = match *next_id {
            Some(id) => id,
            None => {
                let existing = self.repository.count_all().await?;
                info!(existing, "Identifier counter initialised");
                existing + 1
            }
        };
        *next_id = Some(id);

        loop {
            match self.insert(id, source.clone()).await {
                Ok(link) => {
                    *next_id = Some(id + 1);
                    return Ok(link);
                }
                Err(AppError::Conflict { .. }) => {
                    warn!(id, "Identifier already stored, skipping");
                    id += 1;
                    *next_id = Some(id);
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn insert(&self, id: i64, source: String) -> Result<Link, AppError> {
        let code = self.encode(id)?;
        self.repository
            .create(NewLink { id, code, source })
            .await
    }

    fn encode(&self, id: i64) -> Result<String, AppError> {
        let id = u64::try_from(id)
            .map_err(|_| AppError::internal(format!("Identifier out of range: {}", id)))?;
        Ok(self.codec.encode(id))
    }

    fn decode(&self, code: &str) -> Option<i64> {
        match self.codec.decode(code) {
            Ok(id) => i64::try_from(id).ok(),
            Err(e) => {
                debug!(code, error = %e, "Code rejected by codec");
                None
            }
        }
    }
}
