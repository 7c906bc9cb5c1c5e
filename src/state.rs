//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::api::dto::link::LinkResponse;
use crate::application::services::LinkService;
use crate::domain::entities::Link;
use crate::domain::repositories::LinkRepository;

/// State shared across request handlers.
///
/// The registry is held behind a trait object so the same router serves
/// PostgreSQL and in-memory storage.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn LinkRepository>>,
}

impl AppState {
    /// Creates application state around a link service.
    pub fn new(link_service: Arc<LinkService<dyn LinkRepository>>) -> Self {
        Self { link_service }
    }

    /// Converts a stored link into its API representation.
    pub fn link_response(&self, link: Link) -> LinkResponse {
        let short_url = self.link_service.short_url(&link.code);
        LinkResponse::new(link, short_url)
    }
}
