#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use link_shortener::application::services::{IdStrategy, LinkService};
use link_shortener::domain::codec::Codec;
use link_shortener::domain::entities::{Link, NewLink};
use link_shortener::domain::repositories::LinkRepository;
use link_shortener::error::AppError;
use link_shortener::infrastructure::persistence::MemoryLinkRepository;
use link_shortener::routes::router;
use link_shortener::state::AppState;
use std::sync::Arc;

pub const SALT: &str = "abc";
pub const MIN_LENGTH: usize = 5;
pub const BASE_URL: &str = "https://s.test";

pub fn test_codec() -> Codec {
    Codec::new(SALT, MIN_LENGTH).unwrap()
}

pub fn state_with(repository: Arc<dyn LinkRepository>) -> AppState {
    let service = LinkService::new(repository, test_codec(), IdStrategy::Counter, BASE_URL);
    AppState::new(Arc::new(service))
}

pub fn create_test_state() -> AppState {
    state_with(Arc::new(MemoryLinkRepository::new()))
}

/// Full application router over an empty in-memory store.
pub fn test_server() -> TestServer {
    TestServer::new(router(create_test_state(), "*")).unwrap()
}

pub fn failing_server() -> TestServer {
    TestServer::new(router(state_with(Arc::new(FailingLinkRepository)), "*")).unwrap()
}

/// Repository whose every call fails as if the database were down.
pub struct FailingLinkRepository;

fn unavailable<T>() -> Result<T, AppError> {
    Err(AppError::internal("Database error: connection refused"))
}

#[async_trait]
impl LinkRepository for FailingLinkRepository {
    async fn create(&self, _new_link: NewLink) -> Result<Link, AppError> {
        unavailable()
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<Link>, AppError> {
        unavailable()
    }

    async fn find_by_code(&self, _code: &str) -> Result<Option<Link>, AppError> {
        unavailable()
    }

    async fn count_all(&self) -> Result<i64, AppError> {
        unavailable()
    }

    async fn count_deleted(&self) -> Result<i64, AppError> {
        unavailable()
    }

    async fn soft_delete(&self, _id: i64) -> Result<bool, AppError> {
        unavailable()
    }

    async fn next_sequence_value(&self) -> Result<i64, AppError> {
        unavailable()
    }
}
