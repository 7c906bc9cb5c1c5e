//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET    /{code}`        - Short link redirect
//! - `GET    /health`        - Health check (storage reachability)
//! - `POST   /links`         - Create a link
//! - `GET    /links/{code}`  - Show a link
//! - `DELETE /links/{code}`  - Soft-delete a link
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Configurable allowed origin
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{cors, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with all routes and middleware, without path
/// normalization.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `cors_allow_origin` - allowed CORS origin, `*` for any
pub fn router(state: AppState, cors_allow_origin: &str) -> Router {
    Router::new()
        .route("/{code}", get(redirect_handler))
        .route("/health", get(health_handler))
        .merge(api::routes::link_routes())
        .with_state(state)
        .layer(cors::layer(cors_allow_origin))
        .layer(tracing::layer())
}

/// Constructs the application router with trailing slashes trimmed before
/// routing.
pub fn app_router(state: AppState, cors_allow_origin: &str) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, cors_allow_origin))
}
