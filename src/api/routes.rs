//! API route configuration.

use crate::api::handlers::{create_link_handler, delete_link_handler, show_link_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Link management routes.
///
/// # Endpoints
///
/// - `POST   /links`          - Register a source and issue its short code
/// - `GET    /links/{code}`   - Look up a link by short code
/// - `DELETE /links/{code}`   - Soft-delete a link
pub fn link_routes() -> Router<AppState> {
    Router::new()
        .route("/links", post(create_link_handler))
        .route(
            "/links/{code}",
            get(show_link_handler).delete(delete_link_handler),
        )
}
