//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its stored source.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Responds with **301 Moved Permanently** and the source as `Location`.
///
/// # Errors
///
/// Returns 404 Not Found if the code does not decode or names no live link.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let link = state.link_service.resolve(&code).await?;

    Ok((
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, link.source)],
    ))
}
