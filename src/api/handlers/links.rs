//! Handlers for link management endpoints (create, show, delete).

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::DataEnvelope;
use crate::api::dto::link::{CreateLinkRequest, LinkResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Registers a source and issues its short code.
///
/// # Endpoint
///
/// `POST /links`
///
/// # Request Body
///
/// ```json
/// { "source": "https://example.com/some/long/path" }
/// ```
///
/// # Response
///
/// **201 Created**
///
/// ```json
/// {
///   "data": {
///     "id": 1,
///     "source": "https://example.com/some/long/path",
///     "code": "n4lm9",
///     "short_url": "http://localhost:3000/n4lm9",
///     "created_at": "2025-01-01T00:00:00Z",
///     "updated_at": "2025-01-01T00:00:00Z"
///   }
/// }
/// ```
///
/// # Errors
///
/// - **400 Bad Request**: malformed JSON or empty `source`
/// - **409 Conflict**: identifier or code already taken
/// - **500 Internal Server Error**: storage failure
pub async fn create_link_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<DataEnvelope<LinkResponse>>), AppError> {
    let Json(payload) = payload.map_err(|e| AppError::bad_request(e.body_text()))?;
    payload.validate()?;

    let link = state.link_service.create(payload.source).await?;

    Ok((
        StatusCode::CREATED,
        Json(DataEnvelope::new(state.link_response(link))),
    ))
}

/// Returns the live link behind a short code.
///
/// # Endpoint
///
/// `GET /links/{code}`
///
/// # Errors
///
/// Returns 404 Not Found with an empty body when the code does not decode,
/// is unknown, or belongs to a deleted link.
pub async fn show_link_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<DataEnvelope<LinkResponse>>, AppError> {
    let link = state.link_service.resolve(&code).await?;

    Ok(Json(DataEnvelope::new(state.link_response(link))))
}

/// Soft-deletes a link.
///
/// # Endpoint
///
/// `DELETE /links/{code}`
///
/// # Response Codes
///
/// - **204 No Content**: link deleted
/// - **404 Not Found**: no live link for the code
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<StatusCode, AppError> {
    state.link_service.remove(&code).await?;

    Ok(StatusCode::NO_CONTENT)
}
