//! Cross-origin resource sharing for browser clients.
//!
//! `Access-Control-Allow-Origin` is only added to responses for requests
//! that carry an `Origin` header. Requests without one are not cross-origin,
//! so the header is left out for them.

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Creates a CORS layer for the configured origin.
///
/// `*` allows any origin. Any other value is matched exactly. A value that
/// is not a valid header allows no cross-origin callers.
///
/// Only `Content-Type` is accepted as a request header.
pub fn layer(allow_origin: &str) -> CorsLayer {
    let origin = if allow_origin == "*" {
        AllowOrigin::from(Any)
    } else {
        match HeaderValue::from_str(allow_origin) {
            Ok(value) => AllowOrigin::exact(value),
            Err(e) => {
                ::tracing::error!("Invalid CORS origin '{}': {}", allow_origin, e);
                AllowOrigin::list(Vec::<HeaderValue>::new())
            }
        }
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}
