//! DTOs for link endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Link;

/// Request body for `POST /links`.
///
/// `source` is stored as given; it is not parsed or normalized.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    #[validate(length(min = 1, max = 8192, message = "source must be 1-8192 characters"))]
    pub source: String,
}

/// JSON representation of a stored link.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: i64,
    pub source: String,
    pub code: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LinkResponse {
    pub fn new(link: Link, short_url: String) -> Self {
        Self {
            id: link.id,
            source: link.source,
            code: link.code,
            short_url,
            created_at: link.created_at,
            updated_at: link.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_source_is_rejected() {
        let request = CreateLinkRequest {
            source: String::new(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_non_url_source_is_accepted() {
        let request = CreateLinkRequest {
            source: "not even a url".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_link_response_serialization() {
        let now = Utc::now();
        let link = Link::new(
            1,
            "n4lm9".to_string(),
            "https://example.com".to_string(),
            now,
            now,
            None,
        );

        let json =
            serde_json::to_value(LinkResponse::new(link, "https://s.test/n4lm9".into())).unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["code"], "n4lm9");
        assert_eq!(json["source"], "https://example.com");
        assert_eq!(json["short_url"], "https://s.test/n4lm9");
        assert!(json.get("deleted_at").is_none());
    }
}
