mod common;

use axum::http::{HeaderName, HeaderValue, Method};
use serde_json::{Value, json};

#[tokio::test]
async fn test_create_link_success() {
    let server = common::test_server();

    let response = server
        .post("/links")
        .json(&json!({ "source": "https://example.com/a" }))
        .await;

    assert_eq!(response.status_code(), 201);

    let json = response.json::<Value>();
    assert_eq!(json["data"]["id"], 1);
    assert_eq!(json["data"]["code"], "n4lm9");
    assert_eq!(json["data"]["source"], "https://example.com/a");
    assert_eq!(json["data"]["short_url"], "https://s.test/n4lm9");
    assert!(json["data"].get("created_at").is_some());
    assert!(json["data"].get("updated_at").is_some());
}

#[tokio::test]
async fn test_create_links_issue_consecutive_codes() {
    let server = common::test_server();

    let mut codes = Vec::new();
    for id in 1..=3 {
        let response = server
            .post("/links")
            .json(&json!({ "source": format!("https://example.com/{id}") }))
            .await;

        assert_eq!(response.status_code(), 201);
        let json = response.json::<Value>();
        assert_eq!(json["data"]["id"], id);
        codes.push(json["data"]["code"].as_str().unwrap().to_string());
    }

    assert_eq!(codes, vec!["n4lm9", "ZpAyp", "J4nyb"]);
}

#[tokio::test]
async fn test_create_link_accepts_opaque_source() {
    let server = common::test_server();

    let response = server
        .post("/links")
        .json(&json!({ "source": "not a url at all" }))
        .await;

    assert_eq!(response.status_code(), 201);
    assert_eq!(response.json::<Value>()["data"]["source"], "not a url at all");
}

#[tokio::test]
async fn test_create_link_empty_source() {
    let server = common::test_server();

    let response = server.post("/links").json(&json!({ "source": "" })).await;

    assert_eq!(response.status_code(), 400);
    assert!(response.json::<Value>()["error"].is_string());
}

#[tokio::test]
async fn test_create_link_missing_source() {
    let server = common::test_server();

    let response = server.post("/links").json(&json!({})).await;

    assert_eq!(response.status_code(), 400);
    assert!(response.json::<Value>()["error"].is_string());
}

#[tokio::test]
async fn test_create_link_malformed_body() {
    let server = common::test_server();

    let response = server
        .post("/links")
        .add_header(
            HeaderName::from_static("content-type"),
            HeaderValue::from_static("application/json"),
        )
        .bytes("{not json".into())
        .await;

    assert_eq!(response.status_code(), 400);
    assert!(response.json::<Value>()["error"].is_string());
}

#[tokio::test]
async fn test_create_link_storage_failure() {
    let server = common::failing_server();

    let response = server
        .post("/links")
        .json(&json!({ "source": "https://example.com" }))
        .await;

    assert_eq!(response.status_code(), 500);
    assert_eq!(
        response.json::<Value>()["error"],
        "Database error: connection refused"
    );
}

#[tokio::test]
async fn test_show_link_success() {
    let server = common::test_server();

    server
        .post("/links")
        .json(&json!({ "source": "https://example.com/show" }))
        .await;

    let response = server.get("/links/n4lm9").await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["data"]["id"], 1);
    assert_eq!(json["data"]["source"], "https://example.com/show");
}

#[tokio::test]
async fn test_show_link_unknown_code() {
    let server = common::test_server();

    // Valid code for identifier 3, never issued.
    let response = server.get("/links/J4nyb").await;

    assert_eq!(response.status_code(), 404);
    assert_eq!(response.text(), "");
}

#[tokio::test]
async fn test_show_link_undecodable_code() {
    let server = common::test_server();

    for code in ["zzzzz", "n4l-9", "a"] {
        let response = server.get(&format!("/links/{code}")).await;

        assert_eq!(response.status_code(), 404, "code {code}");
        assert_eq!(response.text(), "");
    }
}

#[tokio::test]
async fn test_delete_link() {
    let server = common::test_server();

    server
        .post("/links")
        .json(&json!({ "source": "https://example.com/delete" }))
        .await;

    let response = server.delete("/links/n4lm9").await;
    assert_eq!(response.status_code(), 204);

    let response = server.get("/links/n4lm9").await;
    assert_eq!(response.status_code(), 404);

    let response = server.delete("/links/n4lm9").await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_deleted_identifier_is_not_reissued() {
    let server = common::test_server();

    server
        .post("/links")
        .json(&json!({ "source": "https://example.com/1" }))
        .await;
    server.delete("/links/n4lm9").await;

    let response = server
        .post("/links")
        .json(&json!({ "source": "https://example.com/2" }))
        .await;

    assert_eq!(response.status_code(), 201);
    assert_eq!(response.json::<Value>()["data"]["code"], "ZpAyp");
}

#[tokio::test]
async fn test_cors_allow_origin_header() {
    let server = common::test_server();

    let response = server
        .get("/links/zzzzz")
        .add_header(
            HeaderName::from_static("origin"),
            HeaderValue::from_static("https://app.example.com"),
        )
        .await;

    assert_eq!(response.header("access-control-allow-origin"), "*");
}

#[tokio::test]
async fn test_cors_preflight() {
    let server = common::test_server();

    let response = server
        .method(Method::OPTIONS, "/links")
        .add_header(
            HeaderName::from_static("origin"),
            HeaderValue::from_static("https://app.example.com"),
        )
        .add_header(
            HeaderName::from_static("access-control-request-method"),
            HeaderValue::from_static("POST"),
        )
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("access-control-allow-origin"), "*");
    assert_eq!(
        response.header("access-control-allow-headers"),
        "content-type"
    );
}

#[tokio::test]
async fn test_cors_header_omitted_without_origin() {
    let server = common::test_server();

    let response = server.get("/links/zzzzz").await;

    assert!(
        response
            .headers()
            .get("access-control-allow-origin")
            .is_none()
    );
}
