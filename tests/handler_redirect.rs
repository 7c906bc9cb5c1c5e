mod common;

use serde_json::json;

#[tokio::test]
async fn test_redirect_success() {
    let server = common::test_server();

    server
        .post("/links")
        .json(&json!({ "source": "https://example.com/target" }))
        .await;

    let response = server.get("/n4lm9").await;

    assert_eq!(response.status_code(), 301);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_not_found() {
    let server = common::test_server();

    let response = server.get("/n4lm9").await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_redirect_invalid_code() {
    let server = common::test_server();

    server
        .post("/links")
        .json(&json!({ "source": "https://example.com/target" }))
        .await;

    let response = server.get("/zzzzz").await;

    assert_eq!(response.status_code(), 404);
    assert_eq!(response.text(), "");
}

#[tokio::test]
async fn test_redirect_deleted_link() {
    let server = common::test_server();

    server
        .post("/links")
        .json(&json!({ "source": "https://example.com/gone" }))
        .await;
    server.delete("/links/n4lm9").await;

    let response = server.get("/n4lm9").await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_redirect_storage_failure() {
    let server = common::failing_server();

    let response = server.get("/n4lm9").await;

    assert_eq!(response.status_code(), 500);
}
