mod common;

use serde_json::{Value, json};

#[tokio::test]
async fn test_health_endpoint_success() {
    let server = common::test_server();

    server
        .post("/links")
        .json(&json!({ "source": "https://example.com" }))
        .await;

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["storage"]["status"], "ok");
    assert_eq!(json["checks"]["storage"]["message"], "1 links stored");
}

#[tokio::test]
async fn test_health_endpoint_structure() {
    let server = common::test_server();

    let response = server.get("/health").await;

    let json = response.json::<Value>();

    assert!(json.get("status").is_some());
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert!(json["checks"].get("storage").is_some());
}

#[tokio::test]
async fn test_health_endpoint_degraded() {
    let server = common::failing_server();

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 503);

    let json = response.json::<Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["storage"]["status"], "error");
}
