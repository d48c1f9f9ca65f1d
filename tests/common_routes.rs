use axum::http::StatusCode;

mod common;
use common::*;

#[tokio::test]
async fn health_ready_and_version() {
    let (app, _) = setup_test_app();

    let (status, body) = send_json(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send_json(&app, "GET", "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "ok");

    let (status, body) = send_json(&app, "GET", "/version", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "stockroom");
}

#[tokio::test]
async fn serves_openapi_document() {
    let (app, _) = setup_test_app();
    let (status, doc) = send_json(&app, "GET", "/api/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/inventory/restock"]["get"].is_object());
    assert!(doc["paths"]["/api/orders/setexpire/{orderID}"]["put"].is_object());
}

#[tokio::test]
async fn unknown_routes_are_404() {
    let (app, _) = setup_test_app();
    let (status, _) = send(&app, "GET", "/api/widgets", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
