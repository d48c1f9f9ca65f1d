use axum::http::StatusCode;
use serde_json::json;

mod common;
use common::*;

#[tokio::test]
async fn created_user_is_listed_and_count_grows_by_one() {
    let (app, _) = setup_test_app();
    let (_, before) = send_json(&app, "GET", "/api/users", None).await;
    let before = before.as_array().unwrap().len();

    let (status, text) = send_text(
        &app,
        "POST",
        "/api/users",
        Some(json!({"name": "Dana", "email": "dana@example.com", "password": "s3cret"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(text.starts_with("User added with ID: "));
    let id = created_id(&text);

    let (status, users) = send_json(&app, "GET", "/api/users", None).await;
    assert_eq!(status, StatusCode::OK);
    let users = users.as_array().unwrap();
    assert_eq!(users.len(), before + 1);
    let dana = users.iter().find(|u| u["userID"] == id).unwrap();
    assert_eq!(dana["name"], "Dana");
    assert_eq!(dana["email"], "dana@example.com");
}

#[tokio::test]
async fn passwords_are_hashed_and_never_listed() {
    let (app, store) = setup_test_app();
    let (_, text) = send_text(
        &app,
        "POST",
        "/api/users",
        Some(json!({"name": "Eli", "email": "eli@example.com", "password": "plain-text"})),
    )
    .await;
    let id = created_id(&text);

    let (_, users) = send_json(&app, "GET", "/api/users", None).await;
    assert!(users[0].get("password").is_none());
    assert!(!users.to_string().contains("plain-text"));

    let hash = store.password_hash(id).unwrap().unwrap();
    assert_ne!(hash, "plain-text");
    assert!(stockroom::password::verify_password("plain-text", &hash));
}

#[tokio::test]
async fn create_user_requires_every_field() {
    let (app, _) = setup_test_app();
    let (status, body) = send_json(&app, "POST", "/api/users", Some(json!({"name": "NoEmail"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "bad request: email is required");

    let (_, users) = send_json(&app, "GET", "/api/users", None).await;
    assert!(users.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn update_and_delete_user() {
    let (app, _) = setup_test_app();
    let (_, text) = send_text(
        &app,
        "POST",
        "/api/users",
        Some(json!({"name": "Fay", "email": "fay@example.com", "password": "pw"})),
    )
    .await;
    let id = created_id(&text);

    let (status, _) = send_text(
        &app,
        "PUT",
        &format!("/api/users/{}", id),
        Some(json!({"name": "Fay R.", "email": "fay@corp.example", "password": "pw2"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, users) = send_json(&app, "GET", "/api/users", None).await;
    assert_eq!(users[0]["name"], "Fay R.");

    let (status, _) = send_text(&app, "DELETE", &format!("/api/users/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send_text(&app, "DELETE", &format!("/api/users/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_user_updates_are_404() {
    let (app, _) = setup_test_app();
    let (status, body) = send_json(
        &app,
        "PUT",
        "/api/users/999",
        Some(json!({"name": "Ghost", "email": "ghost@example.com", "password": "boo"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn deleting_nonexistent_ids_is_always_404() {
    let (app, _) = setup_test_app();
    for uri in ["/api/users/1", "/api/users/424242", "/api/products/1", "/api/products/77"] {
        let (status, _) = send_text(&app, "DELETE", uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
    }
}

#[tokio::test]
async fn widget_product_round_trip() {
    let (app, _) = setup_test_app();
    let (status, text) = send_text(
        &app,
        "POST",
        "/api/products",
        Some(json!({"name": "Widget", "category": "Tools", "brand": "Acme", "price": 9.99, "description": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(text.starts_with("Product added with ID: "));
    let id = created_id(&text);

    let (status, products) = send_json(&app, "GET", "/api/products", None).await;
    assert_eq!(status, StatusCode::OK);
    let widget = products
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["productID"] == id)
        .unwrap();
    assert_eq!(widget["name"], "Widget");
    assert_eq!(widget["price"], 9.99);
}

#[tokio::test]
async fn product_price_must_be_a_number() {
    let (app, _) = setup_test_app();
    let (status, _) = send_json(
        &app,
        "POST",
        "/api/products",
        Some(json!({"name": "Widget", "category": "Tools", "brand": "Acme", "price": "9.99", "description": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_product_then_delete() {
    let (app, _) = setup_test_app();
    let (_, text) = send_text(
        &app,
        "POST",
        "/api/products",
        Some(json!({"name": "Saw", "category": "Tools", "brand": "Forge", "price": 20.0, "description": ""})),
    )
    .await;
    let id = created_id(&text);

    let (status, _) = send_text(
        &app,
        "PUT",
        &format!("/api/products/{}", id),
        Some(json!({"name": "Saw", "category": "Tools", "brand": "Forge", "price": 18.5, "description": "sale"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, products) = send_json(&app, "GET", "/api/products", None).await;
    assert_eq!(products[0]["price"], 18.5);
    assert_eq!(products[0]["description"], "sale");

    let (status, _) = send_text(
        &app,
        "PUT",
        "/api/products/9999",
        Some(json!({"name": "Saw", "category": "Tools", "brand": "Forge", "price": 1.0, "description": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send_text(&app, "DELETE", &format!("/api/products/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, products) = send_json(&app, "GET", "/api/products", None).await;
    assert!(products.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn malformed_json_is_reported_as_such() {
    let (app, _) = setup_test_app();
    let (status, body) = send_raw(&app, "POST", "/api/products", "application/json", r#"{"name": "W", oops"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");
    let message = body["error"]["message"].as_str().unwrap();
    assert!(!message.contains("is required"), "{}", message);

    let (status, body) = send_raw(&app, "POST", "/api/users", "text/plain", r#"{"name": "Dana"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!body["error"]["message"].as_str().unwrap().contains("is required"));

    let (_, products) = send_json(&app, "GET", "/api/products", None).await;
    assert_eq!(products, json!([]));
}

#[tokio::test]
async fn non_numeric_ids_get_the_json_error_shape() {
    let (app, _) = setup_test_app();
    for (method, uri) in [
        ("DELETE", "/api/users/abc"),
        ("DELETE", "/api/products/abc"),
        ("GET", "/api/reviews/abc"),
        ("PUT", "/api/orders/setexpire/abc"),
    ] {
        let (status, body) = send_json(&app, method, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{} {}", method, uri);
        assert_eq!(body["error"]["code"], "bad_request", "{} {}", method, uri);
    }
}
