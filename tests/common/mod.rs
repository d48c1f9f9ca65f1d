//! Shared helpers: router over a fresh in-memory store and one-shot request plumbing.
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use stockroom::{build_router, AppConfig, AppState, MemoryStore};
use tower::ServiceExt;

/// Router plus a handle on its store for seeding rows that have no create endpoint.
pub fn setup_test_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState {
        store: store.clone(),
    };
    let app = build_router(state, &AppConfig::default()).unwrap();
    (app, store)
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("Content-Type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

/// Sends `body` verbatim, for payloads that are not valid JSON.
pub async fn send_raw(app: &Router, method: &str, uri: &str, content_type: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", content_type)
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

pub async fn send_json(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub async fn send_text(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, String) {
    let (status, bytes) = send(app, method, uri, body).await;
    (status, String::from_utf8(bytes).unwrap())
}

/// Parses the trailing id out of "... added with ID: N".
pub fn created_id(text: &str) -> i32 {
    text.rsplit(' ').next().unwrap().parse().unwrap()
}
