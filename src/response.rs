//! Response helpers. Writes answer with a plain-text message, reads with a bare JSON array.

use axum::{http::StatusCode, Json};
use serde::Serialize;

pub fn created_text(message: String) -> (StatusCode, String) {
    (StatusCode::CREATED, message)
}

pub fn ok_text(message: String) -> (StatusCode, String) {
    (StatusCode::OK, message)
}

/// Empty collections are a successful 200 with `[]`.
pub fn ok_many<T: Serialize>(data: Vec<T>) -> (StatusCode, Json<Vec<T>>) {
    (StatusCode::OK, Json(data))
}

pub fn ok_one<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}
