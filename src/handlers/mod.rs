//! HTTP handlers, one module per resource. Each handler issues a single store call.

pub mod inventory;
pub mod orders;
pub mod products;
pub mod reports;
pub mod reviews;
pub mod users;

use crate::error::AppError;
use axum::{extract::rejection::JsonRejection, Json};
use serde_json::Value;

/// Unwraps the JSON body. Syntax errors, a wrong content type and oversized bodies are 400s.
pub(crate) fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, AppError> {
    let Json(value) = body?;
    Ok(value)
}
