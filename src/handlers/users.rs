//! User handlers: list, create, update, delete.

use super::json_body;
use crate::error::AppError;
use crate::model::{User, UserInput, UserRecord};
use crate::password::hash_password;
use crate::response::{created_text, ok_many, ok_text};
use crate::state::AppState;
use crate::validation::RequestValidator;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    response::IntoResponse,
    Json,
};
use serde_json::Value;

const USER_FIELDS: &[&str] = &["name", "email", "password"];

/// Validates the body and hashes the password on the blocking pool.
async fn to_record(body: Value) -> Result<UserRecord, AppError> {
    let UserInput { name, email, password } = RequestValidator::parse::<UserInput>(body, USER_FIELDS)?;
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(format!("password hashing task failed: {}", e)))??;
    Ok(UserRecord {
        name,
        email,
        password_hash,
    })
}

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    responses((status = 200, description = "All users, without credentials", body = [User]))
)]
pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(ok_many(state.store.list_users().await?))
}

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    request_body = UserInput,
    responses(
        (status = 201, description = "User added with ID: N", body = String),
        (status = 400, description = "Missing or ill-typed field")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let record = to_record(json_body(body)?).await?;
    let id = state.store.create_user(&record).await?;
    tracing::info!(user_id = id, "user created");
    Ok(created_text(format!("User added with ID: {}", id)))
}

#[utoipa::path(
    put,
    path = "/api/users/{userID}",
    tag = "users",
    params(("userID" = i32, Path, description = "User id")),
    request_body = UserInput,
    responses(
        (status = 200, description = "User updated", body = String),
        (status = 400, description = "Missing or ill-typed field"),
        (status = 404, description = "No such user")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(user_id) = path?;
    let record = to_record(json_body(body)?).await?;
    if state.store.update_user(user_id, &record).await? == 0 {
        tracing::warn!(user_id, "update matched no user");
        return Err(AppError::NotFound(format!("user {}", user_id)));
    }
    Ok(ok_text(format!("User with ID {} updated successfully", user_id)))
}

#[utoipa::path(
    delete,
    path = "/api/users/{userID}",
    tag = "users",
    params(("userID" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = String),
        (status = 404, description = "No such user")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(user_id) = path?;
    if state.store.delete_user(user_id).await? == 0 {
        tracing::warn!(user_id, "delete matched no user");
        return Err(AppError::NotFound(format!("user {}", user_id)));
    }
    Ok(ok_text(format!("User with ID {} deleted successfully", user_id)))
}
