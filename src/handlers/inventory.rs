//! Inventory handlers: restock listing, absolute update, atomic increment.

use super::json_body;
use crate::error::AppError;
use crate::model::{InventoryLevel, InventoryUpdate, RestockAmount, RestockItem};
use crate::response::{ok_many, ok_one, ok_text};
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

#[utoipa::path(
    get,
    path = "/api/inventory/restock",
    tag = "inventory",
    responses((status = 200, description = "Locations where restockThreshold > quantity", body = [RestockItem]))
)]
pub async fn restock_list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(ok_many(state.store.restock_candidates().await?))
}

/// Sets the quantity outright. Clients that compute `current + n` themselves race with each other;
/// `restock_add` does the addition in the database instead.
#[utoipa::path(
    put,
    path = "/api/inventory/update/{productID}/{location}",
    tag = "inventory",
    params(
        ("productID" = i32, Path, description = "Product id"),
        ("location" = String, Path, description = "Storage location")
    ),
    request_body = InventoryUpdate,
    responses(
        (status = 200, description = "Inventory updated", body = String),
        (status = 400, description = "quantity missing or not an integer"),
        (status = 404, description = "No inventory row for this product and location")
    )
)]
pub async fn update_inventory(
    State(state): State<AppState>,
    path: Result<Path<(i32, String)>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path((product_id, location)) = path?;
    let update: InventoryUpdate = RequestValidator::parse(json_body(body)?, &["quantity"])?;
    if state.store.update_inventory(product_id, &location, &update).await? == 0 {
        tracing::warn!(product_id, location = %location, "inventory update matched no row");
        return Err(AppError::NotFound(format!("inventory for product {} at {}", product_id, location)));
    }
    Ok(ok_text(format!(
        "Inventory updated for product {} at {}",
        product_id, location
    )))
}

#[utoipa::path(
    put,
    path = "/api/inventory/restock/{productID}/{location}",
    tag = "inventory",
    params(
        ("productID" = i32, Path, description = "Product id"),
        ("location" = String, Path, description = "Storage location")
    ),
    request_body = RestockAmount,
    responses(
        (status = 200, description = "New stock level", body = InventoryLevel),
        (status = 400, description = "amount missing or not an integer"),
        (status = 404, description = "No inventory row for this product and location")
    )
)]
pub async fn restock_add(
    State(state): State<AppState>,
    path: Result<Path<(i32, String)>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path((product_id, location)) = path?;
    let RestockAmount { amount } = RequestValidator::parse::<RestockAmount>(json_body(body)?, &["amount"])?;
    let level = state
        .store
        .add_inventory(product_id, &location, amount)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("inventory for product {} at {}", product_id, location)))?;
    tracing::info!(product_id, location = %location, amount, quantity = level.quantity, "restocked");
    Ok(ok_one(level))
}
