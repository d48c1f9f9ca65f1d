//! Product handlers: list, create, update, delete.

use super::json_body;
use crate::error::AppError;
use crate::model::{Product, ProductInput};
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

const PRODUCT_FIELDS: &[&str] = &["name", "category", "brand", "price", "description"];

#[utoipa::path(
    get,
    path = "/api/products",
    tag = "products",
    responses((status = 200, description = "All products", body = [Product]))
)]
pub async fn list_products(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(ok_many(state.store.list_products().await?))
}

#[utoipa::path(
    post,
    path = "/api/products",
    tag = "products",
    request_body = ProductInput,
    responses(
        (status = 201, description = "Product added with ID: N", body = String),
        (status = 400, description = "Missing or ill-typed field")
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let input: ProductInput = RequestValidator::parse(json_body(body)?, PRODUCT_FIELDS)?;
    let id = state.store.create_product(&input).await?;
    tracing::info!(product_id = id, name = %input.name, "product created");
    Ok(created_text(format!("Product added with ID: {}", id)))
}

#[utoipa::path(
    put,
    path = "/api/products/{productID}",
    tag = "products",
    params(("productID" = i32, Path, description = "Product id")),
    request_body = ProductInput,
    responses(
        (status = 200, description = "Product updated", body = String),
        (status = 400, description = "Missing or ill-typed field"),
        (status = 404, description = "No such product")
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(product_id) = path?;
    let input: ProductInput = RequestValidator::parse(json_body(body)?, PRODUCT_FIELDS)?;
    if state.store.update_product(product_id, &input).await? == 0 {
        tracing::warn!(product_id, "update matched no product");
        return Err(AppError::NotFound(format!("product {}", product_id)));
    }
    Ok(ok_text(format!("Product with ID {} updated successfully", product_id)))
}

#[utoipa::path(
    delete,
    path = "/api/products/{productID}",
    tag = "products",
    params(("productID" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted", body = String),
        (status = 404, description = "No such product")
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(product_id) = path?;
    if state.store.delete_product(product_id).await? == 0 {
        tracing::warn!(product_id, "delete matched no product");
        return Err(AppError::NotFound(format!("product {}", product_id)));
    }
    Ok(ok_text(format!("Product with ID {} deleted successfully", product_id)))
}
