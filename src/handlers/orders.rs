//! Order handlers: list before a date, expire one, expire all before a date.

use crate::error::AppError;
use crate::model::Order;
use crate::response::{ok_many, ok_text};
use crate::state::AppState;
use axum::{
    extract::{rejection::PathRejection, Path, State},
    response::IntoResponse,
};
use chrono::NaiveDate;

fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("invalid date '{}', expected YYYY-MM-DD", raw)))
}

#[utoipa::path(
    get,
    path = "/api/orders/before/{date}",
    tag = "orders",
    params(("date" = String, Path, description = "Cutoff date, YYYY-MM-DD (exclusive)")),
    responses(
        (status = 200, description = "Orders dated strictly before the cutoff", body = [Order]),
        (status = 400, description = "Malformed date")
    )
)]
pub async fn orders_before(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(date) = path?;
    let before = parse_date(&date)?;
    Ok(ok_many(state.store.orders_before(before).await?))
}

/// Repeating this on an expired order is still a 200.
#[utoipa::path(
    put,
    path = "/api/orders/setexpire/{orderID}",
    tag = "orders",
    params(("orderID" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order marked EXPIRED", body = String),
        (status = 404, description = "No such order")
    )
)]
pub async fn expire_order(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(order_id) = path?;
    if state.store.expire_order(order_id).await? == 0 {
        tracing::warn!(order_id, "expire matched no order");
        return Err(AppError::NotFound(format!("order {}", order_id)));
    }
    Ok(ok_text(format!("Order {} marked as EXPIRED", order_id)))
}

#[utoipa::path(
    put,
    path = "/api/orders/expire/{date}",
    tag = "orders",
    params(("date" = String, Path, description = "Cutoff date, YYYY-MM-DD (exclusive)")),
    responses(
        (status = 200, description = "Count of orders marked EXPIRED", body = String),
        (status = 400, description = "Malformed date"),
        (status = 404, description = "No orders before the cutoff")
    )
)]
pub async fn expire_orders_before(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(date) = path?;
    let before = parse_date(&date)?;
    let affected = state.store.expire_orders_before(before).await?;
    if affected == 0 {
        tracing::warn!(%before, "no orders to expire");
        return Err(AppError::NotFound(format!("orders before {}", before)));
    }
    tracing::info!(%before, affected, "orders expired");
    Ok(ok_text(format!("{} orders marked as EXPIRED", affected)))
}
