use crate::error::AppError;
use crate::model::LowStockSales;
use crate::response::ok_many;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

#[utoipa::path(
    get,
    path = "/api/reports/low-stock-sales",
    tag = "reports",
    responses((
        status = 200,
        description = "Under-threshold products with non-expired sales, best sellers first",
        body = [LowStockSales]
    ))
)]
pub async fn low_stock_sales(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(ok_many(state.store.low_stock_sales().await?))
}
