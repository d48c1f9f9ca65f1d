use crate::error::AppError;
use crate::model::ReviewView;
use crate::response::ok_many;
use crate::state::AppState;
use axum::{
    extract::{rejection::PathRejection, Path, State},
    response::IntoResponse,
};

#[utoipa::path(
    get,
    path = "/api/reviews/{productID}",
    tag = "reviews",
    params(("productID" = i32, Path, description = "Product id")),
    responses((status = 200, description = "Reviews with author names, newest first", body = [ReviewView]))
)]
pub async fn reviews_for_product(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(product_id) = path?;
    Ok(ok_many(state.store.reviews_for_product(product_id).await?))
}
