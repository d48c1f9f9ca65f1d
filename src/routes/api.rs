//! Resource routes under `/api`. Path parameters keep the client's names.

use crate::handlers::{inventory, orders, products, reports, reviews, users};
use crate::state::AppState;
use axum::{
    routing::{get, put},
    Router,
};

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/:user_id", put(users::update_user).delete(users::delete_user))
        .route("/products", get(products::list_products).post(products::create_product))
        .route(
            "/products/:product_id",
            put(products::update_product).delete(products::delete_product),
        )
        .route("/reviews/:product_id", get(reviews::reviews_for_product))
        .route("/inventory/restock", get(inventory::restock_list))
        .route("/inventory/update/:product_id/:location", put(inventory::update_inventory))
        .route("/inventory/restock/:product_id/:location", put(inventory::restock_add))
        .route("/orders/before/:date", get(orders::orders_before))
        .route("/orders/setexpire/:order_id", put(orders::expire_order))
        .route("/orders/expire/:date", put(orders::expire_orders_before))
        .route("/reports/low-stock-sales", get(reports::low_stock_sales))
        .with_state(state)
}
