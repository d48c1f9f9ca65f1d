//! OpenAPI document for the `/api` surface.

use crate::handlers::{inventory, orders, products, reports, reviews, users};
use crate::model::{
    InventoryLevel, InventoryUpdate, LowStockSales, Order, Product, ProductInput, RestockAmount, RestockItem,
    ReviewView, User, UserInput,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "stockroom", description = "Inventory and order management API"),
    paths(
        users::list_users,
        users::create_user,
        users::update_user,
        users::delete_user,
        products::list_products,
        products::create_product,
        products::update_product,
        products::delete_product,
        reviews::reviews_for_product,
        inventory::restock_list,
        inventory::update_inventory,
        inventory::restock_add,
        orders::orders_before,
        orders::expire_order,
        orders::expire_orders_before,
        reports::low_stock_sales,
    ),
    components(schemas(
        User,
        UserInput,
        Product,
        ProductInput,
        ReviewView,
        RestockItem,
        InventoryUpdate,
        RestockAmount,
        InventoryLevel,
        Order,
        LowStockSales,
    )),
    tags(
        (name = "users"),
        (name = "products"),
        (name = "reviews"),
        (name = "inventory"),
        (name = "orders"),
        (name = "reports")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_api_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/users",
            "/api/users/{userID}",
            "/api/products/{productID}",
            "/api/reviews/{productID}",
            "/api/inventory/restock",
            "/api/inventory/update/{productID}/{location}",
            "/api/orders/expire/{date}",
            "/api/reports/low-stock-sales",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
