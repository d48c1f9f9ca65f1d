//! Data access: one trait method per SQL statement, injected into handlers through `AppState`.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::error::AppError;
use crate::model::{
    InventoryLevel, InventoryUpdate, LowStockSales, Order, Product, ProductInput, RestockItem, ReviewView, User,
    UserRecord,
};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Every write returns the number of affected rows so callers can report "not found" on zero.
#[async_trait]
pub trait Store: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>, AppError>;
    /// Insert a user and return the generated `userID`.
    async fn create_user(&self, user: &UserRecord) -> Result<i32, AppError>;
    async fn update_user(&self, user_id: i32, user: &UserRecord) -> Result<u64, AppError>;
    async fn delete_user(&self, user_id: i32) -> Result<u64, AppError>;

    async fn list_products(&self) -> Result<Vec<Product>, AppError>;
    /// Insert a product and return the generated `productID`.
    async fn create_product(&self, product: &ProductInput) -> Result<i32, AppError>;
    async fn update_product(&self, product_id: i32, product: &ProductInput) -> Result<u64, AppError>;
    async fn delete_product(&self, product_id: i32) -> Result<u64, AppError>;

    /// Reviews for one product with author names, newest first.
    async fn reviews_for_product(&self, product_id: i32) -> Result<Vec<ReviewView>, AppError>;

    /// Inventory rows where `restock_threshold > quantity`.
    async fn restock_candidates(&self) -> Result<Vec<RestockItem>, AppError>;
    /// Overwrite quantity (and the threshold when given) for one (product, location).
    async fn update_inventory(
        &self,
        product_id: i32,
        location: &str,
        update: &InventoryUpdate,
    ) -> Result<u64, AppError>;
    /// Add `amount` to the stored quantity in a single statement. `None` when no row matches.
    async fn add_inventory(
        &self,
        product_id: i32,
        location: &str,
        amount: i32,
    ) -> Result<Option<InventoryLevel>, AppError>;

    /// Orders with `order_date < before`, oldest first.
    async fn orders_before(&self, before: NaiveDate) -> Result<Vec<Order>, AppError>;
    async fn expire_order(&self, order_id: i32) -> Result<u64, AppError>;
    async fn expire_orders_before(&self, before: NaiveDate) -> Result<u64, AppError>;

    /// Under-threshold products with non-expired sales, best sellers first.
    async fn low_stock_sales(&self) -> Result<Vec<LowStockSales>, AppError>;

    /// Cheap round trip used by `GET /ready`.
    async fn ping(&self) -> Result<(), AppError>;
}
