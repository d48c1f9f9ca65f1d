//! PostgreSQL store. Each method runs exactly one parameterized statement against the pool.

use super::Store;
use crate::error::AppError;
use crate::model::{
    InventoryLevel, InventoryUpdate, LowStockSales, Order, Product, ProductInput, RestockItem, ReviewView, User,
    UserRecord, EXPIRED,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

const LIST_USERS: &str = "SELECT user_id, name, email FROM users ORDER BY user_id";
const INSERT_USER: &str =
    "INSERT INTO users (name, email, password_hash) VALUES ($1, $2, $3) RETURNING user_id";
const UPDATE_USER: &str = "UPDATE users SET name = $1, email = $2, password_hash = $3 WHERE user_id = $4";
const DELETE_USER: &str = "DELETE FROM users WHERE user_id = $1";

const LIST_PRODUCTS: &str =
    "SELECT product_id, name, category, brand, price, description FROM products ORDER BY product_id";
const INSERT_PRODUCT: &str = "INSERT INTO products (name, category, brand, price, description) \
     VALUES ($1, $2, $3, $4, $5) RETURNING product_id";
const UPDATE_PRODUCT: &str = "UPDATE products SET name = $1, category = $2, brand = $3, price = $4, description = $5 \
     WHERE product_id = $6";
const DELETE_PRODUCT: &str = "DELETE FROM products WHERE product_id = $1";

const REVIEWS_FOR_PRODUCT: &str = r#"
    SELECT r.review_id, r.rating, r.review_description, r.date_posted, u.name AS customer_name
    FROM reviews r
    JOIN users u ON u.user_id = r.customer_id
    WHERE r.product_id = $1
    ORDER BY r.date_posted DESC, r.review_id DESC
"#;

const RESTOCK_CANDIDATES: &str = r#"
    SELECT p.product_id, p.name AS product_name, p.category, p.brand, p.price,
           i.location, i.quantity, i.restock_threshold
    FROM inventory i
    JOIN products p ON p.product_id = i.product_id
    WHERE i.restock_threshold > i.quantity
    ORDER BY p.product_id, i.location
"#;
const UPDATE_INVENTORY: &str = "UPDATE inventory SET quantity = $1, restock_threshold = COALESCE($2, restock_threshold) \
     WHERE product_id = $3 AND location = $4";
const ADD_INVENTORY: &str = "UPDATE inventory SET quantity = quantity + $1 \
     WHERE product_id = $2 AND location = $3 RETURNING product_id, location, quantity";

const ORDERS_BEFORE: &str = "SELECT order_id, order_date, order_status, user_id FROM orders \
     WHERE order_date < $1 ORDER BY order_date, order_id";
const EXPIRE_ORDER: &str = "UPDATE orders SET order_status = $1 WHERE order_id = $2";
const EXPIRE_ORDERS_BEFORE: &str = "UPDATE orders SET order_status = $1 WHERE order_date < $2";

// Stock and sales are aggregated separately so the inventory x order-item join cannot double count.
// A product qualifies when any one of its locations is under threshold.
const LOW_STOCK_SALES: &str = r#"
    WITH stock AS (
        SELECT product_id,
               SUM(quantity)::BIGINT AS current_stock,
               SUM(restock_threshold)::BIGINT AS restock_threshold,
               BOOL_OR(quantity < restock_threshold) AS needs_restock
        FROM inventory
        GROUP BY product_id
    ),
    sales AS (
        SELECT oi.product_id, SUM(oi.quantity)::BIGINT AS total_sold
        FROM order_items oi
        JOIN orders o ON o.order_id = oi.order_id
        WHERE o.order_status <> $1
        GROUP BY oi.product_id
    )
    SELECT p.product_id, p.name AS product_name, p.category, p.brand, p.price,
           s.current_stock, s.restock_threshold, sa.total_sold,
           (sa.total_sold * p.price)::DOUBLE PRECISION AS total_sales
    FROM products p
    JOIN stock s ON s.product_id = p.product_id
    JOIN sales sa ON sa.product_id = p.product_id
    WHERE s.needs_restock
    ORDER BY sa.total_sold DESC, p.product_id
"#;

/// SQLSTATE 22003 (numeric_value_out_of_range) comes from client-supplied amounts.
fn out_of_range_as_bad_request(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db) if db.code().as_deref() == Some("22003") => {
            AppError::BadRequest("amount pushes quantity out of range".into())
        }
        _ => AppError::Db(err),
    }
}

/// Store backed by a shared `PgPool`. Cloning shares the pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        tracing::debug!(sql = %LIST_USERS, "query");
        Ok(sqlx::query_as::<_, User>(LIST_USERS).fetch_all(&self.pool).await?)
    }

    async fn create_user(&self, user: &UserRecord) -> Result<i32, AppError> {
        tracing::debug!(sql = %INSERT_USER, name = %user.name, email = %user.email, "query");
        let id: i32 = sqlx::query_scalar(INSERT_USER)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .fetch_one(&self.pool)
            .await?;
        Ok(id)
    }

    async fn update_user(&self, user_id: i32, user: &UserRecord) -> Result<u64, AppError> {
        tracing::debug!(sql = %UPDATE_USER, user_id, name = %user.name, email = %user.email, "query");
        let result = sqlx::query(UPDATE_USER)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn delete_user(&self, user_id: i32) -> Result<u64, AppError> {
        tracing::debug!(sql = %DELETE_USER, user_id, "query");
        let result = sqlx::query(DELETE_USER).bind(user_id).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        tracing::debug!(sql = %LIST_PRODUCTS, "query");
        Ok(sqlx::query_as::<_, Product>(LIST_PRODUCTS).fetch_all(&self.pool).await?)
    }

    async fn create_product(&self, product: &ProductInput) -> Result<i32, AppError> {
        tracing::debug!(sql = %INSERT_PRODUCT, params = ?product, "query");
        let id: i32 = sqlx::query_scalar(INSERT_PRODUCT)
            .bind(&product.name)
            .bind(&product.category)
            .bind(&product.brand)
            .bind(product.price)
            .bind(&product.description)
            .fetch_one(&self.pool)
            .await?;
        Ok(id)
    }

    async fn update_product(&self, product_id: i32, product: &ProductInput) -> Result<u64, AppError> {
        tracing::debug!(sql = %UPDATE_PRODUCT, product_id, params = ?product, "query");
        let result = sqlx::query(UPDATE_PRODUCT)
            .bind(&product.name)
            .bind(&product.category)
            .bind(&product.brand)
            .bind(product.price)
            .bind(&product.description)
            .bind(product_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn delete_product(&self, product_id: i32) -> Result<u64, AppError> {
        tracing::debug!(sql = %DELETE_PRODUCT, product_id, "query");
        let result = sqlx::query(DELETE_PRODUCT).bind(product_id).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn reviews_for_product(&self, product_id: i32) -> Result<Vec<ReviewView>, AppError> {
        tracing::debug!(sql = %REVIEWS_FOR_PRODUCT, product_id, "query");
        Ok(sqlx::query_as::<_, ReviewView>(REVIEWS_FOR_PRODUCT)
            .bind(product_id)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn restock_candidates(&self) -> Result<Vec<RestockItem>, AppError> {
        tracing::debug!(sql = %RESTOCK_CANDIDATES, "query");
        Ok(sqlx::query_as::<_, RestockItem>(RESTOCK_CANDIDATES)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn update_inventory(
        &self,
        product_id: i32,
        location: &str,
        update: &InventoryUpdate,
    ) -> Result<u64, AppError> {
        tracing::debug!(sql = %UPDATE_INVENTORY, product_id, location, params = ?update, "query");
        let result = sqlx::query(UPDATE_INVENTORY)
            .bind(update.quantity)
            .bind(update.restock_threshold)
            .bind(product_id)
            .bind(location)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn add_inventory(
        &self,
        product_id: i32,
        location: &str,
        amount: i32,
    ) -> Result<Option<InventoryLevel>, AppError> {
        tracing::debug!(sql = %ADD_INVENTORY, product_id, location, amount, "query");
        sqlx::query_as::<_, InventoryLevel>(ADD_INVENTORY)
            .bind(amount)
            .bind(product_id)
            .bind(location)
            .fetch_optional(&self.pool)
            .await
            .map_err(out_of_range_as_bad_request)
    }

    async fn orders_before(&self, before: NaiveDate) -> Result<Vec<Order>, AppError> {
        tracing::debug!(sql = %ORDERS_BEFORE, %before, "query");
        Ok(sqlx::query_as::<_, Order>(ORDERS_BEFORE)
            .bind(before)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn expire_order(&self, order_id: i32) -> Result<u64, AppError> {
        tracing::debug!(sql = %EXPIRE_ORDER, order_id, "query");
        let result = sqlx::query(EXPIRE_ORDER)
            .bind(EXPIRED)
            .bind(order_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn expire_orders_before(&self, before: NaiveDate) -> Result<u64, AppError> {
        tracing::debug!(sql = %EXPIRE_ORDERS_BEFORE, %before, "query");
        let result = sqlx::query(EXPIRE_ORDERS_BEFORE)
            .bind(EXPIRED)
            .bind(before)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn low_stock_sales(&self) -> Result<Vec<LowStockSales>, AppError> {
        tracing::debug!(sql = %LOW_STOCK_SALES, "query");
        Ok(sqlx::query_as::<_, LowStockSales>(LOW_STOCK_SALES)
            .bind(EXPIRED)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}
