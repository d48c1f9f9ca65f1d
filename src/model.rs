//! Row and payload types. JSON field names follow the browser client (`userID`, `restockThreshold`, ...).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Status written by the expire operations.
pub const EXPIRED: &str = "EXPIRED";

/// A user as returned by the API. The password hash never leaves the store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct User {
    #[serde(rename = "userID")]
    pub user_id: i32,
    pub name: String,
    pub email: String,
}

/// Body of `POST /api/users` and `PUT /api/users/:userID`.
#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct UserInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// User fields ready for storage; `password_hash` is an Argon2id PHC string.
#[derive(Clone, Debug)]
pub struct UserRecord {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Product {
    #[serde(rename = "productID")]
    pub product_id: i32,
    pub name: String,
    pub category: String,
    pub brand: String,
    pub price: f64,
    pub description: String,
}

/// Body of `POST /api/products` and `PUT /api/products/:productID`.
#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct ProductInput {
    pub name: String,
    pub category: String,
    pub brand: String,
    pub price: f64,
    pub description: String,
}

/// A review joined with its author's display name.
#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
pub struct ReviewView {
    #[serde(rename = "reviewID")]
    pub review_id: i32,
    pub rating: i32,
    #[serde(rename = "reviewDescription")]
    pub review_description: String,
    #[serde(rename = "datePosted")]
    pub date_posted: NaiveDate,
    #[serde(rename = "customerName")]
    pub customer_name: String,
}

/// An inventory location whose quantity is under its restock threshold, with product fields.
#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
pub struct RestockItem {
    #[serde(rename = "productID")]
    pub product_id: i32,
    #[serde(rename = "productName")]
    pub product_name: String,
    pub category: String,
    pub brand: String,
    pub price: f64,
    pub location: String,
    pub quantity: i32,
    #[serde(rename = "restockThreshold")]
    pub restock_threshold: i32,
}

/// Body of `PUT /api/inventory/update/:productID/:location`.
#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct InventoryUpdate {
    pub quantity: i32,
    #[serde(rename = "restockThreshold", default)]
    pub restock_threshold: Option<i32>,
}

/// Body of `PUT /api/inventory/restock/:productID/:location`.
#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct RestockAmount {
    pub amount: i32,
}

/// Inventory level after an atomic restock.
#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
pub struct InventoryLevel {
    #[serde(rename = "productID")]
    pub product_id: i32,
    pub location: String,
    pub quantity: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
pub struct Order {
    #[serde(rename = "orderID")]
    pub order_id: i32,
    #[serde(rename = "orderDate")]
    pub order_date: NaiveDate,
    #[serde(rename = "orderStatus")]
    pub order_status: String,
    #[serde(rename = "userID")]
    pub user_id: i32,
}

/// One row of the low-stock sales report, aggregated per product.
#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
pub struct LowStockSales {
    #[serde(rename = "productID")]
    pub product_id: i32,
    #[serde(rename = "productName")]
    pub product_name: String,
    pub category: String,
    pub brand: String,
    pub price: f64,
    #[serde(rename = "currentStock")]
    pub current_stock: i64,
    #[serde(rename = "restockThreshold")]
    pub restock_threshold: i64,
    #[serde(rename = "totalSold")]
    pub total_sold: i64,
    #[serde(rename = "totalSales")]
    pub total_sales: f64,
}
