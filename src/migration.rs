//! Bootstrap the database: create it if missing, create tables, optionally load demo rows.
//! Table order follows foreign-key dependencies.

use crate::error::AppError;
use crate::password::hash_password;
use crate::seed;
use sqlx::postgres::PgConnectOptions;
use sqlx::{ConnectOptions, PgPool};

const DDL: &[(&str, &str)] = &[
    (
        "users",
        r#"
        CREATE TABLE IF NOT EXISTS users (
            user_id SERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            password_hash TEXT NOT NULL
        )"#,
    ),
    (
        "products",
        r#"
        CREATE TABLE IF NOT EXISTS products (
            product_id SERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            category TEXT NOT NULL,
            brand TEXT NOT NULL,
            price DOUBLE PRECISION NOT NULL,
            description TEXT NOT NULL DEFAULT ''
        )"#,
    ),
    (
        "inventory",
        r#"
        CREATE TABLE IF NOT EXISTS inventory (
            product_id INTEGER NOT NULL REFERENCES products (product_id) ON DELETE CASCADE,
            location TEXT NOT NULL,
            quantity INTEGER NOT NULL DEFAULT 0,
            restock_threshold INTEGER NOT NULL DEFAULT 0,
            PRIMARY KEY (product_id, location)
        )"#,
    ),
    (
        "orders",
        r#"
        CREATE TABLE IF NOT EXISTS orders (
            order_id SERIAL PRIMARY KEY,
            order_date DATE NOT NULL,
            order_status TEXT NOT NULL,
            user_id INTEGER NOT NULL REFERENCES users (user_id) ON DELETE CASCADE
        )"#,
    ),
    (
        "order_items",
        r#"
        CREATE TABLE IF NOT EXISTS order_items (
            order_id INTEGER NOT NULL REFERENCES orders (order_id) ON DELETE CASCADE,
            product_id INTEGER NOT NULL REFERENCES products (product_id) ON DELETE CASCADE,
            quantity INTEGER NOT NULL,
            PRIMARY KEY (order_id, product_id)
        )"#,
    ),
    (
        "reviews",
        r#"
        CREATE TABLE IF NOT EXISTS reviews (
            review_id SERIAL PRIMARY KEY,
            product_id INTEGER NOT NULL REFERENCES products (product_id) ON DELETE CASCADE,
            customer_id INTEGER NOT NULL REFERENCES users (user_id) ON DELETE CASCADE,
            rating INTEGER NOT NULL,
            review_description TEXT NOT NULL DEFAULT '',
            date_posted DATE NOT NULL DEFAULT CURRENT_DATE
        )"#,
    ),
];

/// Create the target database through the `postgres` maintenance database if it does not exist.
pub async fn ensure_database_exists(options: &PgConnectOptions) -> Result<(), AppError> {
    let db_name = match options.get_database() {
        Some(name) if !name.is_empty() && name != "postgres" => name.to_string(),
        _ => return Ok(()),
    };
    let mut conn = options.clone().database("postgres").connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Create every table if missing. Idempotent.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    for (table, ddl) in DDL {
        tracing::debug!(table, "ensure table");
        sqlx::query(ddl).execute(pool).await?;
    }
    tracing::info!(tables = DDL.len(), "schema ready");
    Ok(())
}

/// Insert the demo dataset in one transaction, only when `products` is empty.
pub async fn seed_demo(pool: &PgPool) -> Result<bool, AppError> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products").fetch_one(pool).await?;
    if count > 0 {
        tracing::info!(products = count, "products present, skipping demo seed");
        return Ok(false);
    }
    let hash = hash_password(seed::DEMO_PASSWORD)?;
    let mut tx = pool.begin().await?;

    let mut user_ids = Vec::with_capacity(seed::USERS.len());
    for u in seed::USERS {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO users (name, email, password_hash) VALUES ($1, $2, $3) RETURNING user_id",
        )
        .bind(u.name)
        .bind(u.email)
        .bind(&hash)
        .fetch_one(&mut *tx)
        .await?;
        user_ids.push(id);
    }

    let mut product_ids = Vec::with_capacity(seed::PRODUCTS.len());
    for p in seed::PRODUCTS {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO products (name, category, brand, price, description) VALUES ($1, $2, $3, $4, $5) \
             RETURNING product_id",
        )
        .bind(p.name)
        .bind(p.category)
        .bind(p.brand)
        .bind(p.price)
        .bind(p.description)
        .fetch_one(&mut *tx)
        .await?;
        product_ids.push(id);
    }

    for i in seed::INVENTORY {
        sqlx::query("INSERT INTO inventory (product_id, location, quantity, restock_threshold) VALUES ($1, $2, $3, $4)")
            .bind(product_ids[i.product])
            .bind(i.location)
            .bind(i.quantity)
            .bind(i.restock_threshold)
            .execute(&mut *tx)
            .await?;
    }

    let mut order_ids = Vec::with_capacity(seed::ORDERS.len());
    for o in seed::ORDERS {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO orders (order_date, order_status, user_id) VALUES ($1, $2, $3) RETURNING order_id",
        )
        .bind(seed::date(o.date))
        .bind(o.status)
        .bind(user_ids[o.user])
        .fetch_one(&mut *tx)
        .await?;
        order_ids.push(id);
    }

    for i in seed::ORDER_ITEMS {
        sqlx::query("INSERT INTO order_items (order_id, product_id, quantity) VALUES ($1, $2, $3)")
            .bind(order_ids[i.order])
            .bind(product_ids[i.product])
            .bind(i.quantity)
            .execute(&mut *tx)
            .await?;
    }

    for r in seed::REVIEWS {
        sqlx::query(
            "INSERT INTO reviews (product_id, customer_id, rating, review_description, date_posted) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(product_ids[r.product])
        .bind(user_ids[r.customer])
        .bind(r.rating)
        .bind(r.description)
        .bind(seed::date(r.date))
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    tracing::info!(
        users = user_ids.len(),
        products = product_ids.len(),
        orders = order_ids.len(),
        "demo data seeded"
    );
    Ok(true)
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
