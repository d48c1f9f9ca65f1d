//! `PgStore` against a live Postgres. Runs only when `DATABASE_URL` is set; each test works in its own
//! schema and drops it afterwards.

use chrono::NaiveDate;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::str::FromStr;
use stockroom::model::{ProductInput, UserRecord, EXPIRED};
use stockroom::{apply_migrations, AppError, PgStore, Store};

struct TestDb {
    admin: PgPool,
    schema: String,
    store: PgStore,
    pool: PgPool,
}

impl TestDb {
    async fn connect(name: &str) -> Option<TestDb> {
        let Ok(url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set; skipping {}", name);
            return None;
        };
        let options = PgConnectOptions::from_str(&url).unwrap();
        let admin = PgPoolOptions::new()
            .max_connections(1)
            .connect_with(options.clone())
            .await
            .unwrap();
        let schema = format!("stockroom_{}_{}", name, std::process::id());
        sqlx::query(&format!("DROP SCHEMA IF EXISTS {} CASCADE", schema))
            .execute(&admin)
            .await
            .unwrap();
        sqlx::query(&format!("CREATE SCHEMA {}", schema))
            .execute(&admin)
            .await
            .unwrap();
        let pool = PgPoolOptions::new()
            .max_connections(4)
            .connect_with(options.options([("search_path", schema.as_str())]))
            .await
            .unwrap();
        apply_migrations(&pool).await.unwrap();
        Some(TestDb {
            admin,
            schema,
            store: PgStore::new(pool.clone()),
            pool,
        })
    }

    async fn user(&self, name: &str) -> i32 {
        self.store
            .create_user(&UserRecord {
                name: name.into(),
                email: format!("{}@example.com", name.to_lowercase()),
                password_hash: "unused".into(),
            })
            .await
            .unwrap()
    }

    async fn product(&self, name: &str, price: f64) -> i32 {
        self.store
            .create_product(&ProductInput {
                name: name.into(),
                category: "Tools".into(),
                brand: "Acme".into(),
                price,
                description: String::new(),
            })
            .await
            .unwrap()
    }

    async fn inventory(&self, product_id: i32, location: &str, quantity: i32, threshold: i32) {
        sqlx::query("INSERT INTO inventory (product_id, location, quantity, restock_threshold) VALUES ($1, $2, $3, $4)")
            .bind(product_id)
            .bind(location)
            .bind(quantity)
            .bind(threshold)
            .execute(&self.pool)
            .await
            .unwrap();
    }

    async fn order(&self, date: NaiveDate, status: &str, user_id: i32, items: &[(i32, i32)]) -> i32 {
        let order_id: i32 =
            sqlx::query_scalar("INSERT INTO orders (order_date, order_status, user_id) VALUES ($1, $2, $3) RETURNING order_id")
                .bind(date)
                .bind(status)
                .bind(user_id)
                .fetch_one(&self.pool)
                .await
                .unwrap();
        for &(product_id, quantity) in items {
            sqlx::query("INSERT INTO order_items (order_id, product_id, quantity) VALUES ($1, $2, $3)")
                .bind(order_id)
                .bind(product_id)
                .bind(quantity)
                .execute(&self.pool)
                .await
                .unwrap();
        }
        order_id
    }

    async fn teardown(self) {
        self.pool.close().await;
        sqlx::query(&format!("DROP SCHEMA {} CASCADE", self.schema))
            .execute(&self.admin)
            .await
            .unwrap();
    }
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn restock_is_atomic_and_overflow_is_a_client_error() {
    let Some(db) = TestDb::connect("restock").await else {
        return;
    };
    let drill = db.product("Drill", 50.0).await;
    db.inventory(drill, "A1", 2, 10).await;
    db.inventory(drill, "B1", 10, 10).await;

    let rows = db.store.restock_candidates().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].location, "A1");

    let mut tasks = Vec::new();
    for _ in 0..10 {
        let store = db.store.clone();
        tasks.push(tokio::spawn(async move { store.add_inventory(drill, "A1", 3).await }));
    }
    for t in tasks {
        t.await.unwrap().unwrap();
    }
    let level = db.store.add_inventory(drill, "A1", 0).await.unwrap().unwrap();
    assert_eq!(level.quantity, 32);
    assert!(db.store.restock_candidates().await.unwrap().is_empty());

    let err = db.store.add_inventory(drill, "A1", i32::MAX).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)), "{:?}", err);
    assert!(db.store.add_inventory(drill, "Z9", 1).await.unwrap().is_none());

    db.teardown().await;
}

#[tokio::test]
async fn low_stock_report_matches_any_short_location() {
    let Some(db) = TestDb::connect("report").await else {
        return;
    };
    let ann = db.user("Ann").await;
    let drill = db.product("Drill", 50.0).await;
    let tape = db.product("Tape", 2.0).await;
    let nails = db.product("Nails", 0.1).await;
    db.inventory(drill, "A1", 2, 10).await;
    db.inventory(drill, "B1", 100, 5).await;
    db.inventory(tape, "A2", 0, 10).await;
    db.inventory(nails, "A3", 500, 100).await;
    db.order(day(2024, 4, 1), "PLACED", ann, &[(drill, 3), (tape, 4), (nails, 1000)]).await;
    db.order(day(2023, 4, 1), EXPIRED, ann, &[(drill, 40)]).await;

    let report = db.store.low_stock_sales().await.unwrap();
    assert_eq!(report.len(), 2);
    assert_eq!(report[0].product_id, tape);
    assert_eq!(report[0].total_sold, 4);
    assert_eq!(report[0].total_sales, 8.0);
    assert_eq!(report[1].product_id, drill);
    assert_eq!(report[1].total_sold, 3);
    assert_eq!(report[1].current_stock, 102);
    assert_eq!(report[1].restock_threshold, 15);

    db.teardown().await;
}

#[tokio::test]
async fn bulk_expire_counts_orders_strictly_before_the_date() {
    let Some(db) = TestDb::connect("expire").await else {
        return;
    };
    let ann = db.user("Ann").await;
    db.order(day(2023, 12, 31), "PLACED", ann, &[]).await;
    db.order(day(2024, 1, 15), EXPIRED, ann, &[]).await;
    let cutoff = db.order(day(2024, 2, 1), "PLACED", ann, &[]).await;

    assert_eq!(db.store.expire_orders_before(day(2024, 2, 1)).await.unwrap(), 2);
    assert_eq!(db.store.expire_orders_before(day(2000, 1, 1)).await.unwrap(), 0);

    let orders = db.store.orders_before(day(2099, 1, 1)).await.unwrap();
    assert_eq!(orders.len(), 3);
    for o in &orders {
        let expected = if o.order_id == cutoff { "PLACED" } else { EXPIRED };
        assert_eq!(o.order_status, expected);
    }
    assert_eq!(db.store.expire_order(cutoff).await.unwrap(), 1);
    assert_eq!(db.store.expire_order(cutoff).await.unwrap(), 1);
    assert_eq!(db.store.expire_order(9999).await.unwrap(), 0);

    db.teardown().await;
}
