//! In-process store with the same predicates, ordering and affected-row counts as `PgStore`.
//! Lets the API run and be tested without a database.

use super::Store;
use crate::error::AppError;
use crate::model::{
    InventoryLevel, InventoryUpdate, LowStockSales, Order, Product, ProductInput, RestockItem, ReviewView, User,
    UserRecord, EXPIRED,
};
use crate::password::hash_password;
use crate::seed;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

struct InventoryRow {
    quantity: i32,
    restock_threshold: i32,
}

struct OrderRow {
    order_date: NaiveDate,
    order_status: String,
    user_id: i32,
}

struct OrderItemRow {
    order_id: i32,
    product_id: i32,
    quantity: i32,
}

struct ReviewRow {
    review_id: i32,
    product_id: i32,
    customer_id: i32,
    rating: i32,
    review_description: String,
    date_posted: NaiveDate,
}

#[derive(Default)]
struct Tables {
    users: BTreeMap<i32, UserRecord>,
    products: BTreeMap<i32, ProductInput>,
    inventory: BTreeMap<(i32, String), InventoryRow>,
    orders: BTreeMap<i32, OrderRow>,
    order_items: Vec<OrderItemRow>,
    reviews: Vec<ReviewRow>,
    last_user_id: i32,
    last_product_id: i32,
    last_order_id: i32,
    last_review_id: i32,
}

impl Tables {
    fn remove_orders_where(&mut self, pred: impl Fn(&OrderRow) -> bool) {
        let gone: Vec<i32> = self.orders.iter().filter(|(_, o)| pred(o)).map(|(id, _)| *id).collect();
        for id in &gone {
            self.orders.remove(id);
        }
        self.order_items.retain(|i| !gone.contains(&i.order_id));
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with the demo dataset from [`crate::seed`].
    pub fn with_demo_data() -> Result<Self, AppError> {
        let store = Self::new();
        let hash = hash_password(seed::DEMO_PASSWORD)?;
        let mut user_ids = Vec::new();
        let mut product_ids = Vec::new();
        let mut order_ids = Vec::new();
        {
            let mut t = store.write()?;
            for u in seed::USERS {
                t.last_user_id += 1;
                let id = t.last_user_id;
                t.users.insert(
                    id,
                    UserRecord {
                        name: u.name.into(),
                        email: u.email.into(),
                        password_hash: hash.clone(),
                    },
                );
                user_ids.push(id);
            }
            for p in seed::PRODUCTS {
                t.last_product_id += 1;
                let id = t.last_product_id;
                t.products.insert(
                    id,
                    ProductInput {
                        name: p.name.into(),
                        category: p.category.into(),
                        brand: p.brand.into(),
                        price: p.price,
                        description: p.description.into(),
                    },
                );
                product_ids.push(id);
            }
        }
        for i in seed::INVENTORY {
            store.insert_inventory(product_ids[i.product], i.location, i.quantity, i.restock_threshold)?;
        }
        for o in seed::ORDERS {
            order_ids.push(store.insert_order(seed::date(o.date), o.status, user_ids[o.user])?);
        }
        for i in seed::ORDER_ITEMS {
            store.insert_order_item(order_ids[i.order], product_ids[i.product], i.quantity)?;
        }
        for r in seed::REVIEWS {
            store.insert_review(
                product_ids[r.product],
                user_ids[r.customer],
                r.rating,
                r.description,
                seed::date(r.date),
            )?;
        }
        Ok(store)
    }

    /// Insert or replace the row for (product, location).
    pub fn insert_inventory(
        &self,
        product_id: i32,
        location: &str,
        quantity: i32,
        restock_threshold: i32,
    ) -> Result<(), AppError> {
        self.write()?.inventory.insert(
            (product_id, location.to_string()),
            InventoryRow {
                quantity,
                restock_threshold,
            },
        );
        Ok(())
    }

    pub fn insert_order(&self, order_date: NaiveDate, status: &str, user_id: i32) -> Result<i32, AppError> {
        let mut t = self.write()?;
        t.last_order_id += 1;
        let id = t.last_order_id;
        t.orders.insert(
            id,
            OrderRow {
                order_date,
                order_status: status.to_string(),
                user_id,
            },
        );
        Ok(id)
    }

    pub fn insert_order_item(&self, order_id: i32, product_id: i32, quantity: i32) -> Result<(), AppError> {
        self.write()?.order_items.push(OrderItemRow {
            order_id,
            product_id,
            quantity,
        });
        Ok(())
    }

    pub fn insert_review(
        &self,
        product_id: i32,
        customer_id: i32,
        rating: i32,
        description: &str,
        date_posted: NaiveDate,
    ) -> Result<i32, AppError> {
        let mut t = self.write()?;
        t.last_review_id += 1;
        let review_id = t.last_review_id;
        t.reviews.push(ReviewRow {
            review_id,
            product_id,
            customer_id,
            rating,
            review_description: description.to_string(),
            date_posted,
        });
        Ok(review_id)
    }

    /// Stored password hash for a user, if the user exists.
    pub fn password_hash(&self, user_id: i32) -> Result<Option<String>, AppError> {
        Ok(self.read()?.users.get(&user_id).map(|u| u.password_hash.clone()))
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, AppError> {
        self.tables
            .read()
            .map_err(|_| AppError::Internal("memory store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, AppError> {
        self.tables
            .write()
            .map_err(|_| AppError::Internal("memory store lock poisoned".into()))
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        Ok(self
            .read()?
            .users
            .iter()
            .map(|(id, u)| User {
                user_id: *id,
                name: u.name.clone(),
                email: u.email.clone(),
            })
            .collect())
    }

    async fn create_user(&self, user: &UserRecord) -> Result<i32, AppError> {
        let mut t = self.write()?;
        t.last_user_id += 1;
        let id = t.last_user_id;
        t.users.insert(id, user.clone());
        Ok(id)
    }

    async fn update_user(&self, user_id: i32, user: &UserRecord) -> Result<u64, AppError> {
        match self.write()?.users.get_mut(&user_id) {
            Some(row) => {
                *row = user.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_user(&self, user_id: i32) -> Result<u64, AppError> {
        let mut t = self.write()?;
        if t.users.remove(&user_id).is_none() {
            return Ok(0);
        }
        t.remove_orders_where(|o| o.user_id == user_id);
        t.reviews.retain(|r| r.customer_id != user_id);
        Ok(1)
    }

    async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        Ok(self
            .read()?
            .products
            .iter()
            .map(|(id, p)| Product {
                product_id: *id,
                name: p.name.clone(),
                category: p.category.clone(),
                brand: p.brand.clone(),
                price: p.price,
                description: p.description.clone(),
            })
            .collect())
    }

    async fn create_product(&self, product: &ProductInput) -> Result<i32, AppError> {
        let mut t = self.write()?;
        t.last_product_id += 1;
        let id = t.last_product_id;
        t.products.insert(id, product.clone());
        Ok(id)
    }

    async fn update_product(&self, product_id: i32, product: &ProductInput) -> Result<u64, AppError> {
        match self.write()?.products.get_mut(&product_id) {
            Some(row) => {
                *row = product.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_product(&self, product_id: i32) -> Result<u64, AppError> {
        let mut t = self.write()?;
        if t.products.remove(&product_id).is_none() {
            return Ok(0);
        }
        t.inventory.retain(|(pid, _), _| *pid != product_id);
        t.order_items.retain(|i| i.product_id != product_id);
        t.reviews.retain(|r| r.product_id != product_id);
        Ok(1)
    }

    async fn reviews_for_product(&self, product_id: i32) -> Result<Vec<ReviewView>, AppError> {
        let t = self.read()?;
        let mut out: Vec<ReviewView> = t
            .reviews
            .iter()
            .filter(|r| r.product_id == product_id)
            .filter_map(|r| {
                let author = t.users.get(&r.customer_id)?;
                Some(ReviewView {
                    review_id: r.review_id,
                    rating: r.rating,
                    review_description: r.review_description.clone(),
                    date_posted: r.date_posted,
                    customer_name: author.name.clone(),
                })
            })
            .collect();
        out.sort_by(|a, b| {
            b.date_posted
                .cmp(&a.date_posted)
                .then(b.review_id.cmp(&a.review_id))
        });
        Ok(out)
    }

    async fn restock_candidates(&self) -> Result<Vec<RestockItem>, AppError> {
        let t = self.read()?;
        Ok(t.inventory
            .iter()
            .filter(|(_, row)| row.restock_threshold > row.quantity)
            .filter_map(|((product_id, location), row)| {
                let p = t.products.get(product_id)?;
                Some(RestockItem {
                    product_id: *product_id,
                    product_name: p.name.clone(),
                    category: p.category.clone(),
                    brand: p.brand.clone(),
                    price: p.price,
                    location: location.clone(),
                    quantity: row.quantity,
                    restock_threshold: row.restock_threshold,
                })
            })
            .collect())
    }

    async fn update_inventory(
        &self,
        product_id: i32,
        location: &str,
        update: &InventoryUpdate,
    ) -> Result<u64, AppError> {
        let mut t = self.write()?;
        match t.inventory.get_mut(&(product_id, location.to_string())) {
            Some(row) => {
                row.quantity = update.quantity;
                if let Some(threshold) = update.restock_threshold {
                    row.restock_threshold = threshold;
                }
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn add_inventory(
        &self,
        product_id: i32,
        location: &str,
        amount: i32,
    ) -> Result<Option<InventoryLevel>, AppError> {
        let mut t = self.write()?;
        let Some(row) = t.inventory.get_mut(&(product_id, location.to_string())) else {
            return Ok(None);
        };
        row.quantity = row
            .quantity
            .checked_add(amount)
            .ok_or_else(|| AppError::BadRequest("amount pushes quantity out of range".into()))?;
        Ok(Some(InventoryLevel {
            product_id,
            location: location.to_string(),
            quantity: row.quantity,
        }))
    }

    async fn orders_before(&self, before: NaiveDate) -> Result<Vec<Order>, AppError> {
        let t = self.read()?;
        let mut out: Vec<Order> = t
            .orders
            .iter()
            .filter(|(_, o)| o.order_date < before)
            .map(|(id, o)| Order {
                order_id: *id,
                order_date: o.order_date,
                order_status: o.order_status.clone(),
                user_id: o.user_id,
            })
            .collect();
        out.sort_by_key(|o| (o.order_date, o.order_id));
        Ok(out)
    }

    async fn expire_order(&self, order_id: i32) -> Result<u64, AppError> {
        match self.write()?.orders.get_mut(&order_id) {
            Some(o) => {
                o.order_status = EXPIRED.to_string();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn expire_orders_before(&self, before: NaiveDate) -> Result<u64, AppError> {
        let mut t = self.write()?;
        let mut affected = 0;
        for o in t.orders.values_mut().filter(|o| o.order_date < before) {
            o.order_status = EXPIRED.to_string();
            affected += 1;
        }
        Ok(affected)
    }

    async fn low_stock_sales(&self) -> Result<Vec<LowStockSales>, AppError> {
        let t = self.read()?;
        // (summed stock, summed threshold, any location under its threshold)
        let mut stock: HashMap<i32, (i64, i64, bool)> = HashMap::new();
        for ((product_id, _), row) in &t.inventory {
            let entry = stock.entry(*product_id).or_default();
            entry.0 += i64::from(row.quantity);
            entry.1 += i64::from(row.restock_threshold);
            entry.2 |= row.quantity < row.restock_threshold;
        }
        let mut sold: HashMap<i32, i64> = HashMap::new();
        for item in &t.order_items {
            let live = t
                .orders
                .get(&item.order_id)
                .map(|o| o.order_status != EXPIRED)
                .unwrap_or(false);
            if live {
                *sold.entry(item.product_id).or_default() += i64::from(item.quantity);
            }
        }
        let mut out: Vec<LowStockSales> = t
            .products
            .iter()
            .filter_map(|(id, p)| {
                let (current_stock, restock_threshold, needs_restock) = *stock.get(id)?;
                let total_sold = *sold.get(id)?;
                needs_restock.then(|| LowStockSales {
                    product_id: *id,
                    product_name: p.name.clone(),
                    category: p.category.clone(),
                    brand: p.brand.clone(),
                    price: p.price,
                    current_stock,
                    restock_threshold,
                    total_sold,
                    total_sales: total_sold as f64 * p.price,
                })
            })
            .collect();
        out.sort_by(|a, b| b.total_sold.cmp(&a.total_sold).then(a.product_id.cmp(&b.product_id)));
        Ok(out)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.read().map(|_| ())
    }
}
