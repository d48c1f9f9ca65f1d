//! Demo dataset. Orders, order items and reviews have no create endpoints, so this is how they get rows.

use chrono::NaiveDate;

/// Password given to every demo user (stored hashed).
pub const DEMO_PASSWORD: &str = "changeme";

pub struct DemoUser {
    pub name: &'static str,
    pub email: &'static str,
}

pub struct DemoProduct {
    pub name: &'static str,
    pub category: &'static str,
    pub brand: &'static str,
    pub price: f64,
    pub description: &'static str,
}

/// Indices below refer to positions in `USERS`, `PRODUCTS` and `ORDERS`.
pub struct DemoInventory {
    pub product: usize,
    pub location: &'static str,
    pub quantity: i32,
    pub restock_threshold: i32,
}

pub struct DemoOrder {
    pub date: (i32, u32, u32),
    pub status: &'static str,
    pub user: usize,
}

pub struct DemoOrderItem {
    pub order: usize,
    pub product: usize,
    pub quantity: i32,
}

pub struct DemoReview {
    pub product: usize,
    pub customer: usize,
    pub rating: i32,
    pub description: &'static str,
    pub date: (i32, u32, u32),
}

pub const USERS: &[DemoUser] = &[
    DemoUser { name: "Alice Nguyen", email: "alice@example.com" },
    DemoUser { name: "Bob Okafor", email: "bob@example.com" },
    DemoUser { name: "Carmen Diaz", email: "carmen@example.com" },
];

pub const PRODUCTS: &[DemoProduct] = &[
    DemoProduct {
        name: "Cordless Drill",
        category: "Tools",
        brand: "Acme",
        price: 89.5,
        description: "18V drill with two batteries",
    },
    DemoProduct {
        name: "Claw Hammer",
        category: "Tools",
        brand: "Forge",
        price: 14.25,
        description: "16oz steel hammer",
    },
    DemoProduct {
        name: "LED Work Light",
        category: "Electrical",
        brand: "Brightline",
        price: 32.0,
        description: "Rechargeable 2000 lumen flood light",
    },
    DemoProduct {
        name: "Safety Goggles",
        category: "Safety",
        brand: "Acme",
        price: 6.75,
        description: "Anti-fog, impact rated",
    },
];

pub const INVENTORY: &[DemoInventory] = &[
    DemoInventory { product: 0, location: "A1", quantity: 2, restock_threshold: 10 },
    DemoInventory { product: 0, location: "B4", quantity: 3, restock_threshold: 5 },
    DemoInventory { product: 1, location: "A2", quantity: 40, restock_threshold: 15 },
    DemoInventory { product: 2, location: "C1", quantity: 1, restock_threshold: 8 },
    DemoInventory { product: 3, location: "A3", quantity: 4, restock_threshold: 20 },
];

pub const ORDERS: &[DemoOrder] = &[
    DemoOrder { date: (2024, 1, 15), status: "DELIVERED", user: 0 },
    DemoOrder { date: (2024, 3, 2), status: "SHIPPED", user: 1 },
    DemoOrder { date: (2024, 6, 20), status: "PLACED", user: 2 },
    DemoOrder { date: (2023, 11, 5), status: "EXPIRED", user: 0 },
];

pub const ORDER_ITEMS: &[DemoOrderItem] = &[
    DemoOrderItem { order: 0, product: 0, quantity: 3 },
    DemoOrderItem { order: 0, product: 3, quantity: 10 },
    DemoOrderItem { order: 1, product: 2, quantity: 2 },
    DemoOrderItem { order: 2, product: 0, quantity: 1 },
    DemoOrderItem { order: 3, product: 2, quantity: 50 },
];

pub const REVIEWS: &[DemoReview] = &[
    DemoReview {
        product: 0,
        customer: 1,
        rating: 5,
        description: "Plenty of torque, battery lasts all day.",
        date: (2024, 2, 1),
    },
    DemoReview {
        product: 0,
        customer: 2,
        rating: 3,
        description: "Chuck wobbles a little.",
        date: (2024, 7, 3),
    },
    DemoReview {
        product: 3,
        customer: 0,
        rating: 4,
        description: "Comfortable, no fogging.",
        date: (2024, 4, 12),
    },
];

/// Builds a date from one of the `(year, month, day)` literals above.
pub fn date((y, m, d): (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}
