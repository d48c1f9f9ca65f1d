//! Stockroom: inventory and order management REST backend.

pub mod config;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod openapi;
pub mod password;
pub mod response;
pub mod routes;
pub mod seed;
pub mod state;
pub mod store;
pub mod validation;

pub use config::AppConfig;
pub use error::{AppError, ConfigError};
pub use migration::{apply_migrations, ensure_database_exists, seed_demo};
pub use routes::{api_routes, build_router, common_routes};
pub use state::AppState;
pub use store::{MemoryStore, PgStore, Store};
