//! Shared application state for all routes.

use crate::store::Store;
use std::sync::Arc;

/// Owns the data source; handlers receive it through `State` instead of a global connection.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
}

impl AppState {
    pub fn new(store: impl Store + 'static) -> Self {
        AppState {
            store: Arc::new(store),
        }
    }
}
