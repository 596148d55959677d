//! Shared application state for all routes.

use std::sync::Arc;

use sqlx::PgPool;

use crate::repository::FruitStore;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub fruits: Arc<FruitStore>,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        AppState {
            pool,
            fruits: Arc::new(FruitStore::default()),
        }
    }
}
