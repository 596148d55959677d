//! HTTP routes: one module per entity plus the common service routes.

pub mod authors;
pub mod common;
pub mod fruits;
pub mod quotes;

use axum::Router;

use crate::state::AppState;

/// All API routes merged into one router.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .merge(common::common_routes(state.clone()))
        .merge(authors::author_routes(state.clone()))
        .merge(quotes::quote_routes(state.clone()))
        .merge(fruits::fruit_routes(state))
}
