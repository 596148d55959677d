//! Quotery: quote collection REST service backed by PostgreSQL.

pub mod config;
pub mod domain;
pub mod error;
pub mod migration;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod state;

pub use config::AppConfig;
pub use error::{AppError, ConfigError};
pub use migration::{
    AppliedMigrations, DefinedMigrations, MigrationError, PendingMigrationsCheck,
};
pub use routes::api_routes;
pub use state::AppState;
