//! Service entry point: load config, check migration consistency, serve.

use quotery::{
    api_routes, openapi, AppConfig, AppliedMigrations, DefinedMigrations, PendingMigrationsCheck,
    AppState,
};
use tokio::net::TcpListener;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

const MAX_BODY_BYTES: usize = 256 * 1024;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("quotery=info".parse()?))
        .init();

    let config = AppConfig::from_env()?;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;

    // The service must not accept requests while the defined and applied
    // migration sets disagree; a failed check aborts startup before bind.
    let check = PendingMigrationsCheck::new(
        DefinedMigrations::new(config.migrations.directory.clone()),
        AppliedMigrations::with_table(pool.clone(), config.migrations.table.clone()),
    );
    check.assert_none_pending().await?;

    let state = AppState::new(pool);
    let mut app = api_routes(state)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http());
    if config.swagger.enabled {
        app = app.merge(openapi::swagger_routes(&config.swagger.path));
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
