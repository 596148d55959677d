//! Service configuration from environment variables.

use std::path::PathBuf;

use crate::error::ConfigError;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Clone, Debug)]
pub struct MigrationsConfig {
    /// Directory holding the migration definition files (`*.sql`).
    pub directory: PathBuf,
    /// Tracking table maintained by the external migration runner.
    pub table: String,
}

#[derive(Clone, Debug)]
pub struct SwaggerConfig {
    pub enabled: bool,
    pub path: String,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub migrations: MigrationsConfig,
    pub swagger: SwaggerConfig,
}

impl AppConfig {
    /// Load from the process environment. `DATABASE_URL` is required;
    /// everything else has a default.
    pub fn from_env() -> Result<AppConfig, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<AppConfig, ConfigError> {
        let server = ServerConfig {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_var(&get, "PORT", 3000)?,
        };
        let database = DatabaseConfig {
            url: get("DATABASE_URL").ok_or(ConfigError::MissingVar("DATABASE_URL"))?,
            max_connections: parse_var(&get, "DATABASE_MAX_CONNECTIONS", 5)?,
        };
        let migrations = MigrationsConfig {
            directory: PathBuf::from(get("MIGRATIONS_DIR").unwrap_or_else(|| "migrations".into())),
            table: get("MIGRATIONS_TABLE")
                .unwrap_or_else(|| crate::migration::DEFAULT_TRACKING_TABLE.into()),
        };
        let swagger = SwaggerConfig {
            enabled: parse_var(&get, "SWAGGER_ENABLED", true)?,
            path: get("SWAGGER_PATH").unwrap_or_else(|| "/docs".into()),
        };
        Ok(AppConfig {
            server,
            database,
            migrations,
            swagger,
        })
    }
}

fn parse_var<T: std::str::FromStr>(
    get: impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match get(var) {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::InvalidVar {
            var,
            message: e.to_string(),
        }),
    }
}
