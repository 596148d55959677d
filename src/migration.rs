//! Startup consistency check between defined migration files and the
//! applied-migrations tracking table. Migrations themselves are applied by an
//! external runner; this module only refuses startup when the two disagree.

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;

/// PostgreSQL error code for "relation does not exist".
const UNDEFINED_TABLE: &str = "42P01";

/// Tracking table written by the external migration runner.
pub const DEFAULT_TRACKING_TABLE: &str = "pgmigrations";

const MAX_NAME_CHARS: usize = 255;

#[derive(Error, Debug)]
pub enum MigrationError {
    #[error("invalid migration name: {0:?}")]
    InvalidIdentifier(String),
    #[error("migrations table '{0}' is missing")]
    MissingTrackingTable(String),
    #[error("no defined migrations found")]
    NoMigrationsFound,
    #[error("migrations are pending: defined [{}], applied [{}]", join(.defined), join(.applied))]
    MigrationsPending {
        defined: BTreeSet<Migration>,
        applied: BTreeSet<Migration>,
    },
    #[error(transparent)]
    Db(#[from] sqlx::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn join(set: &BTreeSet<Migration>) -> String {
    set.iter()
        .map(Migration::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Name of one migration: a migration file name minus its `.sql` extension.
/// Non-empty, at most 255 characters. Carries no ordering semantics beyond
/// the lexical ordering of the name itself.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Migration(String);

impl Migration {
    pub fn new(name: impl Into<String>) -> Result<Self, MigrationError> {
        let name = name.into();
        let chars = name.chars().count();
        if chars == 0 || chars > MAX_NAME_CHARS {
            return Err(MigrationError::InvalidIdentifier(name));
        }
        Ok(Migration(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Migration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A source of migration names: the definition files on disk, or the applied
/// records in the database. The check compares one snapshot of each.
#[async_trait]
pub trait ListMigrations {
    async fn list(&self) -> Result<BTreeSet<Migration>, MigrationError>;
}

/// Lists migrations defined as `*.sql` files in a directory. The directory is
/// an explicit constructor argument; an empty directory yields an empty set
/// (the checker decides whether that is an error).
pub struct DefinedMigrations {
    directory: PathBuf,
}

impl DefinedMigrations {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        DefinedMigrations {
            directory: directory.into(),
        }
    }
}

#[async_trait]
impl ListMigrations for DefinedMigrations {
    async fn list(&self) -> Result<BTreeSet<Migration>, MigrationError> {
        let mut entries = tokio::fs::read_dir(&self.directory).await?;
        let mut migrations = BTreeSet::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            let Some(stem) = name.strip_suffix(".sql") else {
                continue;
            };
            migrations.insert(Migration::new(stem)?);
        }
        tracing::info!(count = migrations.len(), "defined migrations found");
        Ok(migrations)
    }
}

/// Lists migrations recorded in the tracking table (one `name` per applied
/// migration). A missing table is reported as `MissingTrackingTable`; any
/// other database error propagates unchanged.
pub struct AppliedMigrations {
    pool: PgPool,
    table: String,
}

impl AppliedMigrations {
    pub fn new(pool: PgPool) -> Self {
        Self::with_table(pool, DEFAULT_TRACKING_TABLE)
    }

    pub fn with_table(pool: PgPool, table: impl Into<String>) -> Self {
        AppliedMigrations {
            pool,
            table: table.into(),
        }
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('\\', "\\\\").replace('"', "\\\""))
}

#[async_trait]
impl ListMigrations for AppliedMigrations {
    async fn list(&self) -> Result<BTreeSet<Migration>, MigrationError> {
        let sql = format!("SELECT name FROM {}", quote_ident(&self.table));
        tracing::debug!(sql = %sql, "query");
        let rows: Vec<String> = match sqlx::query_scalar(&sql).fetch_all(&self.pool).await {
            Ok(rows) => rows,
            Err(e) => {
                if let sqlx::Error::Database(db) = &e {
                    if db.code().as_deref() == Some(UNDEFINED_TABLE) {
                        return Err(MigrationError::MissingTrackingTable(self.table.clone()));
                    }
                }
                return Err(MigrationError::Db(e));
            }
        };
        rows.into_iter().map(Migration::new).collect()
    }
}

/// Compares the defined and applied migration sets and fails startup when
/// they disagree. Both providers are constructor arguments; production wiring
/// passes `DefinedMigrations` and `AppliedMigrations`, tests pass in-memory
/// sources.
pub struct PendingMigrationsCheck<D, A> {
    defined: D,
    applied: A,
}

impl<D, A> PendingMigrationsCheck<D, A>
where
    D: ListMigrations,
    A: ListMigrations,
{
    pub fn new(defined: D, applied: A) -> Self {
        PendingMigrationsCheck { defined, applied }
    }

    /// Runs once during startup, before the listener binds. Fetches both sets
    /// concurrently; if either provider fails, the whole check fails.
    pub async fn assert_none_pending(&self) -> Result<(), MigrationError> {
        let (defined, applied) = tokio::try_join!(self.defined.list(), self.applied.list())?;

        if defined.is_empty() {
            // An empty defined set almost always means the migrations
            // directory is misconfigured, not a migration-free system.
            return Err(MigrationError::NoMigrationsFound);
        }

        if defined.len() != applied.len() || applied.iter().any(|m| !defined.contains(m)) {
            // A size mismatch can also mean fewer defined than applied (e.g.
            // a migration renamed after it was applied); that case is rare
            // enough that it is reported the same way.
            return Err(MigrationError::MigrationsPending { defined, applied });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(names: &[&str]) -> BTreeSet<Migration> {
        names
            .iter()
            .map(|n| Migration::new(*n).unwrap())
            .collect()
    }

    struct Fixed(BTreeSet<Migration>);

    #[async_trait]
    impl ListMigrations for Fixed {
        async fn list(&self) -> Result<BTreeSet<Migration>, MigrationError> {
            Ok(self.0.clone())
        }
    }

    struct MissingTable;

    #[async_trait]
    impl ListMigrations for MissingTable {
        async fn list(&self) -> Result<BTreeSet<Migration>, MigrationError> {
            Err(MigrationError::MissingTrackingTable("pgmigrations".into()))
        }
    }

    #[test]
    fn migration_name_round_trips() {
        let m = Migration::new("0001_create-authors").unwrap();
        assert_eq!(m.as_str(), "0001_create-authors");
        assert_eq!(m.to_string(), "0001_create-authors");
    }

    #[test]
    fn migration_name_accepts_255_chars() {
        let name = "m".repeat(255);
        assert_eq!(Migration::new(name.clone()).unwrap().as_str(), name);
    }

    #[test]
    fn empty_migration_name_is_rejected() {
        assert!(matches!(
            Migration::new(""),
            Err(MigrationError::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn overlong_migration_name_is_rejected() {
        assert!(matches!(
            Migration::new("m".repeat(256)),
            Err(MigrationError::InvalidIdentifier(_))
        ));
    }

    #[tokio::test]
    async fn equal_sets_pass() {
        let check = PendingMigrationsCheck::new(Fixed(set(&["001", "002"])), Fixed(set(&["001", "002"])));
        assert!(check.assert_none_pending().await.is_ok());
    }

    #[tokio::test]
    async fn empty_defined_set_fails_regardless_of_applied() {
        let check = PendingMigrationsCheck::new(Fixed(set(&[])), Fixed(set(&["001"])));
        assert!(matches!(
            check.assert_none_pending().await,
            Err(MigrationError::NoMigrationsFound)
        ));
    }

    #[tokio::test]
    async fn unapplied_migration_is_reported_with_both_sets() {
        let check = PendingMigrationsCheck::new(Fixed(set(&["001", "002"])), Fixed(set(&["001"])));
        match check.assert_none_pending().await {
            Err(MigrationError::MigrationsPending { defined, applied }) => {
                assert_eq!(defined, set(&["001", "002"]));
                assert_eq!(applied, set(&["001"]));
            }
            other => panic!("expected MigrationsPending, got {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn more_applied_than_defined_is_also_pending() {
        let check = PendingMigrationsCheck::new(Fixed(set(&["001"])), Fixed(set(&["001", "002"])));
        assert!(matches!(
            check.assert_none_pending().await,
            Err(MigrationError::MigrationsPending { .. })
        ));
    }

    #[tokio::test]
    async fn same_size_but_different_names_is_pending() {
        let check = PendingMigrationsCheck::new(Fixed(set(&["001", "002"])), Fixed(set(&["001", "003"])));
        assert!(matches!(
            check.assert_none_pending().await,
            Err(MigrationError::MigrationsPending { .. })
        ));
    }

    #[tokio::test]
    async fn missing_tracking_table_propagates() {
        let check = PendingMigrationsCheck::new(Fixed(set(&["001"])), MissingTable);
        assert!(matches!(
            check.assert_none_pending().await,
            Err(MigrationError::MissingTrackingTable(_))
        ));
    }

    #[tokio::test]
    async fn defined_migrations_lists_sql_files_without_extension() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("0001_create-authors.sql"), "SELECT 1;").unwrap();
        std::fs::write(dir.path().join("0002_create-quotes.sql"), "SELECT 1;").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let defined = DefinedMigrations::new(dir.path()).list().await.unwrap();
        assert_eq!(defined, set(&["0001_create-authors", "0002_create-quotes"]));
    }

    #[tokio::test]
    async fn empty_directory_yields_empty_set() {
        let dir = tempfile::tempdir().unwrap();
        let defined = DefinedMigrations::new(dir.path()).list().await.unwrap();
        assert!(defined.is_empty());
    }

    #[tokio::test]
    async fn missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("nope");
        assert!(matches!(
            DefinedMigrations::new(gone).list().await,
            Err(MigrationError::Io(_))
        ));
    }

    #[test]
    fn pending_error_message_names_both_sets() {
        let err = MigrationError::MigrationsPending {
            defined: set(&["001", "002"]),
            applied: set(&["001"]),
        };
        let msg = err.to_string();
        assert!(msg.contains("defined [001, 002]"));
        assert!(msg.contains("applied [001]"));
    }
}
