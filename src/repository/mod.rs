//! Persistence: SQL repositories for authors and quotes, in-memory store for
//! fruits.

pub mod authors;
pub mod fruits;
pub mod quotes;

pub use authors::AuthorRepository;
pub use fruits::FruitStore;
pub use quotes::QuoteRepository;

/// PostgreSQL error code for a foreign-key violation.
pub(crate) const FOREIGN_KEY_VIOLATION: &str = "23503";

pub(crate) fn is_fk_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.code().as_deref() == Some(FOREIGN_KEY_VIOLATION))
}
