//! Author rows: SQL CRUD and row-to-domain mapping.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{Author, AuthorId};
use crate::error::AppError;
use crate::repository::is_fk_violation;

const COLUMNS: &str = "id, first_name, last_name, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct AuthorRow {
    id: i32,
    first_name: String,
    last_name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AuthorRow> for Author {
    type Error = AppError;

    fn try_from(row: AuthorRow) -> Result<Self, Self::Error> {
        Author::new(
            AuthorId::new(row.id)?,
            row.first_name,
            row.last_name,
            row.created_at,
            row.updated_at,
        )
    }
}

pub struct AuthorRepository {
    pool: PgPool,
}

impl AuthorRepository {
    pub fn new(pool: PgPool) -> Self {
        AuthorRepository { pool }
    }

    pub async fn get(&self, id: AuthorId) -> Result<Author, AppError> {
        let sql = format!("SELECT {} FROM authors WHERE id = $1", COLUMNS);
        tracing::debug!(sql = %sql, id = id.get(), "query");
        let row: Option<AuthorRow> = sqlx::query_as(&sql)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await?;
        row.ok_or_else(|| AppError::NotFound(format!("author {}", id.get())))?
            .try_into()
    }

    pub async fn get_all(&self) -> Result<Vec<Author>, AppError> {
        let sql = format!("SELECT {} FROM authors ORDER BY id", COLUMNS);
        tracing::debug!(sql = %sql, "query");
        let rows: Vec<AuthorRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        rows.into_iter().map(Author::try_from).collect()
    }

    pub async fn create(&self, first_name: &str, last_name: &str) -> Result<Author, AppError> {
        let sql = format!(
            "INSERT INTO authors (first_name, last_name) VALUES ($1, $2) RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        let row: AuthorRow = sqlx::query_as(&sql)
            .bind(first_name)
            .bind(last_name)
            .fetch_one(&self.pool)
            .await?;
        row.try_into()
    }

    pub async fn update(
        &self,
        id: AuthorId,
        first_name: &str,
        last_name: &str,
    ) -> Result<Author, AppError> {
        let sql = format!(
            "UPDATE authors SET first_name = $2, last_name = $3, updated_at = NOW() WHERE id = $1 RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, id = id.get(), "query");
        let row: Option<AuthorRow> = sqlx::query_as(&sql)
            .bind(id.get())
            .bind(first_name)
            .bind(last_name)
            .fetch_optional(&self.pool)
            .await?;
        row.ok_or_else(|| AppError::NotFound(format!("author {}", id.get())))?
            .try_into()
    }

    /// Deleting an author that still has quotes assigned violates the
    /// quotes.author_id foreign key; that is reported as a conflict.
    pub async fn delete(&self, id: AuthorId) -> Result<(), AppError> {
        let sql = "DELETE FROM authors WHERE id = $1 RETURNING id";
        tracing::debug!(sql = %sql, id = id.get(), "query");
        let deleted: Option<(i32,)> = sqlx::query_as(sql)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                if is_fk_violation(&e) {
                    AppError::Conflict(format!("author {} still has quotes assigned", id.get()))
                } else {
                    AppError::Db(e)
                }
            })?;
        if deleted.is_none() {
            return Err(AppError::NotFound(format!("author {}", id.get())));
        }
        Ok(())
    }
}
