//! Quote rows: SQL CRUD and row-to-domain mapping.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{AuthorId, Quote, QuoteId};
use crate::error::AppError;

const COLUMNS: &str = "id, text, author_id, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct QuoteRow {
    id: i32,
    text: String,
    author_id: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<QuoteRow> for Quote {
    type Error = AppError;

    fn try_from(row: QuoteRow) -> Result<Self, Self::Error> {
        Quote::new(
            QuoteId::new(row.id)?,
            row.text,
            AuthorId::new(row.author_id)?,
            row.created_at,
            row.updated_at,
        )
    }
}

pub struct QuoteRepository {
    pool: PgPool,
}

impl QuoteRepository {
    pub fn new(pool: PgPool) -> Self {
        QuoteRepository { pool }
    }

    pub async fn get(&self, id: QuoteId) -> Result<Quote, AppError> {
        let sql = format!("SELECT {} FROM quotes WHERE id = $1", COLUMNS);
        tracing::debug!(sql = %sql, id = id.get(), "query");
        let row: Option<QuoteRow> = sqlx::query_as(&sql)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await?;
        row.ok_or_else(|| AppError::NotFound(format!("quote {}", id.get())))?
            .try_into()
    }

    pub async fn get_all(&self) -> Result<Vec<Quote>, AppError> {
        let sql = format!("SELECT {} FROM quotes ORDER BY id", COLUMNS);
        tracing::debug!(sql = %sql, "query");
        let rows: Vec<QuoteRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        rows.into_iter().map(Quote::try_from).collect()
    }

    /// One uniformly random quote, or None when the table is empty.
    pub async fn get_random(&self) -> Result<Option<Quote>, AppError> {
        let sql = format!("SELECT {} FROM quotes ORDER BY RANDOM() LIMIT 1", COLUMNS);
        tracing::debug!(sql = %sql, "query");
        let row: Option<QuoteRow> = sqlx::query_as(&sql).fetch_optional(&self.pool).await?;
        row.map(Quote::try_from).transpose()
    }

    pub async fn create(&self, text: &str, author_id: AuthorId) -> Result<Quote, AppError> {
        let sql = format!(
            "INSERT INTO quotes (text, author_id) VALUES ($1, $2) RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        let row: QuoteRow = sqlx::query_as(&sql)
            .bind(text)
            .bind(author_id.get())
            .fetch_one(&self.pool)
            .await?;
        row.try_into()
    }

    pub async fn update(
        &self,
        id: QuoteId,
        text: &str,
        author_id: AuthorId,
    ) -> Result<Quote, AppError> {
        let sql = format!(
            "UPDATE quotes SET text = $2, author_id = $3, updated_at = NOW() WHERE id = $1 RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, id = id.get(), "query");
        let row: Option<QuoteRow> = sqlx::query_as(&sql)
            .bind(id.get())
            .bind(text)
            .bind(author_id.get())
            .fetch_optional(&self.pool)
            .await?;
        row.ok_or_else(|| AppError::NotFound(format!("quote {}", id.get())))?
            .try_into()
    }

    pub async fn delete(&self, id: QuoteId) -> Result<(), AppError> {
        let sql = "DELETE FROM quotes WHERE id = $1 RETURNING id";
        tracing::debug!(sql = %sql, id = id.get(), "query");
        let deleted: Option<(i32,)> = sqlx::query_as(sql)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await?;
        if deleted.is_none() {
            return Err(AppError::NotFound(format!("quote {}", id.get())));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        "2020-01-01T06:15:00Z".parse().unwrap()
    }

    #[test]
    fn row_maps_to_domain() {
        let row = QuoteRow {
            id: 7,
            text: "Lorem ipsum dolor sit amet.".into(),
            author_id: 42,
            created_at: now(),
            updated_at: now(),
        };
        let quote = Quote::try_from(row).unwrap();
        assert_eq!(quote.id().get(), 7);
        assert_eq!(quote.author_id().get(), 42);
    }

    #[test]
    fn row_with_overlong_text_fails_mapping() {
        let row = QuoteRow {
            id: 7,
            text: "x".repeat(crate::domain::quote::MAX_TEXT_CHARS + 1),
            author_id: 42,
            created_at: now(),
            updated_at: now(),
        };
        assert!(matches!(Quote::try_from(row), Err(AppError::Validation(_))));
    }
}
