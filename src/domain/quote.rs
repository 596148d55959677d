//! Quote: attributed text, at most 1000 characters.

use chrono::{DateTime, Utc};

use crate::domain::author::AuthorId;
use crate::error::AppError;

pub const MAX_TEXT_CHARS: usize = 1000;

/// Positive integer key of a quote row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QuoteId(i32);

impl QuoteId {
    pub fn new(id: i32) -> Result<Self, AppError> {
        if id < 1 {
            return Err(AppError::Validation(format!(
                "quote id must be a positive integer, got {}",
                id
            )));
        }
        Ok(QuoteId(id))
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Quote {
    id: QuoteId,
    text: String,
    author_id: AuthorId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Quote {
    pub fn new(
        id: QuoteId,
        text: String,
        author_id: AuthorId,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, AppError> {
        validate_text(&text)?;
        Ok(Quote {
            id,
            text,
            author_id,
            created_at,
            updated_at,
        })
    }

    pub fn id(&self) -> QuoteId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn author_id(&self) -> AuthorId {
        self.author_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

pub fn validate_text(text: &str) -> Result<(), AppError> {
    if text.is_empty() {
        return Err(AppError::Validation("text must not be empty".into()));
    }
    if text.chars().count() > MAX_TEXT_CHARS {
        return Err(AppError::Validation(format!(
            "text must be at most {} characters",
            MAX_TEXT_CHARS
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        "2020-01-01T06:15:00Z".parse().unwrap()
    }

    fn quote_with_text(text: &str) -> Result<Quote, AppError> {
        Quote::new(
            QuoteId::new(1).unwrap(),
            text.into(),
            AuthorId::new(1).unwrap(),
            now(),
            now(),
        )
    }

    #[test]
    fn valid_quote_is_constructed() {
        let quote = quote_with_text("Lorem ipsum dolor sit amet.").unwrap();
        assert_eq!(quote.text(), "Lorem ipsum dolor sit amet.");
        assert_eq!(quote.author_id().get(), 1);
    }

    #[test]
    fn empty_text_is_rejected() {
        assert!(matches!(quote_with_text(""), Err(AppError::Validation(_))));
    }

    #[test]
    fn text_at_limit_is_accepted() {
        assert!(quote_with_text(&"x".repeat(MAX_TEXT_CHARS)).is_ok());
    }

    #[test]
    fn overlong_text_is_rejected() {
        assert!(quote_with_text(&"x".repeat(MAX_TEXT_CHARS + 1)).is_err());
    }
}
