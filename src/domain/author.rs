//! Author: a person quotes are attributed to.

use chrono::{DateTime, Utc};

use crate::error::AppError;

/// Positive integer key of an author row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AuthorId(i32);

impl AuthorId {
    pub fn new(id: i32) -> Result<Self, AppError> {
        if id < 1 {
            return Err(AppError::Validation(format!(
                "author id must be a positive integer, got {}",
                id
            )));
        }
        Ok(AuthorId(id))
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Author {
    id: AuthorId,
    first_name: String,
    last_name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Author {
    pub fn new(
        id: AuthorId,
        first_name: String,
        last_name: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, AppError> {
        validate_name("first name", &first_name)?;
        validate_name("last name", &last_name)?;
        Ok(Author {
            id,
            first_name,
            last_name,
            created_at,
            updated_at,
        })
    }

    pub fn id(&self) -> AuthorId {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

pub fn validate_name(field: &str, value: &str) -> Result<(), AppError> {
    if value.is_empty() {
        return Err(AppError::Validation(format!("{} must not be empty", field)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        "2020-01-01T06:15:00Z".parse().unwrap()
    }

    #[test]
    fn valid_author_is_constructed() {
        let author = Author::new(
            AuthorId::new(42).unwrap(),
            "Peter".into(),
            "Pan".into(),
            now(),
            now(),
        )
        .unwrap();
        assert_eq!(author.id().get(), 42);
        assert_eq!(author.first_name(), "Peter");
        assert_eq!(author.last_name(), "Pan");
    }

    #[test]
    fn empty_first_name_is_rejected() {
        let result = Author::new(
            AuthorId::new(1).unwrap(),
            "".into(),
            "Pan".into(),
            now(),
            now(),
        );
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn non_positive_ids_are_rejected() {
        assert!(AuthorId::new(0).is_err());
        assert!(AuthorId::new(-3).is_err());
    }
}
