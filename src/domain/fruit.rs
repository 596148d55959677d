//! Fruit: the demo entity served from the in-memory store.

use crate::error::AppError;

/// Positive integer key of a fruit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FruitId(i32);

impl FruitId {
    pub fn new(id: i32) -> Result<Self, AppError> {
        if id < 1 {
            return Err(AppError::Validation(format!(
                "fruit id must be a positive integer, got {}",
                id
            )));
        }
        Ok(FruitId(id))
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Fruit {
    id: FruitId,
    name: String,
    calories: f64,
}

impl Fruit {
    pub fn new(id: FruitId, name: String, calories: f64) -> Result<Self, AppError> {
        if name.is_empty() {
            return Err(AppError::Validation("name must not be empty".into()));
        }
        if !calories.is_finite() || calories < 0.0 {
            return Err(AppError::Validation(
                "calories must be a non-negative number".into(),
            ));
        }
        Ok(Fruit { id, name, calories })
    }

    pub fn id(&self) -> FruitId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn calories(&self) -> f64 {
        self.calories
    }
}
