//! Validated domain values. Constructors enforce the invariants; rows and
//! DTOs convert into these types at the boundary.

pub mod author;
pub mod fruit;
pub mod quote;

pub use author::{Author, AuthorId};
pub use fruit::{Fruit, FruitId};
pub use quote::{Quote, QuoteId};
