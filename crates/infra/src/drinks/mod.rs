//! Drink persistence for the coffee-shop app.

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryDrinkStore;
pub use postgres::PostgresDrinkStore;

use async_trait::async_trait;

use crudkit_coffee::{Drink, DrinkId, DrinkPatch, NewDrink};

use crate::StoreError;

/// Drink table boundary. Titles are unique.
#[async_trait]
pub trait DrinkStore: Send + Sync {
    /// Every drink, ordered by id.
    async fn list(&self) -> Result<Vec<Drink>, StoreError>;

    /// Store a new drink. A duplicate title is a `Conflict`.
    async fn insert(&self, drink: NewDrink) -> Result<Drink, StoreError>;

    /// Apply `patch`; `None` if the drink does not exist.
    async fn update(&self, id: DrinkId, patch: DrinkPatch) -> Result<Option<Drink>, StoreError>;

    /// `false` if the drink did not exist.
    async fn delete(&self, id: DrinkId) -> Result<bool, StoreError>;
}

pub(crate) fn duplicate_title(title: &str) -> StoreError {
    StoreError::Conflict(format!("a drink titled '{title}' already exists"))
}
