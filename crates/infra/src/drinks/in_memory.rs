use std::sync::RwLock;

use async_trait::async_trait;

use crudkit_coffee::{Drink, DrinkId, DrinkPatch, NewDrink};

use super::{DrinkStore, duplicate_title};
use crate::StoreError;
use crate::memory::{Table, poisoned};

/// In-memory drink store.
#[derive(Debug, Default)]
pub struct InMemoryDrinkStore {
    drinks: RwLock<Table<Drink>>,
}

impl InMemoryDrinkStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn title_taken(table: &Table<Drink>, title: &str, except: Option<DrinkId>) -> bool {
    table
        .values()
        .any(|d| d.title == title && Some(d.id) != except)
}

#[async_trait]
impl DrinkStore for InMemoryDrinkStore {
    async fn list(&self) -> Result<Vec<Drink>, StoreError> {
        Ok(self.drinks.read().map_err(poisoned)?.snapshot())
    }

    async fn insert(&self, drink: NewDrink) -> Result<Drink, StoreError> {
        let mut table = self.drinks.write().map_err(poisoned)?;
        if title_taken(&table, drink.title(), None) {
            return Err(duplicate_title(drink.title()));
        }
        let id = table.next_id();
        let drink = drink.into_drink(DrinkId::new(id));
        table.insert(id, drink.clone());
        Ok(drink)
    }

    async fn update(&self, id: DrinkId, patch: DrinkPatch) -> Result<Option<Drink>, StoreError> {
        let mut table = self.drinks.write().map_err(poisoned)?;
        if let Some(title) = patch.title() {
            if title_taken(&table, title, Some(id)) {
                return Err(duplicate_title(title));
            }
        }
        Ok(table.get_mut(id.get()).map(|drink| {
            drink.apply(patch);
            drink.clone()
        }))
    }

    async fn delete(&self, id: DrinkId) -> Result<bool, StoreError> {
        Ok(self.drinks.write().map_err(poisoned)?.remove(id.get()).is_some())
    }
}
