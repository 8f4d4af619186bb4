//! Postgres-backed drink store. The recipe is stored as JSONB.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use tracing::instrument;

use crudkit_coffee::{Drink, DrinkId, DrinkPatch, Ingredient, NewDrink};

use super::{DrinkStore, duplicate_title};
use crate::StoreError;
use crate::error::is_unique_violation;

#[derive(Debug, Clone)]
pub struct PostgresDrinkStore {
    pool: PgPool,
}

impl PostgresDrinkStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

struct DrinkRow {
    id: i64,
    title: String,
    recipe: Json<Vec<Ingredient>>,
}

impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for DrinkRow {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        Ok(DrinkRow {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            recipe: row.try_get("recipe")?,
        })
    }
}

impl From<DrinkRow> for Drink {
    fn from(row: DrinkRow) -> Self {
        Drink {
            id: DrinkId::new(row.id),
            title: row.title,
            recipe: row.recipe.0,
        }
    }
}

#[async_trait]
impl DrinkStore for PostgresDrinkStore {
    #[instrument(skip(self), err)]
    async fn list(&self) -> Result<Vec<Drink>, StoreError> {
        let rows: Vec<DrinkRow> = sqlx::query_as("SELECT id, title, recipe FROM drinks ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::from_sqlx("list_drinks", e))?;
        Ok(rows.into_iter().map(Drink::from).collect())
    }

    #[instrument(skip(self, drink), fields(title = drink.title()), err)]
    async fn insert(&self, drink: NewDrink) -> Result<Drink, StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::from_sqlx("begin_transaction", e))?;

        let id: i64 = sqlx::query_scalar("INSERT INTO drinks (title, recipe) VALUES ($1, $2) RETURNING id")
            .bind(drink.title())
            .bind(Json(drink.recipe()))
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    duplicate_title(drink.title())
                } else {
                    StoreError::from_sqlx("insert_drink", e)
                }
            })?;

        tx.commit()
            .await
            .map_err(|e| StoreError::from_sqlx("commit_transaction", e))?;
        Ok(drink.into_drink(DrinkId::new(id)))
    }

    #[instrument(skip(self, patch), fields(drink_id = %id), err)]
    async fn update(&self, id: DrinkId, patch: DrinkPatch) -> Result<Option<Drink>, StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::from_sqlx("begin_transaction", e))?;

        let row: Option<DrinkRow> =
            sqlx::query_as("SELECT id, title, recipe FROM drinks WHERE id = $1 FOR UPDATE")
                .bind(id.get())
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| StoreError::from_sqlx("lock_drink", e))?;
        let Some(row) = row else {
            return Ok(None);
        };

        let mut drink = Drink::from(row);
        drink.apply(patch);

        sqlx::query("UPDATE drinks SET title = $2, recipe = $3 WHERE id = $1")
            .bind(id.get())
            .bind(&drink.title)
            .bind(Json(&drink.recipe))
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    duplicate_title(&drink.title)
                } else {
                    StoreError::from_sqlx("update_drink", e)
                }
            })?;

        tx.commit()
            .await
            .map_err(|e| StoreError::from_sqlx("commit_transaction", e))?;
        Ok(Some(drink))
    }

    #[instrument(skip(self), fields(drink_id = %id), err)]
    async fn delete(&self, id: DrinkId) -> Result<bool, StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::from_sqlx("begin_transaction", e))?;
        let result = sqlx::query("DELETE FROM drinks WHERE id = $1")
            .bind(id.get())
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::from_sqlx("delete_drink", e))?;
        tx.commit()
            .await
            .map_err(|e| StoreError::from_sqlx("commit_transaction", e))?;
        Ok(result.rows_affected() > 0)
    }
}
