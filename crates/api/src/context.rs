//! Per-app request context.
//!
//! Each binary builds exactly one context at startup and hands it to its
//! router as axum state; handlers receive it through `State`. Nothing is
//! reached through globals.

use std::sync::Arc;

use crudkit_auth::JwtValidator;
use crudkit_infra::db::{self, PgPool, Schema};
use crudkit_infra::{
    BookingStore, DrinkStore, InMemoryBookingStore, InMemoryDrinkStore, InMemoryTriviaStore,
    PostgresBookingStore, PostgresDrinkStore, PostgresTriviaStore, StoreError, TriviaStore,
};

use crate::config::ApiConfig;

/// Coffee-shop context: the drink store and the token validator.
#[derive(Clone)]
pub struct CoffeeContext {
    pub drinks: Arc<dyn DrinkStore>,
    pub jwt: Arc<dyn JwtValidator>,
}

impl CoffeeContext {
    pub fn new(drinks: Arc<dyn DrinkStore>, jwt: Arc<dyn JwtValidator>) -> Self {
        Self { drinks, jwt }
    }

    pub fn in_memory(jwt: Arc<dyn JwtValidator>) -> Self {
        Self::new(Arc::new(InMemoryDrinkStore::new()), jwt)
    }

    /// Postgres when `DATABASE_URL` is set, otherwise in-memory.
    pub async fn from_config(config: &ApiConfig) -> Result<Self, StoreError> {
        let jwt = config.jwt_validator();
        match connect_with_schema(config, Schema::Drinks).await? {
            Some(pool) => Ok(Self::new(Arc::new(PostgresDrinkStore::new(pool)), jwt)),
            None => Ok(Self::in_memory(jwt)),
        }
    }
}

/// Fyyur context: one store for venues, artists and shows.
#[derive(Clone)]
pub struct BookingContext {
    pub store: Arc<dyn BookingStore>,
    pub jwt: Arc<dyn JwtValidator>,
}

impl BookingContext {
    pub fn new(store: Arc<dyn BookingStore>, jwt: Arc<dyn JwtValidator>) -> Self {
        Self { store, jwt }
    }

    pub fn in_memory(jwt: Arc<dyn JwtValidator>) -> Self {
        Self::new(Arc::new(InMemoryBookingStore::new()), jwt)
    }

    pub async fn from_config(config: &ApiConfig) -> Result<Self, StoreError> {
        let jwt = config.jwt_validator();
        match connect_with_schema(config, Schema::Booking).await? {
            Some(pool) => Ok(Self::new(Arc::new(PostgresBookingStore::new(pool)), jwt)),
            None => Ok(Self::in_memory(jwt)),
        }
    }
}

/// Trivia context: questions and categories.
#[derive(Clone)]
pub struct TriviaContext {
    pub store: Arc<dyn TriviaStore>,
    pub jwt: Arc<dyn JwtValidator>,
}

impl TriviaContext {
    pub fn new(store: Arc<dyn TriviaStore>, jwt: Arc<dyn JwtValidator>) -> Self {
        Self { store, jwt }
    }

    /// In-memory store seeded with the default categories.
    pub fn in_memory(jwt: Arc<dyn JwtValidator>) -> Self {
        Self::new(Arc::new(InMemoryTriviaStore::seeded()), jwt)
    }

    pub async fn from_config(config: &ApiConfig) -> Result<Self, StoreError> {
        let jwt = config.jwt_validator();
        match connect_with_schema(config, Schema::Trivia).await? {
            Some(pool) => Ok(Self::new(Arc::new(PostgresTriviaStore::new(pool)), jwt)),
            None => Ok(Self::in_memory(jwt)),
        }
    }
}

/// Connect and bootstrap `schema`, or `None` when no database is configured.
async fn connect_with_schema(config: &ApiConfig, schema: Schema) -> Result<Option<PgPool>, StoreError> {
    let Some(url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set; using in-memory stores (data is lost on exit)");
        return Ok(None);
    };
    let pool = db::connect(url, config.db_max_connections).await?;
    db::ensure_schema(&pool, schema).await?;
    tracing::info!(?schema, "connected to postgres");
    Ok(Some(pool))
}
