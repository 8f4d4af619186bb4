//! Postgres pool and schema bootstrap.

pub use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::StoreError;

/// Open a connection pool against `database_url`.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, StoreError> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .map_err(|e| StoreError::from_sqlx("connect", e))?;
    Ok(pool)
}

const DRINKS_DDL: &[&str] = &[r#"
    CREATE TABLE IF NOT EXISTS drinks (
        id BIGSERIAL PRIMARY KEY,
        title TEXT NOT NULL UNIQUE,
        recipe JSONB NOT NULL
    )
    "#];

const BOOKING_DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS venues (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        city TEXT NOT NULL,
        state TEXT NOT NULL,
        address TEXT,
        phone TEXT,
        image_link TEXT,
        facebook_link TEXT,
        website TEXT,
        genres TEXT[] NOT NULL DEFAULT '{}',
        seeking_talent BOOLEAN NOT NULL DEFAULT FALSE,
        seeking_description TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS artists (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        city TEXT NOT NULL,
        state TEXT NOT NULL,
        phone TEXT NOT NULL,
        genres TEXT[] NOT NULL DEFAULT '{}',
        image_link TEXT,
        facebook_link TEXT,
        website TEXT,
        seeking_venue BOOLEAN NOT NULL DEFAULT FALSE,
        seeking_description TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS shows (
        id BIGSERIAL PRIMARY KEY,
        artist_id BIGINT NOT NULL REFERENCES artists(id) ON DELETE CASCADE,
        venue_id BIGINT NOT NULL REFERENCES venues(id) ON DELETE CASCADE,
        start_time TIMESTAMPTZ NOT NULL
    )
    "#,
];

const TRIVIA_DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS categories (
        id BIGSERIAL PRIMARY KEY,
        type TEXT NOT NULL UNIQUE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS questions (
        id BIGSERIAL PRIMARY KEY,
        question TEXT NOT NULL,
        answer TEXT NOT NULL,
        category BIGINT NOT NULL REFERENCES categories(id),
        difficulty INTEGER NOT NULL CHECK (difficulty BETWEEN 1 AND 5)
    )
    "#,
    r#"
    INSERT INTO categories (type)
    VALUES ('Science'), ('Art'), ('Geography'), ('History'), ('Entertainment'), ('Sports')
    ON CONFLICT (type) DO NOTHING
    "#,
];

/// Which app's tables to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schema {
    Drinks,
    Booking,
    Trivia,
}

impl Schema {
    fn statements(self) -> &'static [&'static str] {
        match self {
            Schema::Drinks => DRINKS_DDL,
            Schema::Booking => BOOKING_DDL,
            Schema::Trivia => TRIVIA_DDL,
        }
    }
}

/// Create the app's tables if they do not exist yet. Safe to run on every start.
pub async fn ensure_schema(pool: &PgPool, schema: Schema) -> Result<(), StoreError> {
    tracing::info!(?schema, "ensuring database schema");
    for statement in schema.statements() {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| StoreError::from_sqlx("ensure_schema", e))?;
    }
    Ok(())
}
