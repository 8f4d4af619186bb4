//! Postgres-backed booking store.
//!
//! `shows.artist_id` and `shows.venue_id` reference their parents with
//! `ON DELETE CASCADE`, so deleting a venue or artist removes its shows in the
//! same statement. Show inserts check both parents inside the transaction to
//! report which one is missing; the foreign keys remain the backstop.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Row, Transaction};
use tracing::instrument;

use crudkit_venues::{
    Artist, ArtistFields, ArtistId, ArtistPatch, NewShow, Show, ShowId, Venue, VenueFields,
    VenueId, VenuePatch,
};

use super::{BookingStore, unknown_artist, unknown_venue};
use crate::StoreError;

const VENUE_COLUMNS: &str = "id, name, city, state, address, phone, image_link, facebook_link, \
                             website, genres, seeking_talent, seeking_description";
const ARTIST_COLUMNS: &str = "id, name, city, state, phone, genres, image_link, facebook_link, \
                              website, seeking_venue, seeking_description";

#[derive(Debug, Clone)]
pub struct PostgresBookingStore {
    pool: PgPool,
}

impl PostgresBookingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn begin(&self) -> Result<Transaction<'static, Postgres>, StoreError> {
        self.pool
            .begin()
            .await
            .map_err(|e| StoreError::from_sqlx("begin_transaction", e))
    }
}

async fn commit(tx: Transaction<'static, Postgres>) -> Result<(), StoreError> {
    tx.commit()
        .await
        .map_err(|e| StoreError::from_sqlx("commit_transaction", e))
}

struct VenueRow(Venue);

impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for VenueRow {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        Ok(VenueRow(Venue {
            id: VenueId::new(row.try_get("id")?),
            fields: VenueFields {
                name: row.try_get("name")?,
                city: row.try_get("city")?,
                state: row.try_get("state")?,
                address: row.try_get("address")?,
                phone: row.try_get("phone")?,
                image_link: row.try_get("image_link")?,
                facebook_link: row.try_get("facebook_link")?,
                website: row.try_get("website")?,
                genres: row.try_get("genres")?,
                seeking_talent: row.try_get("seeking_talent")?,
                seeking_description: row.try_get("seeking_description")?,
            },
        }))
    }
}

struct ArtistRow(Artist);

impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for ArtistRow {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        Ok(ArtistRow(Artist {
            id: ArtistId::new(row.try_get("id")?),
            fields: ArtistFields {
                name: row.try_get("name")?,
                city: row.try_get("city")?,
                state: row.try_get("state")?,
                phone: row.try_get("phone")?,
                genres: row.try_get("genres")?,
                image_link: row.try_get("image_link")?,
                facebook_link: row.try_get("facebook_link")?,
                website: row.try_get("website")?,
                seeking_venue: row.try_get("seeking_venue")?,
                seeking_description: row.try_get("seeking_description")?,
            },
        }))
    }
}

struct ShowRow(Show);

impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for ShowRow {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        let start_time: DateTime<Utc> = row.try_get("start_time")?;
        Ok(ShowRow(Show {
            id: ShowId::new(row.try_get("id")?),
            artist_id: ArtistId::new(row.try_get("artist_id")?),
            venue_id: VenueId::new(row.try_get("venue_id")?),
            start_time,
        }))
    }
}

async fn write_venue(
    tx: &mut Transaction<'static, Postgres>,
    id: VenueId,
    f: &VenueFields,
) -> Result<(), StoreError> {
    sqlx::query(
        r#"
        UPDATE venues SET
            name = $2, city = $3, state = $4, address = $5, phone = $6, image_link = $7,
            facebook_link = $8, website = $9, genres = $10, seeking_talent = $11,
            seeking_description = $12
        WHERE id = $1
        "#,
    )
    .bind(id.get())
    .bind(&f.name)
    .bind(&f.city)
    .bind(&f.state)
    .bind(&f.address)
    .bind(&f.phone)
    .bind(&f.image_link)
    .bind(&f.facebook_link)
    .bind(&f.website)
    .bind(&f.genres)
    .bind(f.seeking_talent)
    .bind(&f.seeking_description)
    .execute(&mut **tx)
    .await
    .map_err(|e| StoreError::from_sqlx("update_venue", e))?;
    Ok(())
}

async fn write_artist(
    tx: &mut Transaction<'static, Postgres>,
    id: ArtistId,
    f: &ArtistFields,
) -> Result<(), StoreError> {
    sqlx::query(
        r#"
        UPDATE artists SET
            name = $2, city = $3, state = $4, phone = $5, genres = $6, image_link = $7,
            facebook_link = $8, website = $9, seeking_venue = $10, seeking_description = $11
        WHERE id = $1
        "#,
    )
    .bind(id.get())
    .bind(&f.name)
    .bind(&f.city)
    .bind(&f.state)
    .bind(&f.phone)
    .bind(&f.genres)
    .bind(&f.image_link)
    .bind(&f.facebook_link)
    .bind(&f.website)
    .bind(f.seeking_venue)
    .bind(&f.seeking_description)
    .execute(&mut **tx)
    .await
    .map_err(|e| StoreError::from_sqlx("update_artist", e))?;
    Ok(())
}

async fn delete_by_id(
    tx: &mut Transaction<'static, Postgres>,
    sql: &'static str,
    id: i64,
    operation: &'static str,
) -> Result<bool, StoreError> {
    let result = sqlx::query(sql)
        .bind(id)
        .execute(&mut **tx)
        .await
        .map_err(|e| StoreError::from_sqlx(operation, e))?;
    Ok(result.rows_affected() > 0)
}

#[async_trait]
impl BookingStore for PostgresBookingStore {
    #[instrument(skip(self), err)]
    async fn list_venues(&self) -> Result<Vec<Venue>, StoreError> {
        let sql = format!("SELECT {VENUE_COLUMNS} FROM venues ORDER BY state, city, id");
        let rows: Vec<VenueRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::from_sqlx("list_venues", e))?;
        Ok(rows.into_iter().map(|r| r.0).collect())
    }

    #[instrument(skip(self), fields(venue_id = %id), err)]
    async fn get_venue(&self, id: VenueId) -> Result<Option<Venue>, StoreError> {
        let sql = format!("SELECT {VENUE_COLUMNS} FROM venues WHERE id = $1");
        let row: Option<VenueRow> = sqlx::query_as(&sql)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::from_sqlx("get_venue", e))?;
        Ok(row.map(|r| r.0))
    }

    #[instrument(skip(self, fields), fields(name = %fields.name), err)]
    async fn insert_venue(&self, fields: VenueFields) -> Result<Venue, StoreError> {
        let mut tx = self.begin().await?;
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO venues (name, city, state, address, phone, image_link, facebook_link,
                                website, genres, seeking_talent, seeking_description)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id
            "#,
        )
        .bind(&fields.name)
        .bind(&fields.city)
        .bind(&fields.state)
        .bind(&fields.address)
        .bind(&fields.phone)
        .bind(&fields.image_link)
        .bind(&fields.facebook_link)
        .bind(&fields.website)
        .bind(&fields.genres)
        .bind(fields.seeking_talent)
        .bind(&fields.seeking_description)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| StoreError::from_sqlx("insert_venue", e))?;
        commit(tx).await?;
        Ok(Venue {
            id: VenueId::new(id),
            fields,
        })
    }

    #[instrument(skip(self, patch), fields(venue_id = %id), err)]
    async fn update_venue(&self, id: VenueId, patch: VenuePatch) -> Result<Option<Venue>, StoreError> {
        let mut tx = self.begin().await?;
        let sql = format!("SELECT {VENUE_COLUMNS} FROM venues WHERE id = $1 FOR UPDATE");
        let row: Option<VenueRow> = sqlx::query_as(&sql)
            .bind(id.get())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| StoreError::from_sqlx("lock_venue", e))?;
        let Some(VenueRow(mut venue)) = row else {
            return Ok(None);
        };
        venue.fields = patch.apply_to(&venue.fields)?;
        write_venue(&mut tx, id, &venue.fields).await?;
        commit(tx).await?;
        Ok(Some(venue))
    }

    #[instrument(skip(self), fields(venue_id = %id), err)]
    async fn delete_venue(&self, id: VenueId) -> Result<bool, StoreError> {
        let mut tx = self.begin().await?;
        let deleted = delete_by_id(&mut tx, "DELETE FROM venues WHERE id = $1", id.get(), "delete_venue").await?;
        commit(tx).await?;
        Ok(deleted)
    }

    #[instrument(skip(self), err)]
    async fn list_artists(&self) -> Result<Vec<Artist>, StoreError> {
        let sql = format!("SELECT {ARTIST_COLUMNS} FROM artists ORDER BY id");
        let rows: Vec<ArtistRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::from_sqlx("list_artists", e))?;
        Ok(rows.into_iter().map(|r| r.0).collect())
    }

    #[instrument(skip(self), fields(artist_id = %id), err)]
    async fn get_artist(&self, id: ArtistId) -> Result<Option<Artist>, StoreError> {
        let sql = format!("SELECT {ARTIST_COLUMNS} FROM artists WHERE id = $1");
        let row: Option<ArtistRow> = sqlx::query_as(&sql)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::from_sqlx("get_artist", e))?;
        Ok(row.map(|r| r.0))
    }

    #[instrument(skip(self, fields), fields(name = %fields.name), err)]
    async fn insert_artist(&self, fields: ArtistFields) -> Result<Artist, StoreError> {
        let mut tx = self.begin().await?;
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO artists (name, city, state, phone, genres, image_link, facebook_link,
                                 website, seeking_venue, seeking_description)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id
            "#,
        )
        .bind(&fields.name)
        .bind(&fields.city)
        .bind(&fields.state)
        .bind(&fields.phone)
        .bind(&fields.genres)
        .bind(&fields.image_link)
        .bind(&fields.facebook_link)
        .bind(&fields.website)
        .bind(fields.seeking_venue)
        .bind(&fields.seeking_description)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| StoreError::from_sqlx("insert_artist", e))?;
        commit(tx).await?;
        Ok(Artist {
            id: ArtistId::new(id),
            fields,
        })
    }

    #[instrument(skip(self, patch), fields(artist_id = %id), err)]
    async fn update_artist(&self, id: ArtistId, patch: ArtistPatch) -> Result<Option<Artist>, StoreError> {
        let mut tx = self.begin().await?;
        let sql = format!("SELECT {ARTIST_COLUMNS} FROM artists WHERE id = $1 FOR UPDATE");
        let row: Option<ArtistRow> = sqlx::query_as(&sql)
            .bind(id.get())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| StoreError::from_sqlx("lock_artist", e))?;
        let Some(ArtistRow(mut artist)) = row else {
            return Ok(None);
        };
        artist.fields = patch.apply_to(&artist.fields)?;
        write_artist(&mut tx, id, &artist.fields).await?;
        commit(tx).await?;
        Ok(Some(artist))
    }

    #[instrument(skip(self), fields(artist_id = %id), err)]
    async fn delete_artist(&self, id: ArtistId) -> Result<bool, StoreError> {
        let mut tx = self.begin().await?;
        let deleted = delete_by_id(&mut tx, "DELETE FROM artists WHERE id = $1", id.get(), "delete_artist").await?;
        commit(tx).await?;
        Ok(deleted)
    }

    #[instrument(skip(self), err)]
    async fn list_shows(&self) -> Result<Vec<Show>, StoreError> {
        let rows: Vec<ShowRow> = sqlx::query_as(
            "SELECT id, artist_id, venue_id, start_time FROM shows ORDER BY start_time DESC, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::from_sqlx("list_shows", e))?;
        Ok(rows.into_iter().map(|r| r.0).collect())
    }

    #[instrument(skip(self), err)]
    async fn insert_show(&self, show: NewShow) -> Result<Show, StoreError> {
        let mut tx = self.begin().await?;

        let row = sqlx::query(
            r#"
            SELECT
                EXISTS (SELECT 1 FROM artists WHERE id = $1) AS artist_exists,
                EXISTS (SELECT 1 FROM venues WHERE id = $2) AS venue_exists
            "#,
        )
        .bind(show.artist_id.get())
        .bind(show.venue_id.get())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| StoreError::from_sqlx("check_show_references", e))?;
        let artist_exists: bool = row
            .try_get("artist_exists")
            .map_err(|e| StoreError::from_sqlx("check_show_references", e))?;
        let venue_exists: bool = row
            .try_get("venue_exists")
            .map_err(|e| StoreError::from_sqlx("check_show_references", e))?;
        if !artist_exists {
            return Err(unknown_artist(show.artist_id));
        }
        if !venue_exists {
            return Err(unknown_venue(show.venue_id));
        }

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO shows (artist_id, venue_id, start_time) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(show.artist_id.get())
        .bind(show.venue_id.get())
        .bind(show.start_time)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| StoreError::from_sqlx("insert_show", e))?;
        commit(tx).await?;
        Ok(show.into_show(ShowId::new(id)))
    }
}
