//! Venue, artist and show persistence for the booking site.

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryBookingStore;
pub use postgres::PostgresBookingStore;

use async_trait::async_trait;

use crudkit_venues::{
    Artist, ArtistFields, ArtistId, ArtistPatch, NewShow, Show, Venue, VenueFields, VenueId,
    VenuePatch,
};

use crate::StoreError;

/// Booking tables boundary.
///
/// Deleting a venue or an artist removes the shows that reference it.
/// Inserting a show whose artist or venue does not exist is a
/// `MissingReference`.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Every venue, ordered by state, then city, then id (so areas are contiguous).
    async fn list_venues(&self) -> Result<Vec<Venue>, StoreError>;
    async fn get_venue(&self, id: VenueId) -> Result<Option<Venue>, StoreError>;
    async fn insert_venue(&self, fields: VenueFields) -> Result<Venue, StoreError>;
    async fn update_venue(&self, id: VenueId, patch: VenuePatch) -> Result<Option<Venue>, StoreError>;
    async fn delete_venue(&self, id: VenueId) -> Result<bool, StoreError>;

    /// Every artist, ordered by id.
    async fn list_artists(&self) -> Result<Vec<Artist>, StoreError>;
    async fn get_artist(&self, id: ArtistId) -> Result<Option<Artist>, StoreError>;
    async fn insert_artist(&self, fields: ArtistFields) -> Result<Artist, StoreError>;
    async fn update_artist(&self, id: ArtistId, patch: ArtistPatch) -> Result<Option<Artist>, StoreError>;
    async fn delete_artist(&self, id: ArtistId) -> Result<bool, StoreError>;

    /// Every show, most recent start time first (ties by id).
    async fn list_shows(&self) -> Result<Vec<Show>, StoreError>;
    async fn insert_show(&self, show: NewShow) -> Result<Show, StoreError>;
}

pub(crate) fn unknown_artist(id: ArtistId) -> StoreError {
    StoreError::MissingReference(format!("artist {id} does not exist"))
}

pub(crate) fn unknown_venue(id: VenueId) -> StoreError {
    StoreError::MissingReference(format!("venue {id} does not exist"))
}
