use std::sync::RwLock;

use async_trait::async_trait;

use crudkit_venues::{
    Artist, ArtistFields, ArtistId, ArtistPatch, NewShow, Show, ShowId, Venue, VenueFields,
    VenueId, VenuePatch,
};

use super::{BookingStore, unknown_artist, unknown_venue};
use crate::StoreError;
use crate::memory::{Table, poisoned};

#[derive(Debug, Default)]
struct Tables {
    venues: Table<Venue>,
    artists: Table<Artist>,
    shows: Table<Show>,
}

/// In-memory booking store. All three tables sit behind one lock so cascades
/// are atomic.
#[derive(Debug, Default)]
pub struct InMemoryBookingStore {
    tables: RwLock<Tables>,
}

impl InMemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingStore for InMemoryBookingStore {
    async fn list_venues(&self) -> Result<Vec<Venue>, StoreError> {
        let mut venues = self.tables.read().map_err(poisoned)?.venues.snapshot();
        venues.sort_by(|a, b| {
            (&a.fields.state, &a.fields.city, a.id).cmp(&(&b.fields.state, &b.fields.city, b.id))
        });
        Ok(venues)
    }

    async fn get_venue(&self, id: VenueId) -> Result<Option<Venue>, StoreError> {
        Ok(self.tables.read().map_err(poisoned)?.venues.get(id.get()).cloned())
    }

    async fn insert_venue(&self, fields: VenueFields) -> Result<Venue, StoreError> {
        let mut tables = self.tables.write().map_err(poisoned)?;
        let id = tables.venues.next_id();
        let venue = Venue {
            id: VenueId::new(id),
            fields,
        };
        tables.venues.insert(id, venue.clone());
        Ok(venue)
    }

    async fn update_venue(&self, id: VenueId, patch: VenuePatch) -> Result<Option<Venue>, StoreError> {
        let mut tables = self.tables.write().map_err(poisoned)?;
        let Some(venue) = tables.venues.get_mut(id.get()) else {
            return Ok(None);
        };
        venue.fields = patch.apply_to(&venue.fields)?;
        Ok(Some(venue.clone()))
    }

    async fn delete_venue(&self, id: VenueId) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().map_err(poisoned)?;
        if tables.venues.remove(id.get()).is_none() {
            return Ok(false);
        }
        tables.shows.retain(|s| s.venue_id != id);
        Ok(true)
    }

    async fn list_artists(&self) -> Result<Vec<Artist>, StoreError> {
        Ok(self.tables.read().map_err(poisoned)?.artists.snapshot())
    }

    async fn get_artist(&self, id: ArtistId) -> Result<Option<Artist>, StoreError> {
        Ok(self.tables.read().map_err(poisoned)?.artists.get(id.get()).cloned())
    }

    async fn insert_artist(&self, fields: ArtistFields) -> Result<Artist, StoreError> {
        let mut tables = self.tables.write().map_err(poisoned)?;
        let id = tables.artists.next_id();
        let artist = Artist {
            id: ArtistId::new(id),
            fields,
        };
        tables.artists.insert(id, artist.clone());
        Ok(artist)
    }

    async fn update_artist(&self, id: ArtistId, patch: ArtistPatch) -> Result<Option<Artist>, StoreError> {
        let mut tables = self.tables.write().map_err(poisoned)?;
        let Some(artist) = tables.artists.get_mut(id.get()) else {
            return Ok(None);
        };
        artist.fields = patch.apply_to(&artist.fields)?;
        Ok(Some(artist.clone()))
    }

    async fn delete_artist(&self, id: ArtistId) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().map_err(poisoned)?;
        if tables.artists.remove(id.get()).is_none() {
            return Ok(false);
        }
        tables.shows.retain(|s| s.artist_id != id);
        Ok(true)
    }

    async fn list_shows(&self) -> Result<Vec<Show>, StoreError> {
        let mut shows = self.tables.read().map_err(poisoned)?.shows.snapshot();
        shows.sort_by(|a, b| b.start_time.cmp(&a.start_time).then(a.id.cmp(&b.id)));
        Ok(shows)
    }

    async fn insert_show(&self, show: NewShow) -> Result<Show, StoreError> {
        let mut tables = self.tables.write().map_err(poisoned)?;
        if !tables.artists.contains(show.artist_id.get()) {
            return Err(unknown_artist(show.artist_id));
        }
        if !tables.venues.contains(show.venue_id.get()) {
            return Err(unknown_venue(show.venue_id));
        }
        let id = tables.shows.next_id();
        let show = show.into_show(ShowId::new(id));
        tables.shows.insert(id, show.clone());
        Ok(show)
    }
}
