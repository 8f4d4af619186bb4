use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crudkit_core::Entity;

use crate::{ArtistId, VenueId};

crudkit_core::int_id!(
    /// Show identifier (database-assigned).
    ShowId,
    "ShowId"
);

/// An artist playing a venue at a point in time.
///
/// Invariant: `artist_id` and `venue_id` reference existing records. The
/// store enforces this on insert and cascades deletes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Show {
    pub id: ShowId,
    pub artist_id: ArtistId,
    pub venue_id: VenueId,
    pub start_time: DateTime<Utc>,
}

impl Show {
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.start_time >= now
    }
}

impl Entity for Show {
    type Id = ShowId;

    fn id(&self) -> ShowId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShow {
    pub artist_id: ArtistId,
    pub venue_id: VenueId,
    pub start_time: DateTime<Utc>,
}

impl NewShow {
    pub fn into_show(self, id: ShowId) -> Show {
        Show {
            id,
            artist_id: self.artist_id,
            venue_id: self.venue_id,
            start_time: self.start_time,
        }
    }
}

/// Shows split around `now`, each side latest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline<T> {
    pub past: Vec<T>,
    pub upcoming: Vec<T>,
}

impl Timeline<Show> {
    /// Shows starting strictly before `now` are past; the rest are upcoming.
    pub fn partition(mut shows: Vec<Show>, now: DateTime<Utc>) -> Self {
        shows.sort_by(|a, b| b.start_time.cmp(&a.start_time).then(a.id.cmp(&b.id)));
        let (upcoming, past) = shows.into_iter().partition(|s| s.is_upcoming(now));
        Self { past, upcoming }
    }
}

impl<T> Timeline<T> {
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Timeline<U> {
        Timeline {
            past: self.past.into_iter().map(&mut f).collect(),
            upcoming: self.upcoming.into_iter().map(&mut f).collect(),
        }
    }
}
