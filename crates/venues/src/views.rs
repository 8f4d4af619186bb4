//! Read-side shapes: area listings, detail pages, show listings, search hits.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crudkit_core::query::group_contiguous;

use crate::{Artist, ArtistId, Show, Timeline, Venue, VenueId};

/// Compact listing row used by area listings and searches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit<I> {
    pub id: I,
    pub name: String,
    pub num_upcoming_shows: usize,
}

/// Venues sharing one city/state pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<SearchHit<VenueId>>,
}

/// Count upcoming shows per key (venue or artist).
pub fn upcoming_counts<K, F>(shows: &[Show], now: DateTime<Utc>, key: F) -> HashMap<K, usize>
where
    K: Eq + core::hash::Hash,
    F: Fn(&Show) -> K,
{
    let mut counts = HashMap::new();
    for show in shows.iter().filter(|s| s.is_upcoming(now)) {
        *counts.entry(key(show)).or_insert(0) += 1;
    }
    counts
}

impl SearchHit<VenueId> {
    pub fn venue(venue: &Venue, counts: &HashMap<VenueId, usize>) -> Self {
        Self {
            id: venue.id,
            name: venue.fields.name.clone(),
            num_upcoming_shows: counts.get(&venue.id).copied().unwrap_or(0),
        }
    }
}

impl SearchHit<ArtistId> {
    pub fn artist(artist: &Artist, counts: &HashMap<ArtistId, usize>) -> Self {
        Self {
            id: artist.id,
            name: artist.fields.name.clone(),
            num_upcoming_shows: counts.get(&artist.id).copied().unwrap_or(0),
        }
    }
}

/// Group venues by (city, state).
///
/// Venues are stably sorted by state then city first, so one pair never ends
/// up in two areas whatever order the store returned them in.
pub fn group_into_areas(mut venues: Vec<Venue>, shows: &[Show], now: DateTime<Utc>) -> Vec<Area> {
    venues.sort_by(|a, b| {
        (&a.fields.state, &a.fields.city).cmp(&(&b.fields.state, &b.fields.city))
    });
    let counts = upcoming_counts(shows, now, |s| s.venue_id);

    group_contiguous(venues, |v| (v.fields.city.clone(), v.fields.state.clone()))
        .into_iter()
        .map(|((city, state), members)| Area {
            city,
            state,
            venues: members
                .iter()
                .map(|v| SearchHit::venue(v, &counts))
                .collect(),
        })
        .collect()
}

/// One row of the public show listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowListing {
    pub venue_id: VenueId,
    pub venue_name: String,
    pub artist_id: ArtistId,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

impl ShowListing {
    pub fn new(show: &Show, venue: &Venue, artist: &Artist) -> Self {
        Self {
            venue_id: venue.id,
            venue_name: venue.fields.name.clone(),
            artist_id: artist.id,
            artist_name: artist.fields.name.clone(),
            artist_image_link: artist.fields.image_link.clone(),
            start_time: show.start_time,
        }
    }
}

/// A show as seen from a venue's page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistAppearance {
    pub artist_id: ArtistId,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// A show as seen from an artist's page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueAppearance {
    pub venue_id: VenueId,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueDetail {
    #[serde(flatten)]
    pub venue: Venue,
    pub past_shows: Vec<ArtistAppearance>,
    pub upcoming_shows: Vec<ArtistAppearance>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl VenueDetail {
    /// `shows` may contain other venues' shows; only this venue's are used.
    /// Shows whose artist is missing from `artists` are skipped.
    pub fn build(
        venue: Venue,
        shows: &[Show],
        artists: &HashMap<ArtistId, Artist>,
        now: DateTime<Utc>,
    ) -> Self {
        let own: Vec<Show> = shows.iter().filter(|s| s.venue_id == venue.id).cloned().collect();
        let timeline = Timeline::partition(own, now).map(|s| {
            artists.get(&s.artist_id).map(|a| ArtistAppearance {
                artist_id: a.id,
                artist_name: a.fields.name.clone(),
                artist_image_link: a.fields.image_link.clone(),
                start_time: s.start_time,
            })
        });
        let past_shows: Vec<_> = timeline.past.into_iter().flatten().collect();
        let upcoming_shows: Vec<_> = timeline.upcoming.into_iter().flatten().collect();

        Self {
            venue,
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistDetail {
    #[serde(flatten)]
    pub artist: Artist,
    pub past_shows: Vec<VenueAppearance>,
    pub upcoming_shows: Vec<VenueAppearance>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl ArtistDetail {
    pub fn build(
        artist: Artist,
        shows: &[Show],
        venues: &HashMap<VenueId, Venue>,
        now: DateTime<Utc>,
    ) -> Self {
        let own: Vec<Show> = shows.iter().filter(|s| s.artist_id == artist.id).cloned().collect();
        let timeline = Timeline::partition(own, now).map(|s| {
            venues.get(&s.venue_id).map(|v| VenueAppearance {
                venue_id: v.id,
                venue_name: v.fields.name.clone(),
                venue_image_link: v.fields.image_link.clone(),
                start_time: s.start_time,
            })
        });
        let past_shows: Vec<_> = timeline.past.into_iter().flatten().collect();
        let upcoming_shows: Vec<_> = timeline.upcoming.into_iter().flatten().collect();

        Self {
            artist,
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ArtistFields, ShowId, VenueFields};
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 15, 20, 0, 0).unwrap()
    }

    fn venue(id: i64, name: &str, city: &str, state: &str) -> Venue {
        Venue {
            id: VenueId::new(id),
            fields: VenueFields {
                name: name.into(),
                city: city.into(),
                state: state.into(),
                ..VenueFields::default()
            },
        }
    }

    fn artist(id: i64, name: &str) -> Artist {
        Artist {
            id: ArtistId::new(id),
            fields: ArtistFields {
                name: name.into(),
                city: "San Francisco".into(),
                state: "CA".into(),
                phone: "326-123-5000".into(),
                image_link: Some(format!("https://img/{id}")),
                ..ArtistFields::default()
            },
        }
    }

    fn show(id: i64, artist: i64, venue: i64, hours: i64) -> Show {
        Show {
            id: ShowId::new(id),
            artist_id: ArtistId::new(artist),
            venue_id: VenueId::new(venue),
            start_time: now() + Duration::hours(hours),
        }
    }

    #[test]
    fn areas_group_by_city_and_state_with_upcoming_counts() {
        let venues = vec![
            venue(1, "The Musical Hop", "San Francisco", "CA"),
            venue(2, "The Dueling Pianos Bar", "New York", "NY"),
            venue(3, "Park Square Live Music & Coffee", "San Francisco", "CA"),
        ];
        let shows = vec![show(1, 1, 3, 24), show(2, 1, 3, -24), show(3, 1, 1, 48)];

        let areas = group_into_areas(venues, &shows, now());
        assert_eq!(areas.len(), 2);
        assert_eq!((areas[0].city.as_str(), areas[0].state.as_str()), ("San Francisco", "CA"));
        assert_eq!(areas[0].venues.len(), 2);
        assert_eq!(areas[0].venues[0].id, VenueId::new(1));
        assert_eq!(areas[0].venues[0].num_upcoming_shows, 1);
        assert_eq!(areas[0].venues[1].num_upcoming_shows, 1);
        assert_eq!(areas[1].state, "NY");
        assert_eq!(areas[1].venues[0].num_upcoming_shows, 0);
    }

    #[test]
    fn venue_detail_splits_past_and_upcoming() {
        let v = venue(1, "The Musical Hop", "San Francisco", "CA");
        let artists: HashMap<_, _> = [artist(4, "Guns N Petals"), artist(5, "Matt Quevedo")]
            .into_iter()
            .map(|a| (a.id, a))
            .collect();
        let shows = vec![
            show(1, 4, 1, -72),
            show(2, 5, 1, 24),
            show(3, 5, 1, 96),
            show(4, 4, 2, 24),
        ];

        let detail = VenueDetail::build(v, &shows, &artists, now());
        assert_eq!(detail.past_shows_count, 1);
        assert_eq!(detail.upcoming_shows_count, 2);
        assert_eq!(detail.past_shows[0].artist_name, "Guns N Petals");
        assert!(detail.upcoming_shows[0].start_time > detail.upcoming_shows[1].start_time);

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["name"], "The Musical Hop");
        assert_eq!(json["upcoming_shows_count"], 2);
    }

    #[test]
    fn artist_detail_lists_venues() {
        let a = artist(4, "Guns N Petals");
        let venues: HashMap<_, _> = [venue(1, "The Musical Hop", "San Francisco", "CA")]
            .into_iter()
            .map(|v| (v.id, v))
            .collect();
        let shows = vec![show(1, 4, 1, -1), show(2, 5, 1, 5)];

        let detail = ArtistDetail::build(a, &shows, &venues, now());
        assert_eq!(detail.past_shows.len(), 1);
        assert_eq!(detail.past_shows[0].venue_name, "The Musical Hop");
        assert!(detail.upcoming_shows.is_empty());
    }

    proptest! {
        /// Property: each (city, state) pair appears in exactly one area, whatever the input order.
        #[test]
        fn areas_never_split_a_pair(keys in proptest::collection::vec((0u8..3, 0u8..3), 0..30)) {
            let venues: Vec<Venue> = keys
                .iter()
                .enumerate()
                .map(|(i, (c, s))| venue(i as i64, "v", &format!("c{c}"), &format!("s{s}")))
                .collect();

            let areas = group_into_areas(venues, &[], now());
            let mut seen = std::collections::HashSet::new();
            for area in &areas {
                prop_assert!(seen.insert((area.city.clone(), area.state.clone())));
            }
            let total: usize = areas.iter().map(|a| a.venues.len()).sum();
            prop_assert_eq!(total, keys.len());
        }
    }
}
