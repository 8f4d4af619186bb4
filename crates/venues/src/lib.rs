//! `crudkit-venues` — the booking site: venues, artists and the shows that
//! connect them.

pub mod artist;
pub mod show;
pub mod venue;
pub mod views;

mod fields;

pub use artist::{Artist, ArtistFields, ArtistId, ArtistPatch};
pub use show::{NewShow, Show, ShowId, Timeline};
pub use venue::{Venue, VenueFields, VenueId, VenuePatch};
pub use views::{
    Area, ArtistAppearance, ArtistDetail, SearchHit, ShowListing, VenueAppearance, VenueDetail,
    group_into_areas,
};
