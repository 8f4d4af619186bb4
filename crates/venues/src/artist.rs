use serde::{Deserialize, Serialize};

use crudkit_core::error::{optional_text, require_text};
use crudkit_core::{DomainResult, Entity};

use crate::fields::normalize_genres;

crudkit_core::int_id!(
    /// Artist identifier (database-assigned).
    ArtistId,
    "ArtistId"
);

/// Everything about an artist except its identity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArtistFields {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    #[serde(default)]
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    #[serde(default)]
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl ArtistFields {
    pub fn validated(self) -> DomainResult<Self> {
        Ok(Self {
            name: require_text("name", &self.name)?,
            city: require_text("city", &self.city)?,
            state: require_text("state", &self.state)?,
            phone: require_text("phone", &self.phone)?,
            genres: normalize_genres(self.genres),
            image_link: optional_text(self.image_link),
            facebook_link: optional_text(self.facebook_link),
            website: optional_text(self.website),
            seeking_venue: self.seeking_venue,
            seeking_description: optional_text(self.seeking_description),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: ArtistId,
    #[serde(flatten)]
    pub fields: ArtistFields,
}

impl Entity for Artist {
    type Id = ArtistId;

    fn id(&self) -> ArtistId {
        self.id
    }
}

/// Partial update for an artist. `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ArtistPatch {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub genres: Option<Vec<String>>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: Option<bool>,
    pub seeking_description: Option<String>,
}

impl ArtistPatch {
    pub fn apply_to(self, current: &ArtistFields) -> DomainResult<ArtistFields> {
        let mut next = current.clone();
        if let Some(v) = self.name {
            next.name = v;
        }
        if let Some(v) = self.city {
            next.city = v;
        }
        if let Some(v) = self.state {
            next.state = v;
        }
        if let Some(v) = self.phone {
            next.phone = v;
        }
        if let Some(v) = self.genres {
            next.genres = v;
        }
        if let Some(v) = self.image_link {
            next.image_link = Some(v);
        }
        if let Some(v) = self.facebook_link {
            next.facebook_link = Some(v);
        }
        if let Some(v) = self.website {
            next.website = Some(v);
        }
        if let Some(v) = self.seeking_venue {
            next.seeking_venue = v;
        }
        if let Some(v) = self.seeking_description {
            next.seeking_description = Some(v);
        }
        next.validated()
    }
}
