use serde::{Deserialize, Serialize};

use crudkit_core::error::{optional_text, require_text};
use crudkit_core::{DomainResult, Entity};

use crate::fields::normalize_genres;

crudkit_core::int_id!(
    /// Venue identifier (database-assigned).
    VenueId,
    "VenueId"
);

/// Everything about a venue except its identity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VenueFields {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl VenueFields {
    /// Enforce required fields and normalize free text.
    pub fn validated(self) -> DomainResult<Self> {
        Ok(Self {
            name: require_text("name", &self.name)?,
            city: require_text("city", &self.city)?,
            state: require_text("state", &self.state)?,
            address: optional_text(self.address),
            phone: optional_text(self.phone),
            image_link: optional_text(self.image_link),
            facebook_link: optional_text(self.facebook_link),
            website: optional_text(self.website),
            genres: normalize_genres(self.genres),
            seeking_talent: self.seeking_talent,
            seeking_description: optional_text(self.seeking_description),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    pub id: VenueId,
    #[serde(flatten)]
    pub fields: VenueFields,
}

impl Entity for Venue {
    type Id = VenueId;

    fn id(&self) -> VenueId {
        self.id
    }
}

/// Partial update for a venue. `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VenuePatch {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub genres: Option<Vec<String>>,
    pub seeking_talent: Option<bool>,
    pub seeking_description: Option<String>,
}

impl VenuePatch {
    /// Produce the patched fields, re-validated as a whole.
    pub fn apply_to(self, current: &VenueFields) -> DomainResult<VenueFields> {
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
        if let Some(v) = self.address {
            next.address = Some(v);
        }
        if let Some(v) = self.phone {
            next.phone = Some(v);
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
        if let Some(v) = self.genres {
            next.genres = v;
        }
        if let Some(v) = self.seeking_talent {
            next.seeking_talent = v;
        }
        if let Some(v) = self.seeking_description {
            next.seeking_description = Some(v);
        }
        next.validated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crudkit_core::DomainError;

    fn musical_hop() -> VenueFields {
        VenueFields {
            name: "The Musical Hop".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            address: Some("1015 Folsom Street".into()),
            genres: vec!["Jazz".into(), "Reggae".into()],
            seeking_talent: true,
            ..VenueFields::default()
        }
    }

    #[test]
    fn missing_city_is_rejected() {
        let mut v = musical_hop();
        v.city = "  ".into();
        assert!(matches!(v.validated(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn blank_optional_fields_become_none() {
        let mut v = musical_hop();
        v.website = Some("   ".into());
        assert_eq!(v.validated().unwrap().website, None);
    }

    #[test]
    fn patch_keeps_untouched_fields() {
        let current = musical_hop().validated().unwrap();
        let patch = VenuePatch {
            phone: Some("123-123-1234".into()),
            ..VenuePatch::default()
        };

        let next = patch.apply_to(&current).unwrap();
        assert_eq!(next.phone.as_deref(), Some("123-123-1234"));
        assert_eq!(next.name, current.name);
        assert_eq!(next.genres, current.genres);
    }

    #[test]
    fn patch_cannot_blank_a_required_field() {
        let current = musical_hop().validated().unwrap();
        let patch = VenuePatch {
            name: Some("".into()),
            ..VenuePatch::default()
        };
        assert!(patch.apply_to(&current).is_err());
    }

    #[test]
    fn serializes_flat() {
        let venue = Venue {
            id: VenueId::new(1),
            fields: musical_hop(),
        };
        let json = serde_json::to_value(&venue).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "The Musical Hop");
        assert_eq!(json["seeking_talent"], true);
    }
}
