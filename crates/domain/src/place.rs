//! Place — a rentable listing in a city, owned by a user.

use serde::{Deserialize, Serialize};

use crate::id::{AmenityId, CityId, PlaceId, UserId};
use crate::time::{self, Timestamp};

/// A rentable listing.
///
/// `amenity_ids` is the place's side of the many-to-many amenity relation.
/// Storage backends keep it in sync with however they model that relation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: PlaceId,
    #[serde(with = "crate::time::iso")]
    pub created_at: Timestamp,
    #[serde(with = "crate::time::iso")]
    pub updated_at: Timestamp,
    pub city_id: CityId,
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub number_rooms: u32,
    #[serde(default)]
    pub number_bathrooms: u32,
    #[serde(default)]
    pub max_guest: u32,
    #[serde(default)]
    pub price_by_night: u32,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default)]
    pub amenity_ids: Vec<AmenityId>,
}

impl Place {
    #[must_use]
    pub fn new(city_id: CityId, user_id: UserId, name: impl Into<String>) -> Self {
        let now = time::now();
        Self {
            id: PlaceId::new(),
            created_at: now,
            updated_at: now,
            city_id,
            user_id,
            name: name.into(),
            description: None,
            number_rooms: 0,
            number_bathrooms: 0,
            max_guest: 0,
            price_by_night: 0,
            latitude: None,
            longitude: None,
            amenity_ids: Vec::new(),
        }
    }

    /// Whether every id in `amenities` is linked to this place.
    #[must_use]
    pub fn has_amenities<'a>(&self, amenities: impl IntoIterator<Item = &'a AmenityId>) -> bool {
        amenities
            .into_iter()
            .all(|amenity| self.amenity_ids.contains(amenity))
    }
}
