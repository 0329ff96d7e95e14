//! Amenity — a feature a place can offer (wifi, pool, …).

use serde::{Deserialize, Serialize};

use crate::id::AmenityId;
use crate::time::{self, Timestamp};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amenity {
    pub id: AmenityId,
    #[serde(with = "crate::time::iso")]
    pub created_at: Timestamp,
    #[serde(with = "crate::time::iso")]
    pub updated_at: Timestamp,
    pub name: String,
}

impl Amenity {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let now = time::now();
        Self {
            id: AmenityId::new(),
            created_at: now,
            updated_at: now,
            name: name.into(),
        }
    }
}
