//! Review — a user's text about a place.

use serde::{Deserialize, Serialize};

use crate::id::{PlaceId, ReviewId, UserId};
use crate::time::{self, Timestamp};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    #[serde(with = "crate::time::iso")]
    pub created_at: Timestamp,
    #[serde(with = "crate::time::iso")]
    pub updated_at: Timestamp,
    pub place_id: PlaceId,
    pub user_id: UserId,
    pub text: String,
}

impl Review {
    #[must_use]
    pub fn new(place_id: PlaceId, user_id: UserId, text: impl Into<String>) -> Self {
        let now = time::now();
        Self {
            id: ReviewId::new(),
            created_at: now,
            updated_at: now,
            place_id,
            user_id,
            text: text.into(),
        }
    }
}
