//! City — belongs to exactly one [`State`](crate::state::State).

use serde::{Deserialize, Serialize};

use crate::id::{CityId, StateId};
use crate::time::{self, Timestamp};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: CityId,
    #[serde(with = "crate::time::iso")]
    pub created_at: Timestamp,
    #[serde(with = "crate::time::iso")]
    pub updated_at: Timestamp,
    pub state_id: StateId,
    pub name: String,
}

impl City {
    #[must_use]
    pub fn new(state_id: StateId, name: impl Into<String>) -> Self {
        let now = time::now();
        Self {
            id: CityId::new(),
            created_at: now,
            updated_at: now,
            state_id,
            name: name.into(),
        }
    }
}
