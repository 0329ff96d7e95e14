//! State — top-level geographic grouping for cities.

use serde::{Deserialize, Serialize};

use crate::id::StateId;
use crate::time::{self, Timestamp};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub id: StateId,
    #[serde(with = "crate::time::iso")]
    pub created_at: Timestamp,
    #[serde(with = "crate::time::iso")]
    pub updated_at: Timestamp,
    pub name: String,
}

impl State {
    /// Create a state with a fresh id and timestamps.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let now = time::now();
        Self {
            id: StateId::new(),
            created_at: now,
            updated_at: now,
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_start_with_equal_timestamps() {
        let state = State::new("California");
        assert_eq!(state.created_at, state.updated_at);
        assert_eq!(state.name, "California");
    }
}
