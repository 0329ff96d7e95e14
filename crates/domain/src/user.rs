//! User — owner of places and author of reviews.

use serde::{Deserialize, Serialize};

use crate::id::UserId;
use crate::time::{self, Timestamp};

/// A registered user.
///
/// `password` is persisted by storage backends but never rendered by the
/// HTTP adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(with = "crate::time::iso")]
    pub created_at: Timestamp,
    #[serde(with = "crate::time::iso")]
    pub updated_at: Timestamp,
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl User {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        let now = time::now();
        Self {
            id: UserId::new(),
            created_at: now,
            updated_at: now,
            email: email.into(),
            password: password.into(),
            first_name: None,
            last_name: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_deserialize_without_optional_names() {
        let user = User::new("a@b.c", "pw");
        let mut json = serde_json::to_value(&user).unwrap();
        let fields = json.as_object_mut().unwrap();
        fields.remove("first_name");
        fields.remove("last_name");
        let parsed: User = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, user);
    }
}
