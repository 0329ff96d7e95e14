//! Client-facing rendering of domain objects.

use serde::{Serialize, Serializer};

use hbnb_domain::id::UserId;
use hbnb_domain::object::Object;
use hbnb_domain::time::Timestamp;
use hbnb_domain::user::User;

/// External form of an object as returned by the API.
///
/// Identical to the stored form (fields plus `__class__`), except that users
/// never expose their password.
#[derive(Debug)]
pub struct View(Object);

impl View {
    pub fn of(model: impl Into<Object>) -> Self {
        Self(model.into())
    }

    pub fn all<M: Into<Object>>(models: impl IntoIterator<Item = M>) -> Vec<Self> {
        models.into_iter().map(Self::of).collect()
    }
}

#[derive(Serialize)]
#[serde(tag = "__class__", rename = "User")]
struct PublicUser<'a> {
    id: &'a UserId,
    #[serde(with = "hbnb_domain::time::iso")]
    created_at: Timestamp,
    #[serde(with = "hbnb_domain::time::iso")]
    updated_at: Timestamp,
    email: &'a str,
    first_name: Option<&'a str>,
    last_name: Option<&'a str>,
}

impl<'a> From<&'a User> for PublicUser<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            id: &user.id,
            created_at: user.created_at,
            updated_at: user.updated_at,
            email: &user.email,
            first_name: user.first_name.as_deref(),
            last_name: user.last_name.as_deref(),
        }
    }
}

impl Serialize for View {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.0 {
            Object::User(user) => PublicUser::from(user).serialize(serializer),
            other => other.serialize(serializer),
        }
    }
}
