//! The closed object union shared by every storage backend.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::amenity::Amenity;
use crate::city::City;
use crate::kind::{ObjectKey, ObjectKind};
use crate::place::Place;
use crate::review::Review;
use crate::state::State;
use crate::time::Timestamp;
use crate::user::User;

/// Raw JSON field mapping, as sent by clients.
pub type Fields = serde_json::Map<String, serde_json::Value>;

/// In-memory mapping from composite key to live object.
pub type Registry = BTreeMap<ObjectKey, Object>;

/// Any persisted entity.
///
/// The external form is the entity's own fields plus a `__class__`
/// discriminator naming its kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "__class__")]
pub enum Object {
    Amenity(Amenity),
    City(City),
    Place(Place),
    Review(Review),
    State(State),
    User(User),
}

impl Object {
    #[must_use]
    pub fn kind(&self) -> ObjectKind {
        match self {
            Self::Amenity(_) => ObjectKind::Amenity,
            Self::City(_) => ObjectKind::City,
            Self::Place(_) => ObjectKind::Place,
            Self::Review(_) => ObjectKind::Review,
            Self::State(_) => ObjectKind::State,
            Self::User(_) => ObjectKind::User,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Amenity(inner) => inner.id(),
            Self::City(inner) => inner.id(),
            Self::Place(inner) => inner.id(),
            Self::Review(inner) => inner.id(),
            Self::State(inner) => inner.id(),
            Self::User(inner) => inner.id(),
        }
    }

    /// The registry key this object is stored under.
    #[must_use]
    pub fn key(&self) -> ObjectKey {
        ObjectKey::new(self.kind(), self.id())
    }

    #[must_use]
    pub fn updated_at(&self) -> Timestamp {
        match self {
            Self::Amenity(inner) => inner.updated_at,
            Self::City(inner) => inner.updated_at,
            Self::Place(inner) => inner.updated_at,
            Self::Review(inner) => inner.updated_at,
            Self::State(inner) => inner.updated_at,
            Self::User(inner) => inner.updated_at,
        }
    }
}

/// Behaviour shared by the six concrete entity types.
pub trait Model: Clone + Serialize + DeserializeOwned + Into<Object> + Send + Sync + 'static {
    /// Kind discriminator for this type.
    const KIND: ObjectKind;

    /// Fields a create payload must carry, checked in order.
    const REQUIRED: &'static [&'static str];

    /// Fields an update payload may not change, beyond `id` and timestamps.
    const IMMUTABLE: &'static [&'static str];

    fn id(&self) -> &str;

    /// Refresh `updated_at`.
    fn touch(&mut self);

    /// Narrow an [`Object`] to this type, if it holds one.
    fn from_object(object: Object) -> Option<Self>;

    fn key(&self) -> ObjectKey {
        ObjectKey::new(Self::KIND, self.id())
    }
}

macro_rules! impl_model {
    ($ty:ident, required: [$($required:literal),*], immutable: [$($immutable:literal),*]) => {
        impl From<$ty> for Object {
            fn from(value: $ty) -> Self {
                Self::$ty(value)
            }
        }

        impl Model for $ty {
            const KIND: ObjectKind = ObjectKind::$ty;
            const REQUIRED: &'static [&'static str] = &[$($required),*];
            const IMMUTABLE: &'static [&'static str] = &[$($immutable),*];

            fn id(&self) -> &str {
                self.id.as_str()
            }

            fn touch(&mut self) {
                self.updated_at = crate::time::now();
            }

            fn from_object(object: Object) -> Option<Self> {
                if let Object::$ty(inner) = object {
                    Some(inner)
                } else {
                    None
                }
            }
        }
    };
}

impl_model!(State, required: ["name"], immutable: []);
impl_model!(City, required: ["name"], immutable: ["state_id"]);
impl_model!(Amenity, required: ["name"], immutable: []);
impl_model!(User, required: ["email", "password"], immutable: ["email"]);
impl_model!(Place, required: ["name", "user_id"], immutable: ["user_id", "city_id", "amenity_ids"]);
impl_model!(Review, required: ["user_id", "text"], immutable: ["user_id", "place_id"]);
