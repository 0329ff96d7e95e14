//! Object kinds and the `<Type>.<id>` composite key.

use std::fmt;
use std::str::FromStr;

/// The closed set of persisted entity kinds.
///
/// Variant order drives registry ordering, so keep it alphabetical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ObjectKind {
    Amenity,
    City,
    Place,
    Review,
    State,
    User,
}

impl ObjectKind {
    /// Every kind, in registry order.
    pub const ALL: [Self; 6] = [
        Self::Amenity,
        Self::City,
        Self::Place,
        Self::Review,
        Self::State,
        Self::User,
    ];

    /// Class name written to the `__class__` discriminator and used as the
    /// key prefix.
    #[must_use]
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Amenity => "Amenity",
            Self::City => "City",
            Self::Place => "Place",
            Self::Review => "Review",
            Self::State => "State",
            Self::User => "User",
        }
    }

    /// Plural collection name, as used by `/stats`.
    #[must_use]
    pub fn collection(self) -> &'static str {
        match self {
            Self::Amenity => "amenities",
            Self::City => "cities",
            Self::Place => "places",
            Self::Review => "reviews",
            Self::State => "states",
            Self::User => "users",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

/// A class name that matches no [`ObjectKind`].
#[derive(Debug, thiserror::Error)]
#[error("unknown class {0:?}")]
pub struct UnknownKindError(pub String);

impl FromStr for ObjectKind {
    type Err = UnknownKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.class_name() == s)
            .ok_or_else(|| UnknownKindError(s.to_string()))
    }
}

/// Registry key: the object's kind plus its id, rendered `<Type>.<id>`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectKey {
    kind: ObjectKind,
    id: String,
}

impl ObjectKey {
    #[must_use]
    pub fn new(kind: ObjectKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.kind, self.id)
    }
}

/// Failure to parse a `<Type>.<id>` string.
#[derive(Debug, thiserror::Error)]
pub enum ParseKeyError {
    #[error("missing '.' separator in {0:?}")]
    MissingSeparator(String),

    #[error(transparent)]
    UnknownKind(#[from] UnknownKindError),
}

impl FromStr for ObjectKey {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, id) = s
            .split_once('.')
            .ok_or_else(|| ParseKeyError::MissingSeparator(s.to_string()))?;
        Ok(Self::new(kind.parse()?, id))
    }
}
