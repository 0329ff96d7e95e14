//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`HbnbError`]
//! via `#[from]` (or an explicit `From` impl for adapter errors).

use crate::kind::ObjectKind;

/// Top-level error returned by services and storage ports.
#[derive(Debug, thiserror::Error)]
pub enum HbnbError {
    /// The client sent a payload that cannot be accepted.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The requested object does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// A storage backend failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Payload validation failures.
///
/// The `Display` output is the exact message returned to HTTP clients.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// Body is missing, malformed, or not a JSON object.
    #[error("Not a JSON")]
    NotAJson,

    /// A required field is absent from the payload.
    #[error("Missing {0}")]
    MissingField(&'static str),

    /// A field is present but has the wrong shape.
    #[error("Invalid field: {0}")]
    InvalidField(#[source] serde_json::Error),
}

/// No object of `kind` is registered under `id`.
#[derive(Debug, thiserror::Error)]
#[error("{kind} {id} not found")]
pub struct NotFoundError {
    pub kind: ObjectKind,
    pub id: String,
}

impl NotFoundError {
    #[must_use]
    pub fn new(kind: ObjectKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}
