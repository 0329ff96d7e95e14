//! Storage-specific error type wrapping file and JSON errors.

use hbnb_domain::error::HbnbError;

/// Errors originating from the file storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage file I/O error")]
    Io(#[from] std::io::Error),

    /// The registry could not be encoded, or the file could not be decoded.
    #[error("storage file JSON error")]
    Json(#[from] serde_json::Error),

    /// A document key does not match the class and id of its object.
    #[error("storage file key {key:?} does not match its object")]
    KeyMismatch { key: String },
}

impl From<StorageError> for HbnbError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
