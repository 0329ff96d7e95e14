//! Amenity service — use-cases for managing amenities.

use std::sync::Arc;

use hbnb_domain::amenity::Amenity;
use hbnb_domain::error::HbnbError;
use hbnb_domain::fields::{apply_changes, from_fields};
use hbnb_domain::object::Fields;

use super::records;
use crate::ports::Storage;

/// Application service for amenity CRUD operations.
pub struct AmenityService<S> {
    storage: Arc<S>,
}

impl<S: Storage + Send + Sync> AmenityService<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// # Errors
    ///
    /// Returns a storage error propagated from the backend.
    pub async fn list_amenities(&self) -> Result<Vec<Amenity>, HbnbError> {
        records::list(self.storage.as_ref()).await
    }

    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when no amenity with `id` exists.
    pub async fn get_amenity(&self, id: &str) -> Result<Amenity, HbnbError> {
        records::fetch(self.storage.as_ref(), id).await
    }

    /// # Errors
    ///
    /// Returns [`HbnbError::Validation`] when `name` is missing.
    pub async fn create_amenity(&self, fields: Fields) -> Result<Amenity, HbnbError> {
        let amenity: Amenity = from_fields(fields)?;
        records::persist(self.storage.as_ref(), amenity).await
    }

    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the amenity is missing.
    pub async fn update_amenity(&self, id: &str, changes: &Fields) -> Result<Amenity, HbnbError> {
        let current: Amenity = records::fetch(self.storage.as_ref(), id).await?;
        let updated = apply_changes(&current, changes)?;
        records::persist(self.storage.as_ref(), updated).await
    }

    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the amenity is missing.
    pub async fn delete_amenity(&self, id: &str) -> Result<(), HbnbError> {
        records::remove::<_, Amenity>(self.storage.as_ref(), id).await
    }
}
