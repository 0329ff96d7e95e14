//! User service — use-cases for managing users.

use std::sync::Arc;

use hbnb_domain::error::HbnbError;
use hbnb_domain::fields::{apply_changes, from_fields};
use hbnb_domain::object::Fields;
use hbnb_domain::user::User;

use super::records;
use crate::ports::Storage;

/// Application service for user CRUD operations.
pub struct UserService<S> {
    storage: Arc<S>,
}

impl<S: Storage + Send + Sync> UserService<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// # Errors
    ///
    /// Returns a storage error propagated from the backend.
    pub async fn list_users(&self) -> Result<Vec<User>, HbnbError> {
        records::list(self.storage.as_ref()).await
    }

    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when no user with `id` exists.
    pub async fn get_user(&self, id: &str) -> Result<User, HbnbError> {
        records::fetch(self.storage.as_ref(), id).await
    }

    /// Create a user. `email` is checked before `password`.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::Validation`] naming the first missing field.
    pub async fn create_user(&self, fields: Fields) -> Result<User, HbnbError> {
        let user: User = from_fields(fields)?;
        records::persist(self.storage.as_ref(), user).await
    }

    /// Apply `changes` to an existing user. The email cannot change.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the user is missing.
    pub async fn update_user(&self, id: &str, changes: &Fields) -> Result<User, HbnbError> {
        let current: User = records::fetch(self.storage.as_ref(), id).await?;
        let updated = apply_changes(&current, changes)?;
        records::persist(self.storage.as_ref(), updated).await
    }

    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the user is missing.
    pub async fn delete_user(&self, id: &str) -> Result<(), HbnbError> {
        records::remove::<_, User>(self.storage.as_ref(), id).await
    }
}
