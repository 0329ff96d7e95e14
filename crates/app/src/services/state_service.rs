//! State service — use-cases for managing states.

use std::sync::Arc;

use hbnb_domain::error::HbnbError;
use hbnb_domain::fields::{apply_changes, from_fields};
use hbnb_domain::object::Fields;
use hbnb_domain::state::State;

use super::records;
use crate::ports::Storage;

/// Application service for state CRUD operations.
pub struct StateService<S> {
    storage: Arc<S>,
}

impl<S: Storage + Send + Sync> StateService<S> {
    /// Create a new service backed by the given storage.
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// List all states.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the backend.
    pub async fn list_states(&self) -> Result<Vec<State>, HbnbError> {
        records::list(self.storage.as_ref()).await
    }

    /// Look up a state by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when no state with `id` exists.
    pub async fn get_state(&self, id: &str) -> Result<State, HbnbError> {
        records::fetch(self.storage.as_ref(), id).await
    }

    /// Create a state from a client payload.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::Validation`] when `name` is missing.
    pub async fn create_state(&self, fields: Fields) -> Result<State, HbnbError> {
        let state: State = from_fields(fields)?;
        records::persist(self.storage.as_ref(), state).await
    }

    /// Apply `changes` to an existing state.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the state is missing, or
    /// [`HbnbError::Validation`] when a change has the wrong type.
    pub async fn update_state(&self, id: &str, changes: &Fields) -> Result<State, HbnbError> {
        let current: State = records::fetch(self.storage.as_ref(), id).await?;
        let updated = apply_changes(&current, changes)?;
        records::persist(self.storage.as_ref(), updated).await
    }

    /// Delete a state by id.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the state is missing.
    pub async fn delete_state(&self, id: &str) -> Result<(), HbnbError> {
        records::remove::<_, State>(self.storage.as_ref(), id).await
    }
}
