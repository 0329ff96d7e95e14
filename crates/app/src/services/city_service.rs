//! City service — use-cases for managing the cities of a state.

use std::sync::Arc;

use hbnb_domain::city::City;
use hbnb_domain::error::HbnbError;
use hbnb_domain::fields::{apply_changes, from_fields};
use hbnb_domain::object::Fields;
use hbnb_domain::state::State;
use serde_json::Value;

use super::records;
use crate::ports::Storage;

/// Application service for city CRUD operations.
pub struct CityService<S> {
    storage: Arc<S>,
}

impl<S: Storage + Send + Sync> CityService<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// List the cities of a state.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the state is missing.
    pub async fn list_cities(&self, state_id: &str) -> Result<Vec<City>, HbnbError> {
        let state: State = records::fetch(self.storage.as_ref(), state_id).await?;
        let cities: Vec<City> = records::list(self.storage.as_ref()).await?;
        Ok(cities
            .into_iter()
            .filter(|city| city.state_id == state.id)
            .collect())
    }

    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when no city with `id` exists.
    pub async fn get_city(&self, id: &str) -> Result<City, HbnbError> {
        records::fetch(self.storage.as_ref(), id).await
    }

    /// Create a city inside a state. The state is checked before the payload.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the state is missing, or
    /// [`HbnbError::Validation`] when `name` is missing.
    pub async fn create_city(&self, state_id: &str, mut fields: Fields) -> Result<City, HbnbError> {
        let state: State = records::fetch(self.storage.as_ref(), state_id).await?;
        fields.insert("state_id".to_string(), Value::String(state.id.to_string()));
        let city: City = from_fields(fields)?;
        records::persist(self.storage.as_ref(), city).await
    }

    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the city is missing.
    pub async fn update_city(&self, id: &str, changes: &Fields) -> Result<City, HbnbError> {
        let current: City = records::fetch(self.storage.as_ref(), id).await?;
        let updated = apply_changes(&current, changes)?;
        records::persist(self.storage.as_ref(), updated).await
    }

    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the city is missing.
    pub async fn delete_city(&self, id: &str) -> Result<(), HbnbError> {
        records::remove::<_, City>(self.storage.as_ref(), id).await
    }
}
