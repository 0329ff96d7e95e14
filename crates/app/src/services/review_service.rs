//! Review service — use-cases for the reviews of a place.

use std::sync::Arc;

use hbnb_domain::error::HbnbError;
use hbnb_domain::fields::{apply_changes, from_fields};
use hbnb_domain::id::UserId;
use hbnb_domain::object::Fields;
use hbnb_domain::place::Place;
use hbnb_domain::review::Review;
use hbnb_domain::user::User;
use serde_json::Value;

use super::records;
use crate::ports::Storage;

/// Application service for review CRUD operations.
pub struct ReviewService<S> {
    storage: Arc<S>,
}

impl<S: Storage + Send + Sync> ReviewService<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// List the reviews of a place.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the place is missing.
    pub async fn list_reviews(&self, place_id: &str) -> Result<Vec<Review>, HbnbError> {
        let place: Place = records::fetch(self.storage.as_ref(), place_id).await?;
        let reviews: Vec<Review> = records::list(self.storage.as_ref()).await?;
        Ok(reviews
            .into_iter()
            .filter(|review| review.place_id == place.id)
            .collect())
    }

    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when no review with `id` exists.
    pub async fn get_review(&self, id: &str) -> Result<Review, HbnbError> {
        records::fetch(self.storage.as_ref(), id).await
    }

    /// Create a review of a place.
    ///
    /// Checks run in order: place exists, `user_id` present, user exists,
    /// `text` present.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] or [`HbnbError::Validation`] for the
    /// first failing check.
    pub async fn create_review(
        &self,
        place_id: &str,
        mut fields: Fields,
    ) -> Result<Review, HbnbError> {
        let place: Place = records::fetch(self.storage.as_ref(), place_id).await?;
        let user_id: UserId = records::reference(&fields, "user_id")?;
        let _: User = records::fetch(self.storage.as_ref(), user_id.as_str()).await?;

        fields.insert("place_id".to_string(), Value::String(place.id.to_string()));
        let review: Review = from_fields(fields)?;
        records::persist(self.storage.as_ref(), review).await
    }

    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the review is missing.
    pub async fn update_review(&self, id: &str, changes: &Fields) -> Result<Review, HbnbError> {
        let current: Review = records::fetch(self.storage.as_ref(), id).await?;
        let updated = apply_changes(&current, changes)?;
        records::persist(self.storage.as_ref(), updated).await
    }

    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the review is missing.
    pub async fn delete_review(&self, id: &str) -> Result<(), HbnbError> {
        records::remove::<_, Review>(self.storage.as_ref(), id).await
    }
}
