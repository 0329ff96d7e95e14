//! Place amenity service — linking amenities to places.

use std::sync::Arc;

use hbnb_domain::amenity::Amenity;
use hbnb_domain::error::{HbnbError, NotFoundError};
use hbnb_domain::kind::ObjectKind;
use hbnb_domain::place::Place;

use super::records;
use crate::ports::{PlaceAmenities, Storage};

/// Result of linking an amenity to a place.
#[derive(Debug)]
pub enum LinkOutcome {
    /// The amenity was already linked; nothing changed.
    AlreadyLinked(Amenity),
    /// A new link was created and saved.
    Linked(Amenity),
}

/// Application service for the place ↔ amenity relation.
pub struct PlaceAmenityService<S> {
    storage: Arc<S>,
}

impl<S> PlaceAmenityService<S>
where
    S: Storage + PlaceAmenities + Send + Sync,
{
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// Amenities linked to a place. Links to deleted amenities are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the place is missing.
    pub async fn list_amenities(&self, place_id: &str) -> Result<Vec<Amenity>, HbnbError> {
        let storage = self.storage.as_ref();
        let place: Place = records::fetch(storage, place_id).await?;

        let mut amenities = Vec::new();
        for amenity_id in storage.linked_amenities(&place.id).await? {
            if let Some(amenity) = records::find::<_, Amenity>(storage, amenity_id.as_str()).await? {
                amenities.push(amenity);
            }
        }
        Ok(amenities)
    }

    /// Link an amenity to a place, saving only when a new link is made.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the place or the amenity is missing.
    pub async fn link_amenity(
        &self,
        place_id: &str,
        amenity_id: &str,
    ) -> Result<LinkOutcome, HbnbError> {
        let storage = self.storage.as_ref();
        let place: Place = records::fetch(storage, place_id).await?;
        let amenity: Amenity = records::fetch(storage, amenity_id).await?;

        if !storage.link(&place.id, &amenity.id).await? {
            return Ok(LinkOutcome::AlreadyLinked(amenity));
        }
        storage.save().await?;
        tracing::debug!(place = %place.id, amenity = %amenity.id, "amenity linked");
        Ok(LinkOutcome::Linked(amenity))
    }

    /// Remove the link between an amenity and a place.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the place or the amenity is
    /// missing, or when they are not linked.
    pub async fn unlink_amenity(&self, place_id: &str, amenity_id: &str) -> Result<(), HbnbError> {
        let storage = self.storage.as_ref();
        let place: Place = records::fetch(storage, place_id).await?;
        let amenity: Amenity = records::fetch(storage, amenity_id).await?;

        if !storage.unlink(&place.id, &amenity.id).await? {
            return Err(NotFoundError::new(ObjectKind::Amenity, amenity_id).into());
        }
        storage.save().await?;
        tracing::debug!(place = %place.id, amenity = %amenity.id, "amenity unlinked");
        Ok(())
    }
}
