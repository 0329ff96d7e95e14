//! Place ↔ amenity relation port.
//!
//! Each storage backend models the many-to-many relation its own way; this
//! trait hides that so callers never branch on the backend.

use std::future::Future;

use hbnb_domain::error::HbnbError;
use hbnb_domain::id::{AmenityId, PlaceId};

pub trait PlaceAmenities {
    /// Amenities linked to `place`, in link order.
    fn linked_amenities(
        &self,
        place: &PlaceId,
    ) -> impl Future<Output = Result<Vec<AmenityId>, HbnbError>> + Send;

    /// Link `amenity` to `place`. Returns `false` if it was already linked.
    fn link(
        &self,
        place: &PlaceId,
        amenity: &AmenityId,
    ) -> impl Future<Output = Result<bool, HbnbError>> + Send;

    /// Remove the link. Returns `false` if there was none.
    fn unlink(
        &self,
        place: &PlaceId,
        amenity: &AmenityId,
    ) -> impl Future<Output = Result<bool, HbnbError>> + Send;
}
