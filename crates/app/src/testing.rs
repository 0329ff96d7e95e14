//! In-memory port implementations shared by service tests.

use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use hbnb_domain::error::HbnbError;
use hbnb_domain::id::{AmenityId, PlaceId};
use hbnb_domain::kind::{ObjectKey, ObjectKind};
use hbnb_domain::object::{Object, Registry};

use crate::ports::{PlaceAmenities, Storage};

#[derive(Default)]
pub struct InMemoryStorage {
    objects: Mutex<Registry>,
    saves: AtomicUsize,
}

impl InMemoryStorage {
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    fn place_key(place: &PlaceId) -> ObjectKey {
        ObjectKey::new(ObjectKind::Place, place.as_str())
    }
}

impl Storage for InMemoryStorage {
    fn all(
        &self,
        kind: Option<ObjectKind>,
    ) -> impl Future<Output = Result<Registry, HbnbError>> + Send {
        let objects = self.objects.lock().unwrap();
        let result: Registry = objects
            .iter()
            .filter(|(key, _)| kind.is_none_or(|kind| key.kind() == kind))
            .map(|(key, object)| (key.clone(), object.clone()))
            .collect();
        async { Ok(result) }
    }

    fn get(
        &self,
        kind: ObjectKind,
        id: &str,
    ) -> impl Future<Output = Result<Option<Object>, HbnbError>> + Send {
        let objects = self.objects.lock().unwrap();
        let result = objects.get(&ObjectKey::new(kind, id)).cloned();
        async { Ok(result) }
    }

    fn insert(&self, object: Object) -> impl Future<Output = Result<(), HbnbError>> + Send {
        let mut objects = self.objects.lock().unwrap();
        objects.insert(object.key(), object);
        async { Ok(()) }
    }

    fn count(
        &self,
        kind: Option<ObjectKind>,
    ) -> impl Future<Output = Result<usize, HbnbError>> + Send {
        let objects = self.objects.lock().unwrap();
        let result = objects
            .keys()
            .filter(|key| kind.is_none_or(|kind| key.kind() == kind))
            .count();
        async move { Ok(result) }
    }

    fn delete(&self, key: &ObjectKey) -> impl Future<Output = Result<(), HbnbError>> + Send {
        let mut objects = self.objects.lock().unwrap();
        objects.remove(key);
        async { Ok(()) }
    }

    fn save(&self) -> impl Future<Output = Result<(), HbnbError>> + Send {
        self.saves.fetch_add(1, Ordering::SeqCst);
        async { Ok(()) }
    }

    fn reload(&self) -> impl Future<Output = Result<(), HbnbError>> + Send {
        async { Ok(()) }
    }

    fn close(&self) -> impl Future<Output = Result<(), HbnbError>> + Send {
        async { Ok(()) }
    }
}

impl PlaceAmenities for InMemoryStorage {
    fn linked_amenities(
        &self,
        place: &PlaceId,
    ) -> impl Future<Output = Result<Vec<AmenityId>, HbnbError>> + Send {
        let objects = self.objects.lock().unwrap();
        let result = match objects.get(&Self::place_key(place)) {
            Some(Object::Place(place)) => place.amenity_ids.clone(),
            _ => Vec::new(),
        };
        async { Ok(result) }
    }

    fn link(
        &self,
        place: &PlaceId,
        amenity: &AmenityId,
    ) -> impl Future<Output = Result<bool, HbnbError>> + Send {
        let mut objects = self.objects.lock().unwrap();
        let linked = match objects.get_mut(&Self::place_key(place)) {
            Some(Object::Place(place)) if !place.amenity_ids.contains(amenity) => {
                place.amenity_ids.push(amenity.clone());
                true
            }
            _ => false,
        };
        async move { Ok(linked) }
    }

    fn unlink(
        &self,
        place: &PlaceId,
        amenity: &AmenityId,
    ) -> impl Future<Output = Result<bool, HbnbError>> + Send {
        let mut objects = self.objects.lock().unwrap();
        let removed = match objects.get_mut(&Self::place_key(place)) {
            Some(Object::Place(place)) => {
                let before = place.amenity_ids.len();
                place.amenity_ids.retain(|id| id != amenity);
                place.amenity_ids.len() != before
            }
            _ => false,
        };
        async move { Ok(removed) }
    }
}
