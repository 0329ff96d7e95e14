//! In-memory registry persisted to a single JSON file.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::sync::RwLock;

use hbnb_app::ports::{PlaceAmenities, Storage};
use hbnb_domain::error::HbnbError;
use hbnb_domain::id::{AmenityId, PlaceId};
use hbnb_domain::kind::{ObjectKey, ObjectKind};
use hbnb_domain::object::{Object, Registry};

use crate::error::StorageError;

/// Configuration for the file storage adapter.
pub struct Config {
    /// Path of the JSON document (e.g. `file.json`).
    pub file_path: PathBuf,
}

impl Config {
    /// Build a [`FileStorage`] and load whatever the file already holds.
    ///
    /// A missing or unreadable file yields an empty registry.
    pub async fn build(self) -> FileStorage {
        let storage = FileStorage::new(self.file_path);
        storage.load().await;
        storage
    }
}

/// Registry of every object, saved as one JSON document.
pub struct FileStorage {
    path: PathBuf,
    objects: RwLock<Registry>,
}

impl FileStorage {
    /// Create an empty registry backed by `path`. Nothing is read yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            objects: RwLock::new(Registry::new()),
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every document key must be the `<Type>.<id>` of the object it holds.
    async fn read_file(&self) -> Result<Registry, StorageError> {
        let bytes = tokio::fs::read(&self.path).await?;
        let document: BTreeMap<String, Object> = serde_json::from_slice(&bytes)?;
        document
            .into_iter()
            .map(|(key, object)| {
                let expected = object.key();
                match key.parse::<ObjectKey>() {
                    Ok(parsed) if parsed == expected => Ok((expected, object)),
                    _ => Err(StorageError::KeyMismatch { key }),
                }
            })
            .collect()
    }

    /// Merge the file into the registry, swallowing every failure.
    async fn load(&self) {
        match self.read_file().await {
            Ok(loaded) => {
                let count = loaded.len();
                self.objects.write().await.extend(loaded);
                tracing::debug!(path = %self.path.display(), count, "registry reloaded");
            }
            Err(StorageError::Io(err)) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no storage file yet");
            }
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "ignoring unreadable storage file"
                );
            }
        }
    }

    fn place_key(place: &PlaceId) -> ObjectKey {
        ObjectKey::new(ObjectKind::Place, place.as_str())
    }
}

impl Storage for FileStorage {
    async fn all(&self, kind: Option<ObjectKind>) -> Result<Registry, HbnbError> {
        let objects = self.objects.read().await;
        Ok(objects
            .iter()
            .filter(|(key, _)| kind.is_none_or(|kind| key.kind() == kind))
            .map(|(key, object)| (key.clone(), object.clone()))
            .collect())
    }

    async fn get(&self, kind: ObjectKind, id: &str) -> Result<Option<Object>, HbnbError> {
        let objects = self.objects.read().await;
        Ok(objects.get(&ObjectKey::new(kind, id)).cloned())
    }

    async fn insert(&self, object: Object) -> Result<(), HbnbError> {
        self.objects.write().await.insert(object.key(), object);
        Ok(())
    }

    async fn count(&self, kind: Option<ObjectKind>) -> Result<usize, HbnbError> {
        let objects = self.objects.read().await;
        Ok(match kind {
            Some(kind) => objects.keys().filter(|key| key.kind() == kind).count(),
            None => objects.len(),
        })
    }

    async fn delete(&self, key: &ObjectKey) -> Result<(), HbnbError> {
        self.objects.write().await.remove(key);
        Ok(())
    }

    async fn save(&self) -> Result<(), HbnbError> {
        let document = {
            let objects = self.objects.read().await;
            let by_key: BTreeMap<String, &Object> = objects
                .iter()
                .map(|(key, object)| (key.to_string(), object))
                .collect();
            serde_json::to_vec(&by_key).map_err(StorageError::from)?
        };
        tokio::fs::write(&self.path, document)
            .await
            .map_err(StorageError::from)?;
        tracing::debug!(path = %self.path.display(), "registry saved");
        Ok(())
    }

    async fn reload(&self) -> Result<(), HbnbError> {
        self.load().await;
        Ok(())
    }

    async fn close(&self) -> Result<(), HbnbError> {
        self.reload().await
    }
}

impl PlaceAmenities for FileStorage {
    async fn linked_amenities(&self, place: &PlaceId) -> Result<Vec<AmenityId>, HbnbError> {
        let objects = self.objects.read().await;
        Ok(match objects.get(&Self::place_key(place)) {
            Some(Object::Place(place)) => place.amenity_ids.clone(),
            _ => Vec::new(),
        })
    }

    async fn link(&self, place: &PlaceId, amenity: &AmenityId) -> Result<bool, HbnbError> {
        let mut objects = self.objects.write().await;
        Ok(match objects.get_mut(&Self::place_key(place)) {
            Some(Object::Place(place)) if !place.amenity_ids.contains(amenity) => {
                place.amenity_ids.push(amenity.clone());
                true
            }
            _ => false,
        })
    }

    async fn unlink(&self, place: &PlaceId, amenity: &AmenityId) -> Result<bool, HbnbError> {
        let mut objects = self.objects.write().await;
        Ok(match objects.get_mut(&Self::place_key(place)) {
            Some(Object::Place(place)) => {
                let before = place.amenity_ids.len();
                place.amenity_ids.retain(|linked| linked != amenity);
                place.amenity_ids.len() != before
            }
            _ => false,
        })
    }
}
