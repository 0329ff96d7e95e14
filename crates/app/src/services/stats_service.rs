//! Stats service — object counts per kind.

use std::collections::BTreeMap;
use std::sync::Arc;

use hbnb_domain::error::HbnbError;
use hbnb_domain::kind::ObjectKind;

use crate::ports::Storage;

pub struct StatsService<S> {
    storage: Arc<S>,
}

impl<S: Storage + Send + Sync> StatsService<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// Count objects of every kind, keyed by collection name.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the backend.
    pub async fn counts(&self) -> Result<BTreeMap<&'static str, usize>, HbnbError> {
        let mut counts = BTreeMap::new();
        for kind in ObjectKind::ALL {
            counts.insert(kind.collection(), self.storage.count(Some(kind)).await?);
        }
        Ok(counts)
    }
}
