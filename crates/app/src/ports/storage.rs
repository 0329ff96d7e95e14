//! Storage port — the object registry every backend exposes.

use std::future::Future;

use hbnb_domain::error::HbnbError;
use hbnb_domain::kind::{ObjectKey, ObjectKind};
use hbnb_domain::object::{Object, Registry};

/// Registry of every domain object, keyed by `<Type>.<id>`.
///
/// Reads never fail on missing objects: they return an empty collection or
/// `None`. Mutations become durable only after [`save`](Storage::save).
pub trait Storage {
    /// Every object, or only those of `kind`, ordered by key.
    fn all(
        &self,
        kind: Option<ObjectKind>,
    ) -> impl Future<Output = Result<Registry, HbnbError>> + Send;

    /// Look up one object by kind and id.
    fn get(
        &self,
        kind: ObjectKind,
        id: &str,
    ) -> impl Future<Output = Result<Option<Object>, HbnbError>> + Send;

    /// Insert the object under its key, replacing any previous value.
    fn insert(&self, object: Object) -> impl Future<Output = Result<(), HbnbError>> + Send;

    /// Number of objects, or of objects of `kind`.
    fn count(
        &self,
        kind: Option<ObjectKind>,
    ) -> impl Future<Output = Result<usize, HbnbError>> + Send;

    /// Remove the entry for `key`. Missing keys are ignored.
    fn delete(&self, key: &ObjectKey) -> impl Future<Output = Result<(), HbnbError>> + Send;

    /// Persist the whole registry.
    fn save(&self) -> impl Future<Output = Result<(), HbnbError>> + Send;

    /// Repopulate the registry from the backing store.
    fn reload(&self) -> impl Future<Output = Result<(), HbnbError>> + Send;

    /// End-of-request hook. Backends decide what releasing means; the file
    /// backend reloads from disk.
    fn close(&self) -> impl Future<Output = Result<(), HbnbError>> + Send;
}
