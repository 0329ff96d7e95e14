//! Typed access to the registry, shared by the entity services.

use hbnb_domain::error::{HbnbError, NotFoundError, ValidationError};
use hbnb_domain::object::{Fields, Model};
use serde::de::DeserializeOwned;

use crate::ports::Storage;

/// Look up an `M` by id, returning `None` when absent.
pub(crate) async fn find<S, M>(storage: &S, id: &str) -> Result<Option<M>, HbnbError>
where
    S: Storage + Sync,
    M: Model,
{
    let object = storage.get(M::KIND, id).await?;
    Ok(object.and_then(M::from_object))
}

/// Look up an `M` by id, failing with [`NotFoundError`] when absent.
pub(crate) async fn fetch<S, M>(storage: &S, id: &str) -> Result<M, HbnbError>
where
    S: Storage + Sync,
    M: Model,
{
    find(storage, id)
        .await?
        .ok_or_else(|| NotFoundError::new(M::KIND, id).into())
}

/// Every registered `M`, in key order.
pub(crate) async fn list<S, M>(storage: &S) -> Result<Vec<M>, HbnbError>
where
    S: Storage + Sync,
    M: Model,
{
    let objects = storage.all(Some(M::KIND)).await?;
    Ok(objects.into_values().filter_map(M::from_object).collect())
}

/// Register `model` and save the whole registry.
pub(crate) async fn persist<S, M>(storage: &S, model: M) -> Result<M, HbnbError>
where
    S: Storage + Sync,
    M: Model,
{
    storage.insert(model.clone().into()).await?;
    storage.save().await?;
    tracing::debug!(key = %model.key(), "object saved");
    Ok(model)
}

/// Remove the `M` registered under `id` and save the whole registry.
pub(crate) async fn remove<S, M>(storage: &S, id: &str) -> Result<(), HbnbError>
where
    S: Storage + Sync,
    M: Model,
{
    let model: M = fetch(storage, id).await?;
    let key = model.key();
    storage.delete(&key).await?;
    storage.save().await?;
    tracing::debug!(key = %key, "object deleted");
    Ok(())
}

/// Read a reference field out of a payload, failing if it is absent.
pub(crate) fn reference<T: DeserializeOwned>(
    fields: &Fields,
    name: &'static str,
) -> Result<T, HbnbError> {
    let value = fields
        .get(name)
        .cloned()
        .ok_or(ValidationError::MissingField(name))?;
    let id = serde_json::from_value(value).map_err(ValidationError::InvalidField)?;
    Ok(id)
}
