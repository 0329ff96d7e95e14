//! # hbnb-adapter-storage-file
//!
//! Flat-file persistence adapter.
//!
//! ## Responsibilities
//! - Implement the `Storage` and `PlaceAmenities` ports from `hbnb-app`
//! - Hold every object in one in-memory registry keyed by `<Type>.<id>`
//! - Serialize the whole registry to a single JSON document on `save`, and
//!   merge that document back into memory on `reload`
//!
//! The backing file is a JSON object mapping each key to the object's
//! fields plus a `__class__` discriminator. It is rewritten in full on every
//! save; there is no journal and no locking between processes.
//!
//! ## Dependency rule
//! Depends on `hbnb-app` (for port traits) and `hbnb-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod error;
mod storage;

pub use error::StorageError;
pub use storage::{Config, FileStorage};
