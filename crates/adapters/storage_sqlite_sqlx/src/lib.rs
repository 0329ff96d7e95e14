//! # hbnb-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the [`Storage`](hbnb_app::ports::Storage) and
//!   [`PlaceAmenities`](hbnb_app::ports::PlaceAmenities) ports
//! - Manage the `SQLite` connection pool lifecycle
//! - Run the embedded migrations
//! - Map between domain objects and table rows
//!
//! ## Dependency rule
//! Depends on `hbnb-app` (for port traits) and `hbnb-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod error;
mod pool;
mod rows;
mod storage;

pub use error::StorageError;
pub use pool::{Config, Database};
pub use storage::SqliteStorage;
