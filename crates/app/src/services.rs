//! Application services — use-case implementations.
//!
//! Each service holds a shared handle to a storage port implementation
//! (constructor injection), keeping this layer decoupled from concrete
//! backends. Every mutation is followed by a full `save()`.

pub mod amenity_service;
pub mod city_service;
pub mod place_amenity_service;
pub mod place_service;
pub mod review_service;
pub mod state_service;
pub mod stats_service;
pub mod user_service;

mod records;
