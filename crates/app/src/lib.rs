//! # hbnb-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that storage backends must implement:
//!   - `Storage` — the composite-key object registry with bulk persistence
//!   - `PlaceAmenities` — the place ↔ amenity relation
//! - Define one **service** per entity that orders validation, checks that
//!   referenced objects exist, and persists every mutation
//! - Orchestrate domain objects without knowing *how* persistence works
//!
//! ## Dependency rule
//! Depends on `hbnb-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;
