//! # hbnb-domain
//!
//! Pure domain model for the hbnb rental catalogue.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define the six **entities**: [`State`](state::State), [`City`](city::City),
//!   [`User`](user::User), [`Amenity`](amenity::Amenity), [`Place`](place::Place)
//!   and [`Review`](review::Review)
//! - Define the closed [`Object`](object::Object) union and the
//!   `<Type>.<id>` [`ObjectKey`](kind::ObjectKey) used by every storage backend
//! - Build entities from client field maps and apply partial updates
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod fields;
pub mod id;
pub mod kind;
pub mod object;
pub mod time;

pub mod amenity;
pub mod city;
pub mod place;
pub mod review;
pub mod state;
pub mod user;
