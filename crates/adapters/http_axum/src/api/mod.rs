//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod amenities;
#[allow(clippy::missing_errors_doc)]
pub mod cities;
#[allow(clippy::missing_errors_doc)]
pub mod index;
#[allow(clippy::missing_errors_doc)]
pub mod place_amenities;
#[allow(clippy::missing_errors_doc)]
pub mod places;
#[allow(clippy::missing_errors_doc)]
pub mod reviews;
#[allow(clippy::missing_errors_doc)]
pub mod states;
#[allow(clippy::missing_errors_doc)]
pub mod users;

mod response;

pub use response::{CreateResponse, DeleteResponse, GetResponse, ListResponse};

use axum::Router;
use axum::routing::{get, post};

use crate::state::{AppState, Backend};

/// Build the `/api/v1` sub-router.
pub fn routes<S: Backend>() -> Router<AppState<S>> {
    Router::new()
        // Index
        .route("/status", get(index::status))
        .route("/stats", get(index::stats::<S>))
        // States
        .route("/states", get(states::list::<S>).post(states::create::<S>))
        .route(
            "/states/{id}",
            get(states::get::<S>)
                .put(states::update::<S>)
                .delete(states::delete::<S>),
        )
        // Cities
        .route(
            "/states/{id}/cities",
            get(cities::list::<S>).post(cities::create::<S>),
        )
        .route(
            "/cities/{id}",
            get(cities::get::<S>)
                .put(cities::update::<S>)
                .delete(cities::delete::<S>),
        )
        // Amenities
        .route(
            "/amenities",
            get(amenities::list::<S>).post(amenities::create::<S>),
        )
        .route(
            "/amenities/{id}",
            get(amenities::get::<S>)
                .put(amenities::update::<S>)
                .delete(amenities::delete::<S>),
        )
        // Users
        .route("/users", get(users::list::<S>).post(users::create::<S>))
        .route(
            "/users/{id}",
            get(users::get::<S>)
                .put(users::update::<S>)
                .delete(users::delete::<S>),
        )
        // Places
        .route(
            "/cities/{id}/places",
            get(places::list::<S>).post(places::create::<S>),
        )
        .route(
            "/places/{id}",
            get(places::get::<S>)
                .put(places::update::<S>)
                .delete(places::delete::<S>),
        )
        .route("/places_search", post(places::search::<S>))
        // Reviews
        .route(
            "/places/{id}/reviews",
            get(reviews::list::<S>).post(reviews::create::<S>),
        )
        .route(
            "/reviews/{id}",
            get(reviews::get::<S>)
                .put(reviews::update::<S>)
                .delete(reviews::delete::<S>),
        )
        // Place amenities
        .route("/places/{id}/amenities", get(place_amenities::list::<S>))
        .route(
            "/places/{id}/amenities/{amenity_id}",
            post(place_amenities::link::<S>).delete(place_amenities::unlink::<S>),
        )
}
