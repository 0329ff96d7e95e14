//! JSON REST handlers for the amenities linked to a place.

use axum::Json;
use axum::extract::{Path, State};

use hbnb_app::services::place_amenity_service::LinkOutcome;

use crate::api::{CreateResponse, DeleteResponse, ListResponse};
use crate::error::ApiError;
use crate::state::{AppState, Backend};
use crate::view::View;

/// `GET /api/v1/places/{id}/amenities`
pub async fn list<S: Backend>(
    State(state): State<AppState<S>>,
    Path(place_id): Path<String>,
) -> Result<ListResponse, ApiError> {
    let amenities = state
        .place_amenity_service
        .list_amenities(&place_id)
        .await?;
    Ok(ListResponse::of(amenities))
}

/// `POST /api/v1/places/{id}/amenities/{amenity_id}`
///
/// Answers `201` when the link is new and `200` when it already existed.
pub async fn link<S: Backend>(
    State(state): State<AppState<S>>,
    Path((place_id, amenity_id)): Path<(String, String)>,
) -> Result<CreateResponse, ApiError> {
    let outcome = state
        .place_amenity_service
        .link_amenity(&place_id, &amenity_id)
        .await?;
    Ok(match outcome {
        LinkOutcome::Linked(amenity) => CreateResponse::created(amenity),
        LinkOutcome::AlreadyLinked(amenity) => CreateResponse::Existing(Json(View::of(amenity))),
    })
}

/// `DELETE /api/v1/places/{id}/amenities/{amenity_id}`
pub async fn unlink<S: Backend>(
    State(state): State<AppState<S>>,
    Path((place_id, amenity_id)): Path<(String, String)>,
) -> Result<DeleteResponse, ApiError> {
    state
        .place_amenity_service
        .unlink_amenity(&place_id, &amenity_id)
        .await?;
    Ok(DeleteResponse::Deleted)
}
