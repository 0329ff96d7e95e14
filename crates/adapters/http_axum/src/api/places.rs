//! JSON REST handlers for places and the place search.

use axum::extract::{Path, State};
use serde_json::Value;

use hbnb_app::services::place_service::SearchFilters;
use hbnb_domain::error::ValidationError;

use crate::api::{CreateResponse, DeleteResponse, GetResponse, ListResponse};
use crate::error::ApiError;
use crate::extract::JsonObject;
use crate::state::{AppState, Backend};

/// `GET /api/v1/cities/{id}/places`
pub async fn list<S: Backend>(
    State(state): State<AppState<S>>,
    Path(city_id): Path<String>,
) -> Result<ListResponse, ApiError> {
    let places = state.place_service.list_places(&city_id).await?;
    Ok(ListResponse::of(places))
}

/// `POST /api/v1/cities/{id}/places`
pub async fn create<S: Backend>(
    State(state): State<AppState<S>>,
    Path(city_id): Path<String>,
    JsonObject(fields): JsonObject,
) -> Result<CreateResponse, ApiError> {
    let place = state.place_service.create_place(&city_id, fields).await?;
    Ok(CreateResponse::created(place))
}

/// `GET /api/v1/places/{id}`
pub async fn get<S: Backend>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError> {
    let place = state.place_service.get_place(&id).await?;
    Ok(GetResponse::of(place))
}

/// `PUT /api/v1/places/{id}`
pub async fn update<S: Backend>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    JsonObject(changes): JsonObject,
) -> Result<GetResponse, ApiError> {
    let place = state.place_service.update_place(&id, &changes).await?;
    Ok(GetResponse::of(place))
}

/// `DELETE /api/v1/places/{id}`
pub async fn delete<S: Backend>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError> {
    state.place_service.delete_place(&id).await?;
    Ok(DeleteResponse::Deleted)
}

/// `POST /api/v1/places_search`
///
/// The body must be a JSON object; `{}` returns every place.
pub async fn search<S: Backend>(
    State(state): State<AppState<S>>,
    JsonObject(body): JsonObject,
) -> Result<ListResponse, ApiError> {
    let filters: SearchFilters =
        serde_json::from_value(Value::Object(body)).map_err(ValidationError::InvalidField)?;
    let places = state.place_service.search_places(filters).await?;
    Ok(ListResponse::of(places))
}
