//! JSON REST handlers for cities, nested under their state for listing and
//! creation.

use axum::extract::{Path, State};

use crate::api::{CreateResponse, DeleteResponse, GetResponse, ListResponse};
use crate::error::ApiError;
use crate::extract::JsonObject;
use crate::state::{AppState, Backend};

/// `GET /api/v1/states/{id}/cities`
pub async fn list<S: Backend>(
    State(state): State<AppState<S>>,
    Path(state_id): Path<String>,
) -> Result<ListResponse, ApiError> {
    let cities = state.city_service.list_cities(&state_id).await?;
    Ok(ListResponse::of(cities))
}

/// `POST /api/v1/states/{id}/cities`
pub async fn create<S: Backend>(
    State(state): State<AppState<S>>,
    Path(state_id): Path<String>,
    JsonObject(fields): JsonObject,
) -> Result<CreateResponse, ApiError> {
    let city = state.city_service.create_city(&state_id, fields).await?;
    Ok(CreateResponse::created(city))
}

/// `GET /api/v1/cities/{id}`
pub async fn get<S: Backend>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError> {
    let city = state.city_service.get_city(&id).await?;
    Ok(GetResponse::of(city))
}

/// `PUT /api/v1/cities/{id}`
pub async fn update<S: Backend>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    JsonObject(changes): JsonObject,
) -> Result<GetResponse, ApiError> {
    let city = state.city_service.update_city(&id, &changes).await?;
    Ok(GetResponse::of(city))
}

/// `DELETE /api/v1/cities/{id}`
pub async fn delete<S: Backend>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError> {
    state.city_service.delete_city(&id).await?;
    Ok(DeleteResponse::Deleted)
}
