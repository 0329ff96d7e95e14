//! JSON REST handlers for amenities.

use axum::extract::{Path, State};

use crate::api::{CreateResponse, DeleteResponse, GetResponse, ListResponse};
use crate::error::ApiError;
use crate::extract::JsonObject;
use crate::state::{AppState, Backend};

/// `GET /api/v1/amenities`
pub async fn list<S: Backend>(State(state): State<AppState<S>>) -> Result<ListResponse, ApiError> {
    let amenities = state.amenity_service.list_amenities().await?;
    Ok(ListResponse::of(amenities))
}

/// `GET /api/v1/amenities/{id}`
pub async fn get<S: Backend>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError> {
    let amenity = state.amenity_service.get_amenity(&id).await?;
    Ok(GetResponse::of(amenity))
}

/// `POST /api/v1/amenities`
pub async fn create<S: Backend>(
    State(state): State<AppState<S>>,
    JsonObject(fields): JsonObject,
) -> Result<CreateResponse, ApiError> {
    let amenity = state.amenity_service.create_amenity(fields).await?;
    Ok(CreateResponse::created(amenity))
}

/// `PUT /api/v1/amenities/{id}`
pub async fn update<S: Backend>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    JsonObject(changes): JsonObject,
) -> Result<GetResponse, ApiError> {
    let amenity = state.amenity_service.update_amenity(&id, &changes).await?;
    Ok(GetResponse::of(amenity))
}

/// `DELETE /api/v1/amenities/{id}`
pub async fn delete<S: Backend>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError> {
    state.amenity_service.delete_amenity(&id).await?;
    Ok(DeleteResponse::Deleted)
}
