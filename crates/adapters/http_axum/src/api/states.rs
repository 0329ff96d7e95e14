//! JSON REST handlers for states.

use axum::extract::{Path, State};

use crate::api::{CreateResponse, DeleteResponse, GetResponse, ListResponse};
use crate::error::ApiError;
use crate::extract::JsonObject;
use crate::state::{AppState, Backend};

/// `GET /api/v1/states`
pub async fn list<S: Backend>(State(state): State<AppState<S>>) -> Result<ListResponse, ApiError> {
    let states = state.state_service.list_states().await?;
    Ok(ListResponse::of(states))
}

/// `GET /api/v1/states/{id}`
pub async fn get<S: Backend>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError> {
    let found = state.state_service.get_state(&id).await?;
    Ok(GetResponse::of(found))
}

/// `POST /api/v1/states`
pub async fn create<S: Backend>(
    State(state): State<AppState<S>>,
    JsonObject(fields): JsonObject,
) -> Result<CreateResponse, ApiError> {
    let found = state.state_service.create_state(fields).await?;
    Ok(CreateResponse::created(found))
}

/// `PUT /api/v1/states/{id}`
pub async fn update<S: Backend>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    JsonObject(changes): JsonObject,
) -> Result<GetResponse, ApiError> {
    let found = state.state_service.update_state(&id, &changes).await?;
    Ok(GetResponse::of(found))
}

/// `DELETE /api/v1/states/{id}`
pub async fn delete<S: Backend>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError> {
    state.state_service.delete_state(&id).await?;
    Ok(DeleteResponse::Deleted)
}
