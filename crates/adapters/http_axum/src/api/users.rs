//! JSON REST handlers for users.

use axum::extract::{Path, State};

use crate::api::{CreateResponse, DeleteResponse, GetResponse, ListResponse};
use crate::error::ApiError;
use crate::extract::JsonObject;
use crate::state::{AppState, Backend};

/// `GET /api/v1/users`
pub async fn list<S: Backend>(State(state): State<AppState<S>>) -> Result<ListResponse, ApiError> {
    let users = state.user_service.list_users().await?;
    Ok(ListResponse::of(users))
}

/// `GET /api/v1/users/{id}`
pub async fn get<S: Backend>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError> {
    let user = state.user_service.get_user(&id).await?;
    Ok(GetResponse::of(user))
}

/// `POST /api/v1/users`
pub async fn create<S: Backend>(
    State(state): State<AppState<S>>,
    JsonObject(fields): JsonObject,
) -> Result<CreateResponse, ApiError> {
    let user = state.user_service.create_user(fields).await?;
    Ok(CreateResponse::created(user))
}

/// `PUT /api/v1/users/{id}`
pub async fn update<S: Backend>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    JsonObject(changes): JsonObject,
) -> Result<GetResponse, ApiError> {
    let user = state.user_service.update_user(&id, &changes).await?;
    Ok(GetResponse::of(user))
}

/// `DELETE /api/v1/users/{id}`
pub async fn delete<S: Backend>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError> {
    state.user_service.delete_user(&id).await?;
    Ok(DeleteResponse::Deleted)
}
