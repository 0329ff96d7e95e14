//! JSON REST handlers for reviews.

use axum::extract::{Path, State};

use crate::api::{CreateResponse, DeleteResponse, GetResponse, ListResponse};
use crate::error::ApiError;
use crate::extract::JsonObject;
use crate::state::{AppState, Backend};

/// `GET /api/v1/places/{id}/reviews`
pub async fn list<S: Backend>(
    State(state): State<AppState<S>>,
    Path(place_id): Path<String>,
) -> Result<ListResponse, ApiError> {
    let reviews = state.review_service.list_reviews(&place_id).await?;
    Ok(ListResponse::of(reviews))
}

/// `POST /api/v1/places/{id}/reviews`
pub async fn create<S: Backend>(
    State(state): State<AppState<S>>,
    Path(place_id): Path<String>,
    JsonObject(fields): JsonObject,
) -> Result<CreateResponse, ApiError> {
    let review = state
        .review_service
        .create_review(&place_id, fields)
        .await?;
    Ok(CreateResponse::created(review))
}

/// `GET /api/v1/reviews/{id}`
pub async fn get<S: Backend>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError> {
    let review = state.review_service.get_review(&id).await?;
    Ok(GetResponse::of(review))
}

/// `PUT /api/v1/reviews/{id}`
pub async fn update<S: Backend>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    JsonObject(changes): JsonObject,
) -> Result<GetResponse, ApiError> {
    let review = state.review_service.update_review(&id, &changes).await?;
    Ok(GetResponse::of(review))
}

/// `DELETE /api/v1/reviews/{id}`
pub async fn delete<S: Backend>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError> {
    state.review_service.delete_review(&id).await?;
    Ok(DeleteResponse::Deleted)
}
