//! Service status and object counts.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::ApiError;
use crate::state::{AppState, Backend};

#[derive(Serialize)]
pub struct Status {
    status: &'static str,
}

/// `GET /api/v1/status`
pub async fn status() -> Json<Status> {
    Json(Status { status: "OK" })
}

/// Possible responses from the stats endpoint.
pub enum StatsResponse {
    Ok(Json<BTreeMap<&'static str, usize>>),
}

impl IntoResponse for StatsResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/v1/stats`
pub async fn stats<S: Backend>(
    State(state): State<AppState<S>>,
) -> Result<StatsResponse, ApiError> {
    let counts = state.stats_service.counts().await?;
    Ok(StatsResponse::Ok(Json(counts)))
}
