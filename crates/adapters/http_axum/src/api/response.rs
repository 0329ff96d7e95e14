//! Response shapes shared by the object endpoints.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use hbnb_domain::object::Object;

use crate::view::View;

/// Possible responses from a list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<View>>),
}

impl ListResponse {
    pub fn of<M: Into<Object>>(models: impl IntoIterator<Item = M>) -> Self {
        Self::Ok(Json(View::all(models)))
    }
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from a get or update endpoint.
pub enum GetResponse {
    Ok(Json<View>),
}

impl GetResponse {
    pub fn of(model: impl Into<Object>) -> Self {
        Self::Ok(Json(View::of(model)))
    }
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from a create endpoint.
pub enum CreateResponse {
    Created(Json<View>),
    /// The object already existed; nothing was created.
    Existing(Json<View>),
}

impl CreateResponse {
    pub fn created(model: impl Into<Object>) -> Self {
        Self::Created(Json(View::of(model)))
    }
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
            Self::Existing(json) => json.into_response(),
        }
    }
}

/// Possible responses from a delete endpoint.
pub enum DeleteResponse {
    /// `200 {}`
    Deleted,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Deleted => Json(json!({})).into_response(),
        }
    }
}
