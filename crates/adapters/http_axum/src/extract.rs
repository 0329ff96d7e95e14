//! Request body extraction.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde_json::Value;

use hbnb_domain::error::ValidationError;
use hbnb_domain::object::Fields;

use crate::error::ApiError;

/// A request body that must be a JSON object.
///
/// The `Content-Type` header is not checked. Any body that does not parse to
/// a JSON object is rejected with `400 {"error": "Not a JSON"}`.
#[derive(Debug)]
pub struct JsonObject(pub Fields);

impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| ValidationError::NotAJson)?;
        match serde_json::from_slice(&bytes) {
            Ok(Value::Object(fields)) => Ok(Self(fields)),
            _ => Err(ValidationError::NotAJson.into()),
        }
    }
}
