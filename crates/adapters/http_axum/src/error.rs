//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use hbnb_domain::error::{HbnbError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Build an `{"error": message}` response.
pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Maps [`HbnbError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(HbnbError);

impl From<HbnbError> for ApiError {
    fn from(err: HbnbError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self.0 {
            HbnbError::Validation(err) => error_response(StatusCode::BAD_REQUEST, err.to_string()),
            HbnbError::NotFound(err) => {
                tracing::debug!(error = %err, "object not found");
                error_response(StatusCode::NOT_FOUND, "Not found")
            }
            HbnbError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hbnb_domain::error::NotFoundError;
    use hbnb_domain::kind::ObjectKind;
    use http_body_util::BodyExt;

    async fn body_of(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn should_map_missing_field_to_bad_request() {
        let response = ApiError::from(ValidationError::MissingField("name")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_of(response).await,
            serde_json::json!({"error": "Missing name"})
        );
    }

    #[tokio::test]
    async fn should_hide_not_found_details() {
        let err = HbnbError::from(NotFoundError::new(ObjectKind::State, "42"));
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_of(response).await,
            serde_json::json!({"error": "Not found"})
        );
    }

    #[tokio::test]
    async fn should_hide_storage_details() {
        let err = HbnbError::Storage(Box::new(std::io::Error::other("disk full")));
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_of(response).await,
            serde_json::json!({"error": "internal server error"})
        );
    }
}
