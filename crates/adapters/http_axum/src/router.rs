//! Axum router assembly.

use axum::Router;
use axum::extract::{Request, State};
use axum::http::{HeaderValue, StatusCode};
use axum::middleware::{self, Next};
use axum::response::Response;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::error_response;
use crate::state::{AppState, Backend};

/// Build the top-level axum [`Router`].
///
/// Nests the API under `/api/v1`, answers unknown routes with
/// `404 {"error": "Not found"}`, releases the storage after every request and
/// applies CORS for `allowed_origins`. Includes a [`TraceLayer`] that logs each
/// HTTP request/response at the `DEBUG` level using the `tracing` ecosystem.
pub fn build<S: Backend>(state: AppState<S>, allowed_origins: &[String]) -> Router {
    Router::new()
        .nest("/api/v1", crate::api::routes())
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            close_storage::<S>,
        ))
        .layer(cors(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

/// Run the request, then release the storage whatever the outcome.
async fn close_storage<S: Backend>(
    State(state): State<AppState<S>>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    if let Err(err) = state.storage.close().await {
        tracing::warn!(error = %err, "failed to release storage");
    }
    response
}

/// `*` allows any origin; other entries are matched exactly.
fn cors(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if allowed_origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(origin = %origin, error = %err, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}
