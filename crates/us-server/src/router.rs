//! Router configuration.
//!
//! Combines the user API with health endpoints and the HTTP middleware stack.

use axum::{
    Router,
    body::Body,
    http::{HeaderValue, Request, StatusCode},
    response::Json,
    routing::get,
};
use serde::Serialize;
use tracing::Span;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use us_api::user_router;

use crate::state::AppState;

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    let health = Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness_check))
        .route("/health/ready", get(readiness_check));

    let users = user_router().with_state(state.users.clone());

    Router::new()
        .merge(health)
        .merge(users)
        .layer(TraceLayer::new_for_http().make_span_with(request_span::<Body>))
        .layer(cors_layer(&state.config.cors_origins))
}

/// Span for one request. Records the path only: the login route carries
/// credentials in its query string.
fn request_span<B>(request: &Request<B>) -> Span {
    tracing::debug_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        version = ?request.version(),
    )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
}

/// Basic health check.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    })
}

/// Kubernetes liveness check.
async fn liveness_check() -> StatusCode {
    StatusCode::OK
}

/// Kubernetes readiness check.
async fn readiness_check() -> StatusCode {
    StatusCode::OK
}
