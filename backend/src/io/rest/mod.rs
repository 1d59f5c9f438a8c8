//! # REST API Interface Layer
//!
//! HTTP endpoints for vendor availability and impact estimates. All routes
//! are nested under `/api` by [`crate::create_router`].
//!
//! ## Error Mapping
//!
//! - `AvailabilityError::VendorNotFound` becomes `404 Not Found`
//! - any other `AvailabilityError` becomes `400 Bad Request`
//! - everything else becomes `500 Internal Server Error` with a generic
//!   message; the full error chain is logged

pub mod availability_apis;
pub mod impact_apis;
pub mod mappers;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use shared::{ErrorResponse, HealthResponse};
use tracing::{error, warn};

use crate::domain::models::availability::AvailabilityError;
use crate::AppState;

/// All API routes, without the `/api` prefix
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .merge(availability_apis::router())
        .merge(impact_apis::router())
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Turn a service error into a JSON error response
pub fn error_response(err: anyhow::Error, context: &str) -> Response {
    match err.downcast_ref::<AvailabilityError>() {
        Some(domain_error) => {
            let status = if domain_error.is_not_found() {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::BAD_REQUEST
            };
            warn!("{}: {}", context, domain_error);
            let body = ErrorResponse {
                error: domain_error.to_string(),
            };
            (status, Json(body)).into_response()
        }
        None => {
            error!("{}: {:#}", context, err);
            let body = ErrorResponse {
                error: context.to_string(),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        Router,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::config::{AppConfig, StorageBackend};
    use crate::{create_router, initialize_backend};

    /// Router backed by an empty in-memory store
    pub fn test_router() -> Router {
        let config = AppConfig {
            storage: StorageBackend::Memory,
            ..AppConfig::default()
        };
        let state = initialize_backend(&config).expect("Failed to initialize backend");
        create_router(state, &config.cors_origin).expect("Failed to create router")
    }

    pub async fn send(
        router: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }
}
