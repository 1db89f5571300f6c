//! Handler for health check endpoint.

use axum::extract::State;
use serde_json::json;
use std::time::Duration;
use tokio::time::Instant;

use crate::api::dto::ApiResponse;
use crate::api::dto::health::{DatabaseHealth, HealthResponse};
use crate::error::AppError;
use crate::state::AppState;

const PING_TIMEOUT: Duration = Duration::from_secs(2);

/// Returns service health with a database round-trip check.
///
/// # Endpoint
///
/// `GET /api/v1/health`
///
/// # Response Codes
///
/// - **200 OK**: database answered within two seconds
/// - **503 Service Unavailable**: database ping failed or timed out
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "message": "Service is healthy",
///   "data": {
///     "status": "ok",
///     "service": "storefront-api",
///     "version": "0.1.0",
///     "database": { "status": "ok", "response_time_ms": 3 }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<ApiResponse<HealthResponse>, AppError> {
    let start = Instant::now();

    match tokio::time::timeout(PING_TIMEOUT, state.health.ping()).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Health check database ping failed");
            return Err(AppError::service_unavailable("Service unhealthy", json!({})));
        }
        Err(_) => {
            tracing::error!("Health check database ping timed out");
            return Err(AppError::service_unavailable("Service unhealthy", json!({})));
        }
    }

    let response_time_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

    Ok(ApiResponse::ok(
        "Service is healthy",
        HealthResponse {
            status: "ok".to_string(),
            service: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database: DatabaseHealth {
                status: "ok".to_string(),
                response_time_ms,
            },
        },
    ))
}
