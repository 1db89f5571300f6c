//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `/api/v1/health`         - Health check (public)
//! - `/api/v1/admin/auth/*`   - Admin session endpoints
//! - `/api/v1/store/auth/*`   - Customer login, registration and logout
//! - `/api/v1/store/profile`  - Current customer
//!
//! # Middleware
//!
//! Every request passes, outermost first:
//!
//! 1. **Recovery** - panics become `500 Internal server error`
//! 2. **Request logging** - one structured event per request
//! 3. **CORS** - explicit origin allow-list with credentials
//! 4. **Rate limiting** - per-client token bucket, `429` on rejection
//! 5. **Session authentication** - route-scoped, admin or customer cookie

use axum::{Router, middleware};

use crate::api;
use crate::api::middleware::{cors, rate_limit, recovery, request_log};
use crate::state::AppState;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `cors_origins` - origins allowed to make credentialed cross-origin requests
///
/// Trailing-slash normalisation is applied by the server around this router.
pub fn app_router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .nest("/api/v1", api::routes::v1_routes(state.clone()))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::layer,
        ))
        .layer(cors::layer(cors_origins))
        .layer(middleware::from_fn(request_log::layer))
        .layer(middleware::from_fn(recovery::layer))
        .with_state(state)
}
