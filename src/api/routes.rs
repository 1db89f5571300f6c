//! API route tables.
//!
//! Session-protected routes get their auth middleware as a `route_layer`, so
//! unmatched paths still 404 instead of 401.

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::api::handlers::{
    admin_login_handler, admin_logout_handler, admin_me_handler, admin_refresh_handler,
    customer_login_handler, customer_logout_handler, customer_register_handler, health_handler,
    profile_handler,
};
use crate::api::middleware::auth;
use crate::state::AppState;

/// Routes under `/api/v1`.
///
/// # Endpoints
///
/// - `GET  /health`              - Database health check (public)
/// - `POST /admin/auth/login`    - Admin login (public)
/// - `POST /admin/auth/logout`   - Admin logout (admin session)
/// - `GET  /admin/auth/me`       - Current admin (admin session)
/// - `POST /admin/auth/refresh`  - Refresh admin session (admin session)
/// - `POST /store/auth/login`    - Customer login (public)
/// - `POST /store/auth/register` - Customer registration (public)
/// - `POST /store/auth/logout`   - Customer logout (customer session)
/// - `GET  /store/profile`       - Current customer (customer session)
pub fn v1_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .nest("/admin", admin_routes(state.clone()))
        .nest("/store", store_routes(state))
}

fn admin_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/auth/logout", post(admin_logout_handler))
        .route("/auth/me", get(admin_me_handler))
        .route("/auth/refresh", post(admin_refresh_handler))
        .route_layer(middleware::from_fn_with_state(state, auth::admin_layer));

    Router::new()
        .route("/auth/login", post(admin_login_handler))
        .merge(protected)
}

fn store_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/auth/logout", post(customer_logout_handler))
        .route("/profile", get(profile_handler))
        .route_layer(middleware::from_fn_with_state(state, auth::customer_layer));

    Router::new()
        .route("/auth/login", post(customer_login_handler))
        .route("/auth/register", post(customer_register_handler))
        .merge(protected)
}
