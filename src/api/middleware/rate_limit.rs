//! Per-client request throttling.

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use serde_json::json;
use std::net::SocketAddr;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_key::client_key;

/// Admits or rejects a request through the shared [`RateLimiterRegistry`].
///
/// The client key is derived by [`client_key`]. Rejected requests get
/// `429 Rate limit exceeded` and never reach authentication or the handler.
///
/// [`RateLimiterRegistry`]: crate::domain::rate_limit::RateLimiterRegistry
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let remote = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let key = client_key(req.headers(), remote);

    if !st.rate_limiter.admit(&key) {
        tracing::debug!(client = %key, "Rate limit exceeded");
        return Err(AppError::too_many_requests("Rate limit exceeded", json!({})));
    }

    Ok(next.run(req).await)
}
