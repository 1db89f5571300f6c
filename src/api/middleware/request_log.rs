//! One structured log event per request.

use axum::{
    body::HttpBody,
    extract::{ConnectInfo, Request},
    http::{
        StatusCode,
        header::{CONTENT_LENGTH, USER_AGENT},
    },
    middleware::Next,
    response::Response,
};
use futures_util::FutureExt;
use std::net::SocketAddr;
use std::panic::AssertUnwindSafe;
use tokio::time::Instant;
use tracing::{Instrument, Span};

use crate::utils::client_key::client_key;

/// Logs method, path, status, duration, response size, client key, peer
/// address and user agent once the inner stack has produced a response.
///
/// Inner layers and handlers run inside a `request` span carrying the method
/// and path. `client` is the same key the rate limiter uses; `peer` is the raw
/// socket address.
///
/// A panic in the inner stack is logged here as status 500 and then resumed,
/// so [`super::recovery`] still builds the response.
///
/// # Example Logs
///
/// ```text
/// INFO request{method=POST path=/api/v1/admin/auth/login}: HTTP request status=200 duration_ms=83 size=412 client=203.0.113.7 peer=10.0.0.7:51234 user_agent=curl/8.5.0
/// ```
pub async fn layer(req: Request, next: Next) -> Response {
    let start = Instant::now();

    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let remote = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let client = client_key(req.headers(), remote);
    let peer = remote
        .map(|addr| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_owned();

    let span = tracing::info_span!("request", %method, %path);

    let entry = AccessEntry {
        span: span.clone(),
        start,
        client,
        peer,
        user_agent,
    };

    match AssertUnwindSafe(next.run(req).instrument(span))
        .catch_unwind()
        .await
    {
        Ok(response) => {
            entry.log(response.status(), response_size(&response));
            response
        }
        Err(payload) => {
            entry.log(StatusCode::INTERNAL_SERVER_ERROR, 0);
            std::panic::resume_unwind(payload)
        }
    }
}

struct AccessEntry {
    span: Span,
    start: Instant,
    client: String,
    peer: String,
    user_agent: String,
}

impl AccessEntry {
    fn log(&self, status: StatusCode, size: u64) {
        let duration_ms = u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX);

        self.span.in_scope(|| {
            tracing::info!(
                status = status.as_u16(),
                duration_ms,
                size,
                client = %self.client,
                peer = %self.peer,
                user_agent = %self.user_agent,
                "HTTP request"
            );
        });
    }
}

/// Body size from `Content-Length`, else the body's exact size hint, else 0
/// for streamed bodies of unknown length.
fn response_size(response: &Response) -> u64 {
    response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .or_else(|| response.body().size_hint().exact())
        .unwrap_or(0)
}
