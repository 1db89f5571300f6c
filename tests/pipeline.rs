mod common;

use axum::http::StatusCode;
use axum::{Router, middleware, routing::get};
use axum_test::TestServer;
use serde_json::Value;
use sqlx::PgPool;
use std::sync::{Arc, Mutex};
use storefront_api::api::middleware::{recovery, request_log};
use tower::ServiceExt;

#[sqlx::test]
async fn test_health_reports_database(pool: PgPool) {
    let server = common::make_server(common::create_test_state(pool));

    let response = server.get("/api/v1/health").await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Service is healthy");
    assert_eq!(json["data"]["status"], "ok");
    assert_eq!(json["data"]["service"], "storefront-api");
    assert_eq!(json["data"]["database"]["status"], "ok");
    assert!(json["data"]["database"]["response_time_ms"].is_u64());
}

#[sqlx::test]
async fn test_health_unavailable_when_pool_closed(pool: PgPool) {
    let server = common::make_server(common::create_test_state(pool.clone()));
    pool.close().await;

    let response = server.get("/api/v1/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.json::<Value>()["message"], "Service unhealthy");
}

#[sqlx::test]
async fn test_rate_limit_rejects_burst(pool: PgPool) {
    let server = common::make_server(common::create_test_state_with_limit(pool, 2));

    for _ in 0..2 {
        server
            .get("/api/v1/health")
            .add_header("X-Forwarded-For", "203.0.113.7")
            .await
            .assert_status_ok();
    }

    let response = server
        .get("/api/v1/health")
        .add_header("X-Forwarded-For", "203.0.113.7")
        .await;

    response.assert_status(StatusCode::TOO_MANY_REQUESTS);
    let json = response.json::<Value>();
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Rate limit exceeded");
}

#[sqlx::test]
async fn test_rate_limit_is_per_client(pool: PgPool) {
    let server = common::make_server(common::create_test_state_with_limit(pool, 1));

    server
        .get("/api/v1/health")
        .add_header("X-Forwarded-For", "203.0.113.7")
        .await
        .assert_status_ok();

    server
        .get("/api/v1/health")
        .add_header("X-Forwarded-For", "203.0.113.7")
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS);

    server
        .get("/api/v1/health")
        .add_header("X-Forwarded-For", "198.51.100.1")
        .await
        .assert_status_ok();
}

#[sqlx::test]
async fn test_rate_limit_runs_before_authentication(pool: PgPool) {
    let server = common::make_server(common::create_test_state_with_limit(pool, 1));

    server
        .get("/api/v1/admin/auth/me")
        .add_header("X-Real-IP", "203.0.113.7")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    server
        .get("/api/v1/admin/auth/me")
        .add_header("X-Real-IP", "203.0.113.7")
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS);
}

#[sqlx::test]
async fn test_unknown_route_is_not_found(pool: PgPool) {
    let server = common::make_server(common::create_test_state(pool));

    server
        .get("/api/v1/admin/nope")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[sqlx::test]
async fn test_cors_allows_configured_origin_with_credentials(pool: PgPool) {
    let server = common::make_server(common::create_test_state(pool));

    let response = server
        .get("/api/v1/health")
        .add_header("Origin", "http://localhost:3000")
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.header("access-control-allow-origin"),
        "http://localhost:3000"
    );
    assert_eq!(response.header("access-control-allow-credentials"), "true");
}

#[sqlx::test]
async fn test_cors_ignores_unknown_origin(pool: PgPool) {
    let server = common::make_server(common::create_test_state(pool));

    let response = server
        .get("/api/v1/health")
        .add_header("Origin", "http://evil.example")
        .await;

    assert!(
        response
            .headers()
            .get("access-control-allow-origin")
            .is_none()
    );
}

async fn boom() -> &'static str {
    panic!("boom")
}

#[tokio::test]
async fn test_panic_becomes_internal_error() {
    let app = Router::new()
        .route("/boom", get(boom))
        .route("/ok", get(|| async { "ok" }))
        .layer(middleware::from_fn(recovery::layer));
    let server = TestServer::new(app).unwrap();

    let response = server.get("/boom").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let json = response.json::<Value>();
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Internal server error");

    // The server keeps serving after a panic.
    server.get("/ok").await.assert_status_ok();
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

#[tokio::test]
async fn test_panicking_request_is_access_logged() {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let app = Router::new()
        .route("/boom", get(boom))
        .layer(middleware::from_fn(request_log::layer))
        .layer(middleware::from_fn(recovery::layer));

    let request = axum::http::Request::builder()
        .uri("/boom")
        .header("X-Forwarded-For", "203.0.113.7, 10.0.0.1")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let logs = buffer.contents();
    let line = logs
        .lines()
        .find(|line| line.contains("HTTP request"))
        .expect("no access log line for the panicking request");

    assert!(line.contains("path=/boom"));
    assert!(line.contains("status=500"));
    assert!(line.contains("client=203.0.113.7"));
    assert!(logs.contains("Panic recovered"));
}
