#![allow(dead_code)]

use axum_test::TestServer;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use storefront_api::api::cookies::SessionSettings;
use storefront_api::application::services::{CustomerService, SessionAuthenticator};
use storefront_api::domain::entities::{Admin, Customer};
use storefront_api::domain::rate_limit::RateLimiterRegistry;
use storefront_api::infrastructure::persistence::{
    PgAdminRepository, PgCustomerRepository, PgHealthRepository, PgSessionRepository,
    SessionNamespace,
};
use storefront_api::routes::app_router;
use storefront_api::state::AppState;
use storefront_api::utils::session_token::hash_session_token;
use uuid::Uuid;

pub const TEST_PASSWORD: &str = "password123";
pub const SESSION_LIFETIME: Duration = Duration::from_secs(30 * 24 * 60 * 60);
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Low-cost bcrypt hash of [`TEST_PASSWORD`].
pub fn test_password_hash() -> String {
    bcrypt::hash(TEST_PASSWORD, 4).unwrap()
}

pub async fn create_admin(pool: &PgPool, email: &str) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO admins (email, password, name, role) VALUES ($1, $2, 'Test Admin', 'admin') RETURNING id",
    )
    .bind(email)
    .bind(test_password_hash())
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_customer(pool: &PgPool, email: &str) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO customers (email, password, name) VALUES ($1, $2, 'Test Customer') RETURNING id",
    )
    .bind(email)
    .bind(test_password_hash())
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn deactivate_admin(pool: &PgPool, id: Uuid) {
    sqlx::query("UPDATE admins SET is_active = FALSE WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn soft_delete_customer(pool: &PgPool, id: Uuid) {
    sqlx::query("UPDATE customers SET deleted_at = NOW() WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .unwrap();
}

/// Moves a session's `created_at` into the past.
pub async fn age_session(pool: &PgPool, table: &str, token: &str, seconds: i64) {
    sqlx::query(&format!(
        "UPDATE {table} SET created_at = NOW() - make_interval(secs => $2) WHERE token_hash = $1"
    ))
    .bind(hash_session_token(token))
    .bind(seconds as f64)
    .execute(pool)
    .await
    .unwrap();
}

/// Moves a session's `last_activity_at` into the past.
pub async fn idle_session(pool: &PgPool, table: &str, token: &str, seconds: i64) {
    sqlx::query(&format!(
        "UPDATE {table} SET last_activity_at = NOW() - make_interval(secs => $2) WHERE token_hash = $1"
    ))
    .bind(hash_session_token(token))
    .bind(seconds as f64)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn session_count(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn admin_authenticator(pool: &PgPool) -> SessionAuthenticator<Admin> {
    let pool = Arc::new(pool.clone());
    SessionAuthenticator::new(
        Arc::new(PgAdminRepository::new(pool.clone(), QUERY_TIMEOUT)),
        Arc::new(PgSessionRepository::new(
            pool,
            SessionNamespace::Admin,
            QUERY_TIMEOUT,
        )),
    )
}

pub fn customer_authenticator(pool: &PgPool) -> SessionAuthenticator<Customer> {
    let pool = Arc::new(pool.clone());
    SessionAuthenticator::new(
        Arc::new(PgCustomerRepository::new(pool.clone(), QUERY_TIMEOUT)),
        Arc::new(PgSessionRepository::new(
            pool,
            SessionNamespace::Customer,
            QUERY_TIMEOUT,
        )),
    )
}

pub fn create_test_state(pool: PgPool) -> AppState {
    create_test_state_with_limit(pool, 1_000)
}

pub fn create_test_state_with_limit(pool: PgPool, rate_limit_requests: u32) -> AppState {
    let customers = Arc::new(PgCustomerRepository::new(
        Arc::new(pool.clone()),
        QUERY_TIMEOUT,
    ));

    AppState {
        admin_auth: Arc::new(admin_authenticator(&pool)),
        customer_auth: Arc::new(customer_authenticator(&pool)),
        customer_service: Arc::new(CustomerService::new(customers)),
        rate_limiter: Arc::new(RateLimiterRegistry::new(
            rate_limit_requests,
            Duration::from_secs(60),
        )),
        health: Arc::new(PgHealthRepository::new(Arc::new(pool))),
        session: SessionSettings {
            lifetime: SESSION_LIFETIME,
            secure: false,
            domain: String::new(),
        },
    }
}

pub fn make_server(state: AppState) -> TestServer {
    let app = app_router(state, &["http://localhost:3000".to_string()]);
    TestServer::new(app).unwrap()
}
