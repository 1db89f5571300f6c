//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, service wiring, the rate limiter
//! sweep task and the Axum server lifecycle.

use crate::application::services::{CustomerService, SessionAuthenticator};
use crate::config::Config;
use crate::domain::entities::{Admin, Customer};
use crate::domain::rate_limit::{RateLimiterRegistry, SWEEP_INTERVAL};
use crate::infrastructure::persistence::{
    PgAdminRepository, PgCustomerRepository, PgHealthRepository, PgSessionRepository,
    SessionNamespace,
};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;

/// Opens the PostgreSQL pool with the configured limits.
///
/// # Errors
///
/// Returns an error if the database is unreachable within `DB_CONNECT_TIMEOUT`.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

/// Wires repositories and services into the shared handler state.
pub fn build_state(pool: Arc<PgPool>, config: &Config) -> AppState {
    let query_timeout = config.query_timeout();

    let admins = Arc::new(PgAdminRepository::new(pool.clone(), query_timeout));
    let customers = Arc::new(PgCustomerRepository::new(pool.clone(), query_timeout));
    let admin_sessions = Arc::new(PgSessionRepository::new(
        pool.clone(),
        SessionNamespace::Admin,
        query_timeout,
    ));
    let customer_sessions = Arc::new(PgSessionRepository::new(
        pool.clone(),
        SessionNamespace::Customer,
        query_timeout,
    ));

    AppState {
        admin_auth: Arc::new(SessionAuthenticator::<Admin>::new(admins, admin_sessions)),
        customer_auth: Arc::new(SessionAuthenticator::<Customer>::new(
            customers.clone(),
            customer_sessions,
        )),
        customer_service: Arc::new(CustomerService::new(customers)),
        rate_limiter: Arc::new(RateLimiterRegistry::new(
            config.rate_limit_requests,
            config.rate_limit_window(),
        )),
        health: Arc::new(PgHealthRepository::new(pool)),
        session: config.session_settings(),
    }
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Services and the rate limiter idle sweep
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails
/// - Migrations fail
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let state = build_state(Arc::new(pool), &config);

    let sweeper = state.rate_limiter.spawn_sweeper(SWEEP_INTERVAL);
    tracing::info!("Rate limiter sweep started");

    let app = NormalizePathLayer::trim_trailing_slash()
        .layer(app_router(state, &config.cors_allowed_origins));

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    sweeper.abort();
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
