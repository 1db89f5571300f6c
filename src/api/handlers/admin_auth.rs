//! Handlers for administrator session endpoints.

use axum::{Json, extract::State};
use axum_extra::extract::CookieJar;
use serde_json::json;
use validator::Validate;

use crate::api::cookies::{ADMIN_SESSION_COOKIE, removal_cookie, session_cookie, session_token};
use crate::api::dto::ApiResponse;
use crate::api::dto::auth::{AdminLoginResponse, LoginRequest};
use crate::api::extractors::{CurrentAdmin, RequestClient};
use crate::domain::entities::Admin;
use crate::error::AppError;
use crate::state::AppState;

/// Signs an administrator in.
///
/// # Endpoint
///
/// `POST /api/v1/admin/auth/login`
///
/// # Request Body
///
/// ```json
/// { "email": "admin@example.com", "password": "password123" }
/// ```
///
/// Sets the `session_token` cookie and echoes the token in the body.
///
/// # Errors
///
/// - `422` if the body fails validation
/// - `401 Invalid email or password` for unknown email, wrong password, or an
///   inactive/deleted account
pub async fn admin_login_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    RequestClient(client): RequestClient,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, ApiResponse<AdminLoginResponse>), AppError> {
    payload.validate()?;

    let (admin, session) = state
        .admin_auth
        .login(&payload.email, &payload.password, client)
        .await
        .inspect_err(|e| tracing::warn!(email = %payload.email, error = %e, "Admin login failed"))?;

    tracing::info!(admin_id = %admin.id, email = %admin.email, "Admin logged in");

    let jar = jar.add(session_cookie(
        ADMIN_SESSION_COOKIE,
        session.token.clone(),
        &state.session,
    ));

    Ok((
        jar,
        ApiResponse::ok(
            "Login successful",
            AdminLoginResponse {
                admin,
                token: session.token,
            },
        ),
    ))
}

/// Ends the current administrator session and clears the cookie.
///
/// `POST /api/v1/admin/auth/logout`
pub async fn admin_logout_handler(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
    jar: CookieJar,
) -> Result<(CookieJar, ApiResponse<()>), AppError> {
    if let Some(token) = session_token(&jar, ADMIN_SESSION_COOKIE) {
        state.admin_auth.logout(token).await?;
    }

    tracing::info!(admin_id = %admin.id, "Admin logged out");

    let jar = jar.add(removal_cookie(ADMIN_SESSION_COOKIE, &state.session));

    Ok((jar, ApiResponse::message("Logout successful")))
}

/// Returns the authenticated administrator.
///
/// `GET /api/v1/admin/auth/me`
pub async fn admin_me_handler(CurrentAdmin(admin): CurrentAdmin) -> ApiResponse<Admin> {
    ApiResponse::ok("Admin retrieved successfully", admin)
}

/// Bumps the activity timestamp of the current session.
///
/// `POST /api/v1/admin/auth/refresh`
pub async fn admin_refresh_handler(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    jar: CookieJar,
) -> Result<ApiResponse<()>, AppError> {
    let token = session_token(&jar, ADMIN_SESSION_COOKIE)
        .ok_or_else(|| AppError::unauthorized("Unauthorized: No session found", json!({})))?;

    state.admin_auth.refresh(token).await?;

    Ok(ApiResponse::message("Session refreshed successfully"))
}
