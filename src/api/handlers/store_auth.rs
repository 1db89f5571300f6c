//! Handlers for customer authentication endpoints.

use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::CookieJar;
use validator::Validate;

use crate::api::cookies::{CUSTOMER_SESSION_COOKIE, removal_cookie, session_cookie, session_token};
use crate::api::dto::ApiResponse;
use crate::api::dto::auth::{CustomerLoginResponse, LoginRequest, RegisterRequest};
use crate::api::extractors::{CurrentCustomer, RequestClient};
use crate::domain::entities::Customer;
use crate::error::AppError;
use crate::state::AppState;

/// Signs a customer in.
///
/// `POST /api/v1/store/auth/login`
///
/// Sets the `customer_session_token` cookie. Failure responses match
/// [`super::admin_auth::admin_login_handler`].
pub async fn customer_login_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    RequestClient(client): RequestClient,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, ApiResponse<CustomerLoginResponse>), AppError> {
    payload.validate()?;

    let (customer, session) = state
        .customer_auth
        .login(&payload.email, &payload.password, client)
        .await
        .inspect_err(|e| tracing::warn!(email = %payload.email, error = %e, "Customer login failed"))?;

    tracing::info!(customer_id = %customer.id, "Customer logged in");

    let jar = jar.add(session_cookie(
        CUSTOMER_SESSION_COOKIE,
        session.token.clone(),
        &state.session,
    ));

    Ok((
        jar,
        ApiResponse::ok(
            "Login successful",
            CustomerLoginResponse {
                customer,
                token: session.token,
            },
        ),
    ))
}

/// Creates a customer account. Does not sign the customer in.
///
/// # Endpoint
///
/// `POST /api/v1/store/auth/register`
///
/// # Request Body
///
/// ```json
/// { "email": "jane@example.com", "password": "password123", "name": "Jane" }
/// ```
///
/// # Errors
///
/// - `422` if the body fails validation
/// - `409` if the email is already registered
pub async fn customer_register_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, ApiResponse<Customer>), AppError> {
    payload.validate()?;

    let customer = state
        .customer_service
        .register(payload.email, &payload.password, payload.name)
        .await?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::ok("Registration successful", customer),
    ))
}

/// Ends the current customer session and clears the cookie.
///
/// `POST /api/v1/store/auth/logout`
pub async fn customer_logout_handler(
    State(state): State<AppState>,
    CurrentCustomer(customer): CurrentCustomer,
    jar: CookieJar,
) -> Result<(CookieJar, ApiResponse<()>), AppError> {
    if let Some(token) = session_token(&jar, CUSTOMER_SESSION_COOKIE) {
        state.customer_auth.logout(token).await?;
    }

    tracing::info!(customer_id = %customer.id, "Customer logged out");

    let jar = jar.add(removal_cookie(CUSTOMER_SESSION_COOKIE, &state.session));

    Ok((jar, ApiResponse::message("Logout successful")))
}
