//! Cookie session authentication middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use serde_json::json;
use std::time::Duration;

use crate::api::cookies::{ADMIN_SESSION_COOKIE, CUSTOMER_SESSION_COOKIE, session_token};
use crate::application::services::SessionAuthenticator;
use crate::domain::entities::{Account, Principal};
use crate::error::AppError;
use crate::state::AppState;

/// Authenticates an administrator from the `session_token` cookie.
///
/// # Authentication Flow
///
/// 1. Read the session cookie
/// 2. Verify the token (expiry, principal lookup, activity refresh, standing)
/// 3. Insert [`Principal::Admin`] into request extensions
/// 4. Continue to the handler
///
/// # Errors
///
/// - `401 Unauthorized: No session found` - cookie missing or empty
/// - `401 Unauthorized: Invalid or expired session` - unknown, expired or
///   dangling session
/// - `403 Account is inactive or deleted` - valid session, account lacks standing
/// - `500` - store failure
///
/// # Example
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/me", get(me_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::admin_layer));
/// ```
pub async fn admin_layer(
    State(st): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let principal = authenticate(
        &st.admin_auth,
        &jar,
        ADMIN_SESSION_COOKIE,
        st.session.lifetime,
    )
    .await?;

    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}

/// Authenticates a customer from the `customer_session_token` cookie.
///
/// Same flow and failure responses as [`admin_layer`], against the customer
/// session namespace.
pub async fn customer_layer(
    State(st): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let principal = authenticate(
        &st.customer_auth,
        &jar,
        CUSTOMER_SESSION_COOKIE,
        st.session.lifetime,
    )
    .await?;

    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}

async fn authenticate<P>(
    authenticator: &SessionAuthenticator<P>,
    jar: &CookieJar,
    cookie_name: &str,
    session_lifetime: Duration,
) -> Result<Principal, AppError>
where
    P: Account,
    Principal: From<P>,
{
    let token = session_token(jar, cookie_name).ok_or_else(|| AppError::unauthorized("Unauthorized: No session found", json!({})))?;

    match authenticator.verify(token, session_lifetime).await {
        Ok(principal) => Ok(Principal::from(principal)),
        Err(e) => {
            if e.is_unauthenticated() {
                tracing::warn!(cookie = cookie_name, error = %e, "Session verification failed");
            }
            Err(e.into())
        }
    }
}
