//! Session cookie construction.
//!
//! Admin and customer sessions travel in differently named cookies so a token
//! from one namespace is never presented to the other.

use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use std::time::Duration;

pub const ADMIN_SESSION_COOKIE: &str = "session_token";
pub const CUSTOMER_SESSION_COOKIE: &str = "customer_session_token";

/// Cookie and expiry settings shared by both session namespaces.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Absolute lifetime measured from session creation.
    pub lifetime: Duration,
    /// Adds the `Secure` attribute.
    pub secure: bool,
    /// `Domain` attribute; omitted when empty.
    pub domain: String,
}

/// Reads a non-empty session token from the named cookie.
pub fn session_token<'a>(jar: &'a CookieJar, name: &str) -> Option<&'a str> {
    jar.get(name)
        .map(|cookie| cookie.value())
        .filter(|value| !value.is_empty())
}

/// Builds the cookie carrying a freshly minted session token.
///
/// `Max-Age` equals the configured session lifetime in seconds.
pub fn session_cookie(
    name: &'static str,
    token: String,
    settings: &SessionSettings,
) -> Cookie<'static> {
    let max_age = i64::try_from(settings.lifetime.as_secs()).unwrap_or(i64::MAX);
    build(name, token, max_age, settings)
}

/// Builds a cookie that makes the browser discard the session cookie.
pub fn removal_cookie(name: &'static str, settings: &SessionSettings) -> Cookie<'static> {
    build(name, String::new(), 0, settings)
}

fn build(
    name: &'static str,
    value: String,
    max_age_secs: i64,
    settings: &SessionSettings,
) -> Cookie<'static> {
    let mut builder = Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(settings.secure)
        .max_age(time::Duration::seconds(max_age_secs));

    if !settings.domain.is_empty() {
        builder = builder.domain(settings.domain.clone());
    }

    builder.build()
}
