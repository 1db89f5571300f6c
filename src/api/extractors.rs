//! Typed access to the principal injected by the session middleware.

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::header::USER_AGENT;
use axum::http::request::Parts;
use serde_json::json;
use std::convert::Infallible;
use std::net::SocketAddr;

use crate::application::services::ClientInfo;
use crate::domain::entities::{Admin, Customer, Principal};
use crate::error::AppError;
use crate::utils::client_key::client_key;

/// The administrator authenticated for this request.
///
/// Only valid on routes behind [`crate::api::middleware::auth::admin_layer`];
/// elsewhere extraction fails with 401.
#[derive(Debug, Clone)]
pub struct CurrentAdmin(pub Admin);

/// The customer authenticated for this request.
#[derive(Debug, Clone)]
pub struct CurrentCustomer(pub Customer);

fn missing_principal() -> AppError {
    AppError::unauthorized("Unauthorized: No session found", json!({}))
}

impl<S> FromRequestParts<S> for CurrentAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<Principal>() {
            Some(Principal::Admin(admin)) => Ok(Self(admin.clone())),
            _ => Err(missing_principal()),
        }
    }
}

impl<S> FromRequestParts<S> for CurrentCustomer
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<Principal>() {
            Some(Principal::Customer(customer)) => Ok(Self(customer.clone())),
            _ => Err(missing_principal()),
        }
    }
}

/// Client metadata recorded on new sessions: the rate limiting client key as
/// the IP address, plus the `User-Agent` header.
#[derive(Debug, Clone)]
pub struct RequestClient(pub ClientInfo);

impl<S> FromRequestParts<S> for RequestClient
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let remote = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);

        let user_agent = parts
            .headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_owned();

        Ok(Self(ClientInfo {
            ip_address: client_key(&parts.headers, remote),
            user_agent,
        }))
    }
}
