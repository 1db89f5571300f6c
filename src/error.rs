//! HTTP-facing error type.
//!
//! Every failure that reaches a handler boundary is converted into an
//! [`AppError`], which renders the standard error envelope:
//!
//! ```json
//! { "success": false, "message": "Account is inactive or deleted", "errors": { ... } }
//! ```
//!
//! Internal failures are logged in full where they are converted and rendered
//! with a generic message only.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use validator::ValidationErrors;

use crate::domain::errors::{AuthError, StoreError};

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Value::is_null")]
    errors: Value,
}

#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String, details: Value },
    Validation { message: String, details: Value },
    Unauthorized { message: String, details: Value },
    Forbidden { message: String, details: Value },
    NotFound { message: String, details: Value },
    Conflict { message: String, details: Value },
    TooManyRequests { message: String, details: Value },
    Internal { message: String, details: Value },
    ServiceUnavailable { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::BadRequest {
            message: message.into(),
            details,
        }
    }
    pub fn validation(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }
    pub fn forbidden(message: impl Into<String>, details: Value) -> Self {
        Self::Forbidden {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn too_many_requests(message: impl Into<String>, details: Value) -> Self {
        Self::TooManyRequests {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }
    pub fn service_unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::ServiceUnavailable {
            message: message.into(),
            details,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::TooManyRequests { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let (message, details) = match self {
            AppError::BadRequest { message, details }
            | AppError::Validation { message, details }
            | AppError::Unauthorized { message, details }
            | AppError::Forbidden { message, details }
            | AppError::NotFound { message, details }
            | AppError::Conflict { message, details }
            | AppError::TooManyRequests { message, details }
            | AppError::Internal { message, details }
            | AppError::ServiceUnavailable { message, details } => (message, details),
        };

        let errors = match details {
            Value::Object(ref map) if map.is_empty() => Value::Null,
            other => other,
        };

        let body = ErrorBody {
            success: false,
            message,
            errors,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let details = serde_json::to_value(errors.field_errors()).unwrap_or_else(|_| json!({}));
        AppError::validation("Validation failed", details)
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Conflict(constraint) => {
                tracing::warn!(%constraint, "Unique constraint violation");
                AppError::conflict("Resource already exists", json!({}))
            }
            other => {
                tracing::error!(error = %other, "Store failure");
                AppError::internal("Internal server error", json!({}))
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidCredentials => {
                AppError::unauthorized("Invalid email or password", json!({}))
            }
            AuthError::SessionNotFound
            | AuthError::SessionExpired
            | AuthError::PrincipalNotFound => {
                AppError::unauthorized("Unauthorized: Invalid or expired session", json!({}))
            }
            AuthError::Forbidden => AppError::forbidden("Account is inactive or deleted", json!({})),
            AuthError::Store(store) => store.into(),
            AuthError::Credential(reason) => {
                tracing::error!(%reason, "Credential processing failed");
                AppError::internal("Internal server error", json!({}))
            }
        }
    }
}
