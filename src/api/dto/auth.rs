//! DTOs for login, registration and session endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{Admin, Customer};

/// Credentials for either principal type.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Customer self-registration.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

/// Body of a successful admin login.
///
/// The token is also set as a cookie; it is returned here once so non-browser
/// clients can capture it.
#[derive(Debug, Serialize)]
pub struct AdminLoginResponse {
    pub admin: Admin,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct CustomerLoginResponse {
    pub customer: Customer,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_validation() {
        let valid = LoginRequest {
            email: "admin@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(valid.validate().is_ok());

        let bad_email = LoginRequest {
            email: "not-an-email".to_string(),
            password: "password123".to_string(),
        };
        assert!(bad_email.validate().is_err());

        let short_password = LoginRequest {
            email: "admin@example.com".to_string(),
            password: "short".to_string(),
        };
        let errors = short_password.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_register_request_requires_name() {
        let request = RegisterRequest {
            email: "new@example.com".to_string(),
            password: "password123".to_string(),
            name: String::new(),
        };

        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }
}
