//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod admin_auth;
pub mod health;
pub mod profile;
pub mod store_auth;

pub use admin_auth::{
    admin_login_handler, admin_logout_handler, admin_me_handler, admin_refresh_handler,
};
pub use health::health_handler;
pub use profile::profile_handler;
pub use store_auth::{customer_login_handler, customer_logout_handler, customer_register_handler};
