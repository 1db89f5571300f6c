//! Utility functions for credentials, request identity and database errors.
//!
//! - [`session_token`] - Session token generation and at-rest hashing
//! - [`password`] - bcrypt hashing off the async executor
//! - [`client_key`] - Rate limiting key derivation from headers
//! - [`db_error`] - SQLx error classification

pub mod client_key;
pub mod db_error;
pub mod password;
pub mod session_token;
