//! Domain layer containing entities, repository contracts and in-memory policy.
//!
//! This module has no knowledge of HTTP. Repository traits are implemented by
//! the infrastructure layer and consumed by [`crate::application::services`].
//!
//! # Architecture
//!
//! - [`entities`] - Admins, customers, sessions and the request principal
//! - [`repositories`] - Persistence contracts (with `mockall` mocks under test)
//! - [`errors`] - Store and authentication error taxonomy
//! - [`rate_limit`] - Per-client token buckets and their registry
//!
//! # Request Admission Flow
//!
//! 1. [`rate_limit::RateLimiterRegistry::admit`] decides whether the client may proceed
//! 2. The session authenticator resolves the cookie token into a [`entities::Principal`]
//! 3. The handler receives the principal through a typed extractor

pub mod entities;
pub mod errors;
pub mod rate_limit;
pub mod repositories;
