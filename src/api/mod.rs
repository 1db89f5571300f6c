//! REST API layer for HTTP request/response handling.
//!
//! This layer translates HTTP requests into service calls and formats
//! responses according to API contracts.
//!
//! # Modules
//!
//! - [`cookies`] - Session cookie names and construction
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`extractors`] - Typed principal and client extractors
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Recovery, logging, CORS, rate limiting and session auth
//! - [`routes`] - Route configuration and composition

pub mod cookies;
pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routes;
