//! HTTP middleware for request processing and protection.
//!
//! Applied outermost first: [`recovery`], [`request_log`], [`cors`],
//! [`rate_limit`], then the route-scoped session check in [`auth`].

pub mod auth;
pub mod cors;
pub mod rate_limit;
pub mod recovery;
pub mod request_log;
