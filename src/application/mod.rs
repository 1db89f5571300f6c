//! Application layer services implementing business logic.
//!
//! Services consume repository traits and expose the operations HTTP handlers
//! and the admin CLI call.
//!
//! # Available Services
//!
//! - [`services::SessionAuthenticator`] - Login, session verification, logout,
//!   refresh, revocation and expiry purge, generic over the principal type
//! - [`services::CustomerService`] - Customer self-registration

pub mod services;
