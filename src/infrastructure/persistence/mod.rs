//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx. Each call
//! runs under the configured per-query deadline.
//!
//! # Repositories
//!
//! - [`PgSessionRepository`] - Session storage for one [`SessionNamespace`]
//! - [`PgAdminRepository`] - Administrator lookup and bootstrap
//! - [`PgCustomerRepository`] - Customer lookup and registration
//! - [`PgHealthRepository`] - Store liveness probe

mod deadline;
pub mod pg_admin_repository;
pub mod pg_customer_repository;
pub mod pg_health_repository;
pub mod pg_session_repository;

pub use pg_admin_repository::PgAdminRepository;
pub use pg_customer_repository::PgCustomerRepository;
pub use pg_health_repository::PgHealthRepository;
pub use pg_session_repository::{PgSessionRepository, SessionNamespace};
