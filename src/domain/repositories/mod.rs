//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern. They are
//! implemented by concrete repositories in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`SessionRepository`] - Session CRUD for one namespace
//! - [`PrincipalRepository`] - Account lookup by email or id
//! - [`CustomerRepository`] - Customer registration
//! - [`HealthRepository`] - Store liveness probe
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod customer_repository;
pub mod health_repository;
pub mod principal_repository;
pub mod session_repository;

pub use customer_repository::CustomerRepository;
pub use health_repository::HealthRepository;
pub use principal_repository::PrincipalRepository;
pub use session_repository::SessionRepository;

#[cfg(test)]
pub use customer_repository::MockCustomerRepository;
#[cfg(test)]
pub use session_repository::MockSessionRepository;
