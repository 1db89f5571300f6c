//! Repository trait for server-side sessions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::{NewSession, Session};
use crate::domain::errors::StoreError;

/// Repository interface for one session namespace.
///
/// Admin and customer sessions live in separate namespaces; an instance of this
/// trait only ever sees one of them.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgSessionRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persists a new session and returns it with store-assigned timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Conflict`] if the token is already in use.
    async fn create(&self, session: NewSession) -> Result<Session, StoreError>;

    /// Looks a session up by its raw token.
    ///
    /// Returns `Ok(None)` when no session carries this token.
    async fn find_by_token(&self, token: &str) -> Result<Option<Session>, StoreError>;

    /// Sets `last_activity_at` to the current time.
    async fn update_last_activity(&self, token: &str) -> Result<(), StoreError>;

    /// Deletes a session by token.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if a session was removed
    /// - `Ok(false)` if it was already gone
    async fn delete(&self, token: &str) -> Result<bool, StoreError>;

    /// Deletes every session owned by a principal, returning how many were removed.
    async fn delete_all_for(&self, principal_id: Uuid) -> Result<u64, StoreError>;

    /// Deletes sessions created strictly before `cutoff`.
    async fn delete_expired_before(&self, cutoff: DateTime<Utc>) -> Result<u64, StoreError>;
}
