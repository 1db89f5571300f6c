//! Error taxonomy for the persistence contract and session authentication.

use std::time::Duration;
use thiserror::Error;

/// Failures reported by repository implementations.
///
/// "Row absent" is not an error: lookups return `Ok(None)` and deletes return
/// `Ok(false)`. Everything here is a fault from the caller's point of view.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("database call exceeded its {0:?} deadline")]
    Timeout(Duration),

    #[error("unique constraint violated: {0}")]
    Conflict(String),
}

/// Outcome of a failed login, session verification, or session mutation.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email, wrong password, or an account without standing.
    /// The three cases are deliberately indistinguishable.
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("session not found")]
    SessionNotFound,

    #[error("session has expired")]
    SessionExpired,

    /// The session references a principal row that no longer exists.
    #[error("session principal not found")]
    PrincipalNotFound,

    /// Identity was proven but the account is inactive or soft-deleted.
    #[error("account is inactive or deleted")]
    Forbidden,

    #[error(transparent)]
    Store(#[from] StoreError),

    /// Password hashing or token minting failed.
    #[error("credential processing failed: {0}")]
    Credential(String),
}

impl AuthError {
    /// Whether this failure means the caller could not prove an identity.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials
                | Self::SessionNotFound
                | Self::SessionExpired
                | Self::PrincipalNotFound
        )
    }
}
