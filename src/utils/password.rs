//! Password hashing on the blocking thread pool.

use std::sync::LazyLock;

use crate::domain::errors::AuthError;

/// Hash verified when a login names an unknown email, so both failure paths cost
/// one bcrypt verification.
static DUMMY_HASH: LazyLock<String> = LazyLock::new(|| {
    bcrypt::hash("timing-equaliser-not-a-real-password", bcrypt::DEFAULT_COST).unwrap_or_default()
});

/// Hashes a password with bcrypt at the default cost.
///
/// # Errors
///
/// Returns [`AuthError::Credential`] if hashing fails or the blocking task panics.
pub async fn hash_password(password: &str) -> Result<String, AuthError> {
    hash_password_with_cost(password, bcrypt::DEFAULT_COST).await
}

/// Hashes a password with an explicit bcrypt cost.
pub async fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, AuthError> {
    let password = password.to_owned();

    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AuthError::Credential(format!("hashing task failed: {e}")))?
        .map_err(|e| AuthError::Credential(e.to_string()))
}

/// Checks a password against a stored bcrypt hash.
///
/// A malformed stored hash counts as a mismatch.
///
/// # Errors
///
/// Returns [`AuthError::Credential`] only if the blocking task itself fails.
pub async fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let password = password.to_owned();
    let hash = hash.to_owned();

    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash).unwrap_or(false))
        .await
        .map_err(|e| AuthError::Credential(format!("verification task failed: {e}")))
}

/// Burns one bcrypt verification against a fixed hash and discards the result.
pub async fn verify_dummy_password(password: &str) {
    let _ = verify_password(password, DUMMY_HASH.as_str()).await;
}
