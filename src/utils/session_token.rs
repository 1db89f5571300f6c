//! Session token minting and at-rest hashing.

use base64::Engine as _;
use sha2::{Digest, Sha256};

use crate::domain::errors::AuthError;

/// Random bytes per token (256 bits of entropy).
const TOKEN_LENGTH_BYTES: usize = 32;

/// Generates a cryptographically secure session token.
///
/// Uses `getrandom` for entropy and encodes the result as URL-safe base64
/// without padding, producing a 43-character cookie-safe string.
///
/// # Errors
///
/// Returns [`AuthError::Credential`] if the system random source fails.
pub fn generate_session_token() -> Result<String, AuthError> {
    let mut buffer = [0u8; TOKEN_LENGTH_BYTES];

    getrandom::fill(&mut buffer)
        .map_err(|e| AuthError::Credential(format!("random source unavailable: {e}")))?;

    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer))
}

/// Hashes a raw session token for storage and lookup.
///
/// Returns a 64-character lowercase hex-encoded SHA-256 digest. Tokens carry
/// 256 bits of entropy, so an unkeyed digest is enough to make a leaked
/// sessions table useless for hijacking.
pub fn hash_session_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}
