//! Behaviour shared by every principal type that can hold a session.

use uuid::Uuid;

/// An account that can sign in and own sessions.
///
/// Implemented by [`super::Admin`] and [`super::Customer`]. The session
/// authenticator is generic over this trait so both principal types share one
/// login / verify / logout implementation while keeping separate stores.
pub trait Account: Clone + Send + Sync + 'static {
    fn id(&self) -> Uuid;

    fn email(&self) -> &str;

    /// Stored bcrypt hash of the account password.
    fn password_hash(&self) -> &str;

    /// The "active and not soft-deleted" standing check.
    fn is_permitted(&self) -> bool;

    /// Wipes the password hash before the account leaves the service layer.
    fn clear_password(&mut self);
}
