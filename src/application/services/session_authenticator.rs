//! Session-based authentication shared by both principal types.

use chrono::{TimeDelta, Utc};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::domain::entities::{Account, NewSession, Session};
use crate::domain::errors::AuthError;
use crate::domain::repositories::{PrincipalRepository, SessionRepository};
use crate::utils::password::{verify_dummy_password, verify_password};
use crate::utils::session_token::generate_session_token;

/// Client metadata recorded on a new session. Informational only.
#[derive(Debug, Clone, Default)]
pub struct ClientInfo {
    pub ip_address: String,
    pub user_agent: String,
}

/// Logs principals in, verifies their session tokens, and logs them out.
///
/// One instance serves exactly one principal type and one session namespace;
/// admins and customers each get their own authenticator over their own stores.
/// Nothing is cached: every verification re-reads the session and principal.
pub struct SessionAuthenticator<P: Account> {
    principals: Arc<dyn PrincipalRepository<P>>,
    sessions: Arc<dyn SessionRepository>,
}

impl<P: Account> SessionAuthenticator<P> {
    pub fn new(
        principals: Arc<dyn PrincipalRepository<P>>,
        sessions: Arc<dyn SessionRepository>,
    ) -> Self {
        Self {
            principals,
            sessions,
        }
    }

    /// Verifies credentials and mints a fresh session.
    ///
    /// Unknown email, wrong password, and an inactive or deleted account all
    /// return the same [`AuthError::InvalidCredentials`]. An unknown email still
    /// costs one bcrypt verification.
    ///
    /// The returned principal has its password hash cleared.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] on any credential failure,
    /// [`AuthError::Store`] on persistence faults, and [`AuthError::Credential`]
    /// if the token cannot be generated.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        client: ClientInfo,
    ) -> Result<(P, Session), AuthError> {
        let Some(mut principal) = self.principals.find_by_email(email).await? else {
            verify_dummy_password(password).await;
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password(password, principal.password_hash()).await? {
            return Err(AuthError::InvalidCredentials);
        }

        if !principal.is_permitted() {
            return Err(AuthError::InvalidCredentials);
        }

        let token = generate_session_token()?;

        let session = self
            .sessions
            .create(NewSession {
                principal_id: principal.id(),
                token,
                ip_address: client.ip_address,
                user_agent: client.user_agent,
            })
            .await?;

        principal.clear_password();

        tracing::info!(principal_id = %principal.id(), session_id = %session.id, "Session created");

        Ok((principal, session))
    }

    /// Resolves a session token into its principal.
    ///
    /// An expired session is deleted on the spot (best effort). A session idle
    /// for more than fifteen minutes has its activity timestamp bumped (best
    /// effort). Neither side effect can fail the request.
    ///
    /// # Errors
    ///
    /// - [`AuthError::SessionNotFound`] - no session carries this token
    /// - [`AuthError::SessionExpired`] - `now > created_at + session_lifetime`
    /// - [`AuthError::PrincipalNotFound`] - the owning account row is gone
    /// - [`AuthError::Forbidden`] - the account is inactive or soft-deleted
    /// - [`AuthError::Store`] - persistence fault
    pub async fn verify(&self, token: &str, session_lifetime: Duration) -> Result<P, AuthError> {
        let session = self
            .sessions
            .find_by_token(token)
            .await?
            .ok_or(AuthError::SessionNotFound)?;

        let now = Utc::now();

        if session.is_expired_at(session_lifetime, now) {
            match self.sessions.delete(token).await {
                Ok(_) => tracing::debug!(session_id = %session.id, "Deleted expired session"),
                Err(e) => {
                    tracing::warn!(session_id = %session.id, error = %e, "Failed to delete expired session")
                }
            }
            return Err(AuthError::SessionExpired);
        }

        let mut principal = self
            .principals
            .find_by_id(session.principal_id)
            .await?
            .ok_or(AuthError::PrincipalNotFound)?;

        if session.needs_refresh_at(now)
            && let Err(e) = self.sessions.update_last_activity(token).await
        {
            tracing::warn!(session_id = %session.id, error = %e, "Failed to refresh session activity");
        }

        if !principal.is_permitted() {
            return Err(AuthError::Forbidden);
        }

        principal.clear_password();

        Ok(principal)
    }

    /// Deletes the session for `token`.
    ///
    /// Idempotent: returns `Ok(false)` when the session was already gone so the
    /// caller can decide whether that matters.
    pub async fn logout(&self, token: &str) -> Result<bool, AuthError> {
        let deleted = self.sessions.delete(token).await?;

        if !deleted {
            tracing::debug!("Logout for a session that no longer exists");
        }

        Ok(deleted)
    }

    /// Bumps `last_activity_at` for an existing session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::SessionNotFound`] if the token is unknown.
    pub async fn refresh(&self, token: &str) -> Result<(), AuthError> {
        if self.sessions.find_by_token(token).await?.is_none() {
            return Err(AuthError::SessionNotFound);
        }

        self.sessions.update_last_activity(token).await?;

        Ok(())
    }

    /// Invalidates every session of a principal, returning how many were removed.
    pub async fn revoke_all(&self, principal_id: Uuid) -> Result<u64, AuthError> {
        let removed = self.sessions.delete_all_for(principal_id).await?;

        tracing::info!(%principal_id, removed, "Revoked all sessions");

        Ok(removed)
    }

    /// Deletes every session whose absolute lifetime has run out.
    pub async fn purge_expired(&self, session_lifetime: Duration) -> Result<u64, AuthError> {
        let lifetime = TimeDelta::from_std(session_lifetime).unwrap_or(TimeDelta::MAX);
        let cutoff = Utc::now()
            .checked_sub_signed(lifetime)
            .unwrap_or(chrono::DateTime::<Utc>::MIN_UTC);

        Ok(self.sessions.delete_expired_before(cutoff).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Admin, AdminRole};
    use crate::domain::errors::StoreError;
    use crate::domain::repositories::MockSessionRepository;
    use crate::utils::password::hash_password_with_cost;
    use async_trait::async_trait;
    use mockall::predicate::eq;

    const LIFETIME: Duration = Duration::from_secs(3600);

    struct FixedAdmins(Vec<Admin>);

    #[async_trait]
    impl PrincipalRepository<Admin> for FixedAdmins {
        async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, StoreError> {
            Ok(self.0.iter().find(|a| a.email == email).cloned())
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<Admin>, StoreError> {
            Ok(self.0.iter().find(|a| a.id == id).cloned())
        }
    }

    async fn test_admin(is_active: bool) -> Admin {
        let now = Utc::now();
        Admin {
            id: Uuid::new_v4(),
            email: "admin@example.com".to_string(),
            password: hash_password_with_cost("password123", 4).await.unwrap(),
            name: "Admin".to_string(),
            role: AdminRole::Admin,
            is_active,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    fn session_for(admin: &Admin, age: TimeDelta, idle: TimeDelta) -> Session {
        let now = Utc::now();
        Session {
            id: Uuid::new_v4(),
            principal_id: admin.id,
            token: "tok".to_string(),
            ip_address: "127.0.0.1".to_string(),
            user_agent: "test".to_string(),
            last_activity_at: now - idle,
            created_at: now - age,
        }
    }

    fn authenticator(admins: Vec<Admin>, sessions: MockSessionRepository) -> SessionAuthenticator<Admin> {
        SessionAuthenticator::new(Arc::new(FixedAdmins(admins)), Arc::new(sessions))
    }

    #[tokio::test]
    async fn test_login_success_clears_password() {
        let admin = test_admin(true).await;
        let admin_id = admin.id;

        let mut sessions = MockSessionRepository::new();
        sessions
            .expect_create()
            .withf(move |new| new.principal_id == admin_id && new.token.len() == 43)
            .times(1)
            .returning(|new| {
                let now = Utc::now();
                Ok(Session {
                    id: Uuid::new_v4(),
                    principal_id: new.principal_id,
                    token: new.token,
                    ip_address: new.ip_address,
                    user_agent: new.user_agent,
                    last_activity_at: now,
                    created_at: now,
                })
            });

        let auth = authenticator(vec![admin], sessions);

        let (principal, session) = auth
            .login("admin@example.com", "password123", ClientInfo::default())
            .await
            .unwrap();

        assert_eq!(principal.id, admin_id);
        assert!(principal.password.is_empty());
        assert_eq!(session.principal_id, admin_id);
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_invalid_credentials() {
        let admin = test_admin(true).await;
        let mut sessions = MockSessionRepository::new();
        sessions.expect_create().never();

        let auth = authenticator(vec![admin], sessions);

        let result = auth
            .login("admin@example.com", "wrong-password", ClientInfo::default())
            .await;

        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_inactive_account_is_invalid_credentials() {
        let admin = test_admin(false).await;
        let mut sessions = MockSessionRepository::new();
        sessions.expect_create().never();

        let auth = authenticator(vec![admin], sessions);

        let result = auth
            .login("admin@example.com", "password123", ClientInfo::default())
            .await;

        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_verify_unknown_token() {
        let mut sessions = MockSessionRepository::new();
        sessions
            .expect_find_by_token()
            .with(eq("missing"))
            .times(1)
            .returning(|_| Ok(None));

        let auth = authenticator(vec![], sessions);

        let result = auth.verify("missing", LIFETIME).await;

        assert!(matches!(result, Err(AuthError::SessionNotFound)));
    }

    #[tokio::test]
    async fn test_verify_expired_deletes_session() {
        let admin = test_admin(true).await;
        let session = session_for(&admin, TimeDelta::hours(2), TimeDelta::zero());

        let mut sessions = MockSessionRepository::new();
        sessions
            .expect_find_by_token()
            .returning(move |_| Ok(Some(session.clone())));
        sessions
            .expect_delete()
            .with(eq("tok"))
            .times(1)
            .returning(|_| Ok(true));

        let auth = authenticator(vec![admin], sessions);

        let result = auth.verify("tok", LIFETIME).await;

        assert!(matches!(result, Err(AuthError::SessionExpired)));
    }

    #[tokio::test]
    async fn test_verify_expired_swallows_delete_failure() {
        let admin = test_admin(true).await;
        let session = session_for(&admin, TimeDelta::hours(2), TimeDelta::zero());

        let mut sessions = MockSessionRepository::new();
        sessions
            .expect_find_by_token()
            .returning(move |_| Ok(Some(session.clone())));
        sessions
            .expect_delete()
            .times(1)
            .returning(|_| Err(StoreError::Timeout(Duration::from_secs(2))));

        let auth = authenticator(vec![admin], sessions);

        let result = auth.verify("tok", LIFETIME).await;

        assert!(matches!(result, Err(AuthError::SessionExpired)));
    }

    #[tokio::test]
    async fn test_verify_dangling_session() {
        let admin = test_admin(true).await;
        let session = session_for(&admin, TimeDelta::minutes(1), TimeDelta::zero());

        let mut sessions = MockSessionRepository::new();
        sessions
            .expect_find_by_token()
            .returning(move |_| Ok(Some(session.clone())));

        let auth = authenticator(vec![], sessions);

        let result = auth.verify("tok", LIFETIME).await;

        assert!(matches!(result, Err(AuthError::PrincipalNotFound)));
    }

    #[tokio::test]
    async fn test_verify_refreshes_idle_session() {
        let admin = test_admin(true).await;
        let session = session_for(&admin, TimeDelta::minutes(30), TimeDelta::minutes(20));

        let mut sessions = MockSessionRepository::new();
        sessions
            .expect_find_by_token()
            .returning(move |_| Ok(Some(session.clone())));
        sessions
            .expect_update_last_activity()
            .with(eq("tok"))
            .times(1)
            .returning(|_| Ok(()));

        let auth = authenticator(vec![admin.clone()], sessions);

        let principal = auth.verify("tok", LIFETIME).await.unwrap();

        assert_eq!(principal.id, admin.id);
        assert!(principal.password.is_empty());
    }

    #[tokio::test]
    async fn test_verify_skips_refresh_for_recent_activity() {
        let admin = test_admin(true).await;
        let session = session_for(&admin, TimeDelta::minutes(30), TimeDelta::minutes(5));

        let mut sessions = MockSessionRepository::new();
        sessions
            .expect_find_by_token()
            .returning(move |_| Ok(Some(session.clone())));
        sessions.expect_update_last_activity().never();

        let auth = authenticator(vec![admin], sessions);

        assert!(auth.verify("tok", LIFETIME).await.is_ok());
    }

    #[tokio::test]
    async fn test_verify_refresh_failure_does_not_fail_request() {
        let admin = test_admin(true).await;
        let session = session_for(&admin, TimeDelta::minutes(30), TimeDelta::minutes(20));

        let mut sessions = MockSessionRepository::new();
        sessions
            .expect_find_by_token()
            .returning(move |_| Ok(Some(session.clone())));
        sessions
            .expect_update_last_activity()
            .times(1)
            .returning(|_| Err(StoreError::Timeout(Duration::from_secs(2))));

        let auth = authenticator(vec![admin], sessions);

        assert!(auth.verify("tok", LIFETIME).await.is_ok());
    }

    #[tokio::test]
    async fn test_verify_inactive_principal_is_forbidden() {
        let admin = test_admin(false).await;
        let session = session_for(&admin, TimeDelta::minutes(1), TimeDelta::zero());

        let mut sessions = MockSessionRepository::new();
        sessions
            .expect_find_by_token()
            .returning(move |_| Ok(Some(session.clone())));

        let auth = authenticator(vec![admin], sessions);

        let result = auth.verify("tok", LIFETIME).await;

        assert!(matches!(result, Err(AuthError::Forbidden)));
    }

    #[tokio::test]
    async fn test_verify_store_fault_propagates() {
        let mut sessions = MockSessionRepository::new();
        sessions
            .expect_find_by_token()
            .returning(|_| Err(StoreError::Timeout(Duration::from_secs(2))));

        let auth = authenticator(vec![], sessions);

        let result = auth.verify("tok", LIFETIME).await;

        assert!(matches!(result, Err(AuthError::Store(StoreError::Timeout(_)))));
    }

    #[tokio::test]
    async fn test_logout_reports_missing_session() {
        let mut sessions = MockSessionRepository::new();
        sessions.expect_delete().times(1).returning(|_| Ok(false));

        let auth = authenticator(vec![], sessions);

        assert!(!auth.logout("gone").await.unwrap());
    }

    #[tokio::test]
    async fn test_refresh_unknown_session() {
        let mut sessions = MockSessionRepository::new();
        sessions.expect_find_by_token().returning(|_| Ok(None));
        sessions.expect_update_last_activity().never();

        let auth = authenticator(vec![], sessions);

        assert!(matches!(
            auth.refresh("gone").await,
            Err(AuthError::SessionNotFound)
        ));
    }

    #[tokio::test]
    async fn test_purge_uses_lifetime_cutoff() {
        let mut sessions = MockSessionRepository::new();
        sessions
            .expect_delete_expired_before()
            .withf(|cutoff| {
                let expected = Utc::now() - TimeDelta::hours(1);
                (*cutoff - expected).num_seconds().abs() < 5
            })
            .times(1)
            .returning(|_| Ok(3));

        let auth = authenticator(vec![], sessions);

        assert_eq!(auth.purge_expired(LIFETIME).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_revoke_all_delegates_to_store() {
        let principal_id = Uuid::new_v4();
        let mut sessions = MockSessionRepository::new();
        sessions
            .expect_delete_all_for()
            .with(eq(principal_id))
            .times(1)
            .returning(|_| Ok(2));

        let auth = authenticator(vec![], sessions);

        assert_eq!(auth.revoke_all(principal_id).await.unwrap(), 2);
    }
}
