//! Server-side session record.

use chrono::{DateTime, TimeDelta, Utc};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// Inactivity gap after which a verified request bumps `last_activity_at`.
pub const REFRESH_AFTER: TimeDelta = TimeDelta::minutes(15);

/// A session binding a secret token to one principal.
///
/// The token is the sole credential. It is redacted from `Debug` output and the
/// type deliberately does not implement `Serialize`.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub id: Uuid,
    pub principal_id: Uuid,
    pub token: String,
    pub ip_address: String,
    pub user_agent: String,
    pub last_activity_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Absolute expiry instant: `created_at + lifetime`.
    pub fn expires_at(&self, lifetime: Duration) -> DateTime<Utc> {
        let lifetime = TimeDelta::from_std(lifetime).unwrap_or(TimeDelta::MAX);
        self.created_at
            .checked_add_signed(lifetime)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    pub fn is_expired_at(&self, lifetime: Duration, now: DateTime<Utc>) -> bool {
        now > self.expires_at(lifetime)
    }

    pub fn needs_refresh_at(&self, now: DateTime<Utc>) -> bool {
        now - self.last_activity_at > REFRESH_AFTER
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("principal_id", &self.principal_id)
            .field("token", &"[redacted]")
            .field("ip_address", &self.ip_address)
            .field("user_agent", &self.user_agent)
            .field("last_activity_at", &self.last_activity_at)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Input for minting a session row.
#[derive(Clone)]
pub struct NewSession {
    pub principal_id: Uuid,
    pub token: String,
    pub ip_address: String,
    pub user_agent: String,
}

impl fmt::Debug for NewSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewSession")
            .field("principal_id", &self.principal_id)
            .field("token", &"[redacted]")
            .field("ip_address", &self.ip_address)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
