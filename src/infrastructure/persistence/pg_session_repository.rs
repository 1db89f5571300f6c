//! PostgreSQL implementation of the session repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use super::deadline::with_deadline;
use crate::domain::entities::{NewSession, Session};
use crate::domain::errors::StoreError;
use crate::domain::repositories::SessionRepository;
use crate::utils::db_error::map_write_error;
use crate::utils::session_token::hash_session_token;

/// Which session table a repository instance operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionNamespace {
    Admin,
    Customer,
}

impl SessionNamespace {
    fn table(self) -> &'static str {
        match self {
            Self::Admin => "admin_sessions",
            Self::Customer => "customer_sessions",
        }
    }

    fn owner_column(self) -> &'static str {
        match self {
            Self::Admin => "admin_id",
            Self::Customer => "customer_id",
        }
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    id: Uuid,
    principal_id: Uuid,
    ip_address: String,
    user_agent: String,
    last_activity_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl SessionRow {
    fn into_session(self, token: &str) -> Session {
        Session {
            id: self.id,
            principal_id: self.principal_id,
            token: token.to_owned(),
            ip_address: self.ip_address,
            user_agent: self.user_agent,
            last_activity_at: self.last_activity_at,
            created_at: self.created_at,
        }
    }
}

/// PostgreSQL repository for one session namespace.
///
/// Tokens are persisted as their SHA-256 digest; lookups hash the presented
/// token first. Every call runs under `query_timeout`.
pub struct PgSessionRepository {
    pool: Arc<PgPool>,
    namespace: SessionNamespace,
    query_timeout: Duration,
}

impl PgSessionRepository {
    pub fn new(pool: Arc<PgPool>, namespace: SessionNamespace, query_timeout: Duration) -> Self {
        Self {
            pool,
            namespace,
            query_timeout,
        }
    }

    fn returning_columns(&self) -> String {
        format!(
            "id, {} AS principal_id, ip_address, user_agent, last_activity_at, created_at",
            self.namespace.owner_column()
        )
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn create(&self, session: NewSession) -> Result<Session, StoreError> {
        let sql = format!(
            "INSERT INTO {} ({}, token_hash, ip_address, user_agent) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {}",
            self.namespace.table(),
            self.namespace.owner_column(),
            self.returning_columns()
        );

        let row = with_deadline(self.query_timeout, async {
            sqlx::query_as::<_, SessionRow>(&sql)
                .bind(session.principal_id)
                .bind(hash_session_token(&session.token))
                .bind(&session.ip_address)
                .bind(&session.user_agent)
                .fetch_one(self.pool.as_ref())
                .await
                .map_err(map_write_error)
        })
        .await?;

        Ok(row.into_session(&session.token))
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Session>, StoreError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE token_hash = $1",
            self.returning_columns(),
            self.namespace.table()
        );

        let row = with_deadline(self.query_timeout, async {
            Ok(sqlx::query_as::<_, SessionRow>(&sql)
                .bind(hash_session_token(token))
                .fetch_optional(self.pool.as_ref())
                .await?)
        })
        .await?;

        Ok(row.map(|r| r.into_session(token)))
    }

    async fn update_last_activity(&self, token: &str) -> Result<(), StoreError> {
        let sql = format!(
            "UPDATE {} SET last_activity_at = NOW() WHERE token_hash = $1",
            self.namespace.table()
        );

        with_deadline(self.query_timeout, async {
            sqlx::query(&sql)
                .bind(hash_session_token(token))
                .execute(self.pool.as_ref())
                .await?;
            Ok(())
        })
        .await
    }

    async fn delete(&self, token: &str) -> Result<bool, StoreError> {
        let sql = format!("DELETE FROM {} WHERE token_hash = $1", self.namespace.table());

        let result = with_deadline(self.query_timeout, async {
            Ok(sqlx::query(&sql)
                .bind(hash_session_token(token))
                .execute(self.pool.as_ref())
                .await?)
        })
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_all_for(&self, principal_id: Uuid) -> Result<u64, StoreError> {
        let sql = format!(
            "DELETE FROM {} WHERE {} = $1",
            self.namespace.table(),
            self.namespace.owner_column()
        );

        let result = with_deadline(self.query_timeout, async {
            Ok(sqlx::query(&sql)
                .bind(principal_id)
                .execute(self.pool.as_ref())
                .await?)
        })
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete_expired_before(&self, cutoff: DateTime<Utc>) -> Result<u64, StoreError> {
        let sql = format!("DELETE FROM {} WHERE created_at < $1", self.namespace.table());

        let result = with_deadline(self.query_timeout, async {
            Ok(sqlx::query(&sql)
                .bind(cutoff)
                .execute(self.pool.as_ref())
                .await?)
        })
        .await?;

        Ok(result.rows_affected())
    }
}
