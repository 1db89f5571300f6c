//! PostgreSQL implementation of the admin account store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use super::deadline::with_deadline;
use crate::domain::entities::{Admin, AdminRole, NewAdmin};
use crate::domain::errors::StoreError;
use crate::domain::repositories::PrincipalRepository;
use crate::utils::db_error::map_write_error;

const ADMIN_COLUMNS: &str =
    "id, email, password, name, role, is_active, created_at, updated_at, deleted_at";

#[derive(sqlx::FromRow)]
struct AdminRow {
    id: Uuid,
    email: String,
    password: String,
    name: String,
    role: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl TryFrom<AdminRow> for Admin {
    type Error = StoreError;

    fn try_from(row: AdminRow) -> Result<Self, Self::Error> {
        let role: AdminRole = row
            .role
            .parse()
            .map_err(|e: String| StoreError::Database(sqlx::Error::Decode(e.into())))?;

        Ok(Admin {
            id: row.id,
            email: row.email,
            password: row.password,
            name: row.name,
            role,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        })
    }
}

/// PostgreSQL repository for administrator accounts.
pub struct PgAdminRepository {
    pool: Arc<PgPool>,
    query_timeout: Duration,
}

impl PgAdminRepository {
    pub fn new(pool: Arc<PgPool>, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    /// Inserts an administrator. Used by the admin CLI to bootstrap accounts.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Conflict`] if the email is already taken.
    pub async fn create(&self, admin: NewAdmin) -> Result<Admin, StoreError> {
        let sql = format!(
            "INSERT INTO admins (email, password, name, role) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {ADMIN_COLUMNS}"
        );

        let row = with_deadline(self.query_timeout, async {
            sqlx::query_as::<_, AdminRow>(&sql)
                .bind(&admin.email)
                .bind(&admin.password_hash)
                .bind(&admin.name)
                .bind(admin.role.as_str())
                .fetch_one(self.pool.as_ref())
                .await
                .map_err(map_write_error)
        })
        .await?;

        row.try_into()
    }
}

#[async_trait]
impl PrincipalRepository<Admin> for PgAdminRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, StoreError> {
        let sql = format!("SELECT {ADMIN_COLUMNS} FROM admins WHERE email = $1");

        let row = with_deadline(self.query_timeout, async {
            Ok(sqlx::query_as::<_, AdminRow>(&sql)
                .bind(email)
                .fetch_optional(self.pool.as_ref())
                .await?)
        })
        .await?;

        row.map(Admin::try_from).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Admin>, StoreError> {
        let sql = format!("SELECT {ADMIN_COLUMNS} FROM admins WHERE id = $1");

        let row = with_deadline(self.query_timeout, async {
            Ok(sqlx::query_as::<_, AdminRow>(&sql)
                .bind(id)
                .fetch_optional(self.pool.as_ref())
                .await?)
        })
        .await?;

        row.map(Admin::try_from).transpose()
    }
}
