//! Administrator account entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::account::Account;

/// Role granted to an administrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    SuperAdmin,
    Admin,
    Cashier,
}

impl AdminRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::Admin => "admin",
            Self::Cashier => "cashier",
        }
    }
}

impl fmt::Display for AdminRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AdminRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super_admin" => Ok(Self::SuperAdmin),
            "admin" => Ok(Self::Admin),
            "cashier" => Ok(Self::Cashier),
            other => Err(format!("unknown admin role '{other}'")),
        }
    }
}

/// An administrator of the back office.
///
/// The password hash is skipped during serialization and redacted from `Debug`
/// output, so an `Admin` can be returned from handlers and logged freely.
#[derive(Clone, Serialize)]
pub struct Admin {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub name: String,
    pub role: AdminRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Admin {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Whether this administrator may use the admin panel at all.
    pub fn can_access_admin_panel(&self) -> bool {
        self.is_active && !self.is_deleted()
    }
}

impl Account for Admin {
    fn id(&self) -> Uuid {
        self.id
    }

    fn email(&self) -> &str {
        &self.email
    }

    fn password_hash(&self) -> &str {
        &self.password
    }

    fn is_permitted(&self) -> bool {
        self.can_access_admin_panel()
    }

    fn clear_password(&mut self) {
        self.password.clear();
    }
}

impl fmt::Debug for Admin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Admin")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .field("name", &self.name)
            .field("role", &self.role)
            .field("is_active", &self.is_active)
            .field("deleted_at", &self.deleted_at)
            .finish()
    }
}

/// Input data for creating an administrator.
#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: AdminRole,
}
