//! Customer account entity.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

use super::account::Account;

/// A storefront customer.
#[derive(Clone, Serialize, sqlx::FromRow)]
pub struct Customer {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Customer {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn can_purchase(&self) -> bool {
        self.is_active && !self.is_deleted()
    }
}

impl Account for Customer {
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
        self.can_purchase()
    }

    fn clear_password(&mut self) {
        self.password.clear();
    }
}

impl fmt::Debug for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Customer")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .field("name", &self.name)
            .field("is_active", &self.is_active)
            .field("deleted_at", &self.deleted_at)
            .finish()
    }
}

/// Input data for registering a customer.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub email: String,
    pub password_hash: String,
    pub name: String,
}
