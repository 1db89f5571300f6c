//! PostgreSQL implementation of the customer account store.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use super::deadline::with_deadline;
use crate::domain::entities::{Customer, NewCustomer};
use crate::domain::errors::StoreError;
use crate::domain::repositories::{CustomerRepository, PrincipalRepository};
use crate::utils::db_error::map_write_error;

const CUSTOMER_COLUMNS: &str =
    "id, email, password, name, is_active, created_at, updated_at, deleted_at";

/// PostgreSQL repository for storefront customers.
pub struct PgCustomerRepository {
    pool: Arc<PgPool>,
    query_timeout: Duration,
}

impl PgCustomerRepository {
    pub fn new(pool: Arc<PgPool>, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }
}

#[async_trait]
impl PrincipalRepository<Customer> for PgCustomerRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, StoreError> {
        let sql = format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE email = $1");

        with_deadline(self.query_timeout, async {
            Ok(sqlx::query_as::<_, Customer>(&sql)
                .bind(email)
                .fetch_optional(self.pool.as_ref())
                .await?)
        })
        .await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, StoreError> {
        let sql = format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = $1");

        with_deadline(self.query_timeout, async {
            Ok(sqlx::query_as::<_, Customer>(&sql)
                .bind(id)
                .fetch_optional(self.pool.as_ref())
                .await?)
        })
        .await
    }
}

#[async_trait]
impl CustomerRepository for PgCustomerRepository {
    async fn create(&self, customer: NewCustomer) -> Result<Customer, StoreError> {
        let sql = format!(
            "INSERT INTO customers (email, password, name) \
             VALUES ($1, $2, $3) \
             RETURNING {CUSTOMER_COLUMNS}"
        );

        with_deadline(self.query_timeout, async {
            sqlx::query_as::<_, Customer>(&sql)
                .bind(&customer.email)
                .bind(&customer.password_hash)
                .bind(&customer.name)
                .fetch_one(self.pool.as_ref())
                .await
                .map_err(map_write_error)
        })
        .await
    }

    async fn email_exists(&self, email: &str) -> Result<bool, StoreError> {
        with_deadline(self.query_timeout, async {
            Ok(
                sqlx::query_scalar::<_, bool>(
                    "SELECT EXISTS (SELECT 1 FROM customers WHERE email = $1)",
                )
                .bind(email)
                .fetch_one(self.pool.as_ref())
                .await?,
            )
        })
        .await
    }
}
