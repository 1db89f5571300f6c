//! Customer self-registration.

use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::{Customer, NewCustomer};
use crate::domain::repositories::CustomerRepository;
use crate::error::AppError;
use crate::utils::password::hash_password;

/// Service for creating storefront customer accounts.
pub struct CustomerService {
    repository: Arc<dyn CustomerRepository>,
}

impl CustomerService {
    pub fn new(repository: Arc<dyn CustomerRepository>) -> Self {
        Self { repository }
    }

    /// Registers a new customer.
    ///
    /// The email must not be in use by any customer row, including soft-deleted
    /// ones. The password is stored as a bcrypt hash and cleared from the
    /// returned entity.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email is taken (also when a
    /// concurrent registration wins the unique constraint).
    /// Returns [`AppError::Internal`] on database or hashing errors.
    pub async fn register(
        &self,
        email: String,
        password: &str,
        name: String,
    ) -> Result<Customer, AppError> {
        if self.repository.email_exists(&email).await? {
            return Err(AppError::conflict(
                "Email already registered",
                json!({"email": email}),
            ));
        }

        let password_hash = hash_password(password).await?;

        let mut customer = self
            .repository
            .create(NewCustomer {
                email,
                password_hash,
                name,
            })
            .await?;

        customer.password.clear();

        tracing::info!(customer_id = %customer.id, "Customer registered");

        Ok(customer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::StoreError;
    use crate::domain::repositories::MockCustomerRepository;
    use chrono::Utc;
    use mockall::predicate::eq;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_register_success() {
        let mut mock_repo = MockCustomerRepository::new();

        mock_repo
            .expect_email_exists()
            .with(eq("new@example.com"))
            .times(1)
            .returning(|_| Ok(false));

        mock_repo
            .expect_create()
            .withf(|new| new.email == "new@example.com" && new.password_hash.starts_with("$2"))
            .times(1)
            .returning(|new| {
                let now = Utc::now();
                Ok(Customer {
                    id: Uuid::new_v4(),
                    email: new.email,
                    password: new.password_hash,
                    name: new.name,
                    is_active: true,
                    created_at: now,
                    updated_at: now,
                    deleted_at: None,
                })
            });

        let service = CustomerService::new(Arc::new(mock_repo));

        let customer = service
            .register("new@example.com".to_string(), "password123", "New".to_string())
            .await
            .unwrap();

        assert_eq!(customer.email, "new@example.com");
        assert!(customer.password.is_empty());
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut mock_repo = MockCustomerRepository::new();

        mock_repo
            .expect_email_exists()
            .times(1)
            .returning(|_| Ok(true));
        mock_repo.expect_create().never();

        let service = CustomerService::new(Arc::new(mock_repo));

        let result = service
            .register("taken@example.com".to_string(), "password123", "Dup".to_string())
            .await;

        assert!(matches!(result, Err(AppError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_register_lost_race_is_conflict() {
        let mut mock_repo = MockCustomerRepository::new();

        mock_repo.expect_email_exists().returning(|_| Ok(false));
        mock_repo
            .expect_create()
            .times(1)
            .returning(|_| Err(StoreError::Conflict("customers_email_key".to_string())));

        let service = CustomerService::new(Arc::new(mock_repo));

        let result = service
            .register("race@example.com".to_string(), "password123", "Race".to_string())
            .await;

        assert!(matches!(result, Err(AppError::Conflict { .. })));
    }
}
