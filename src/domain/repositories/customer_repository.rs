//! Repository trait for customer registration.

use async_trait::async_trait;

use crate::domain::entities::{Customer, NewCustomer};
use crate::domain::errors::StoreError;

/// Write access to the customer store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Creates a customer.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Conflict`] if the email is already registered.
    async fn create(&self, customer: NewCustomer) -> Result<Customer, StoreError>;

    /// Returns whether any customer row (deleted or not) uses this email.
    async fn email_exists(&self, email: &str) -> Result<bool, StoreError>;
}
