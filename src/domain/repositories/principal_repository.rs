//! Lookup contract the session authenticator needs from an account store.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::StoreError;

/// Read access to the accounts of one principal type.
///
/// Implemented by [`crate::infrastructure::persistence::PgAdminRepository`] for
/// admins and [`crate::infrastructure::persistence::PgCustomerRepository`] for
/// customers. Lookups include inactive and soft-deleted rows; standing is
/// judged by the caller.
#[async_trait]
pub trait PrincipalRepository<P>: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<P>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<P>, StoreError>;
}
