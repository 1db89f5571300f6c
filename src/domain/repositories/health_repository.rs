//! Liveness probe for the backing store.

use async_trait::async_trait;

use crate::domain::errors::StoreError;

#[async_trait]
pub trait HealthRepository: Send + Sync {
    /// Round-trips a trivial query to the store.
    async fn ping(&self) -> Result<(), StoreError>;
}
