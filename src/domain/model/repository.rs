//! Model configuration repository trait

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::{ModelConfiguration, ModelConfigurationId, NewModelConfiguration};
use crate::domain::DomainError;

/// Persistence for model configurations.
///
/// Every method is a single atomic storage operation. Not-found outcomes are
/// reported as `None`/`false`, never as errors.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ModelConfigurationRepository: Send + Sync + std::fmt::Debug {
    /// Create the backing structure if it does not exist yet
    async fn ensure_schema(&self) -> Result<(), DomainError>;

    /// Store a new record, assigning its id and creation time
    async fn insert(&self, new: NewModelConfiguration) -> Result<ModelConfiguration, DomainError>;

    /// Get a record by id
    async fn get(&self, id: ModelConfigurationId)
        -> Result<Option<ModelConfiguration>, DomainError>;

    /// List records in ascending id order, skipping `offset` and returning at most `limit`
    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<ModelConfiguration>, DomainError>;

    /// Overwrite a stored record. Returns `None` if it no longer exists.
    async fn update(
        &self,
        record: &ModelConfiguration,
    ) -> Result<Option<ModelConfiguration>, DomainError>;

    /// Delete a record by id, returns true if deleted
    async fn delete(&self, id: ModelConfigurationId) -> Result<bool, DomainError>;
}
