//! In-memory model configuration repository

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{
    DomainError, ModelConfiguration, ModelConfigurationId, ModelConfigurationRepository,
    NewModelConfiguration,
};

#[derive(Debug)]
struct Records {
    by_id: BTreeMap<ModelConfigurationId, ModelConfiguration>,
    last_id: ModelConfigurationId,
}

/// Thread-safe in-memory repository
///
/// Useful for testing and development. Data is lost when the process terminates.
/// Ids are handed out sequentially and never reused, even after a delete.
#[derive(Debug)]
pub struct InMemoryModelConfigurationRepository {
    records: RwLock<Records>,
}

impl Default for InMemoryModelConfigurationRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryModelConfigurationRepository {
    /// Creates a new empty repository
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Records {
                by_id: BTreeMap::new(),
                last_id: 0,
            }),
        }
    }
}

#[async_trait]
impl ModelConfigurationRepository for InMemoryModelConfigurationRepository {
    async fn ensure_schema(&self) -> Result<(), DomainError> {
        Ok(())
    }

    async fn insert(&self, new: NewModelConfiguration) -> Result<ModelConfiguration, DomainError> {
        let mut records = self.records.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let id = records
            .last_id
            .checked_add(1)
            .ok_or_else(|| DomainError::storage("Model configuration id space exhausted"))?;
        let record = new.into_record(id, Utc::now());

        records.last_id = id;
        records.by_id.insert(id, record.clone());

        Ok(record)
    }

    async fn get(
        &self,
        id: ModelConfigurationId,
    ) -> Result<Option<ModelConfiguration>, DomainError> {
        let records = self.records.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(records.by_id.get(&id).cloned())
    }

    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<ModelConfiguration>, DomainError> {
        let records = self.records.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);

        Ok(records
            .by_id
            .values()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        record: &ModelConfiguration,
    ) -> Result<Option<ModelConfiguration>, DomainError> {
        let mut records = self.records.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        match records.by_id.get_mut(&record.id) {
            Some(stored) => {
                // created_at is owned by the store
                let created_at = stored.created_at;
                *stored = record.clone();
                stored.created_at = created_at;
                Ok(Some(stored.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: ModelConfigurationId) -> Result<bool, DomainError> {
        let mut records = self.records.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        Ok(records.by_id.remove(&id).is_some())
    }
}
