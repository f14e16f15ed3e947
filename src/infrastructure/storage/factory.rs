//! Storage factory for runtime backend selection

use std::sync::Arc;

use tracing::info;

use crate::domain::{DomainError, ModelConfigurationRepository};

use super::in_memory::InMemoryModelConfigurationRepository;
use super::postgres::{PostgresConfig, PostgresModelConfigurationRepository, DEFAULT_TABLE_NAME};

/// Supported storage types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    InMemory,
    /// PostgreSQL storage
    Postgres,
}

impl StorageType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Some(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Some(Self::Postgres),
            _ => None,
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// In-memory storage configuration
    InMemory,
    /// PostgreSQL storage configuration
    Postgres(PostgresConfig),
}

impl StorageConfig {
    /// Creates an in-memory storage configuration
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Creates a PostgreSQL storage configuration
    pub fn postgres(config: PostgresConfig) -> Self {
        Self::Postgres(config)
    }

    /// Returns the storage type
    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::InMemory => StorageType::InMemory,
            Self::Postgres(_) => StorageType::Postgres,
        }
    }
}

/// Factory for creating repository instances
#[derive(Debug)]
pub struct StorageFactory;

impl StorageFactory {
    /// Creates a repository for the configured backend and makes sure its schema exists
    pub async fn create(
        config: &StorageConfig,
    ) -> Result<Arc<dyn ModelConfigurationRepository>, DomainError> {
        let repository: Arc<dyn ModelConfigurationRepository> = match config {
            StorageConfig::InMemory => {
                info!("Using in-memory storage for model configurations");
                Arc::new(InMemoryModelConfigurationRepository::new())
            }
            StorageConfig::Postgres(pg_config) => {
                info!("Connecting to PostgreSQL...");
                let repository =
                    PostgresModelConfigurationRepository::connect(pg_config, DEFAULT_TABLE_NAME)
                        .await?;
                info!("PostgreSQL connection established");
                Arc::new(repository)
            }
        };

        repository.ensure_schema().await?;
        Ok(repository)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CreateModelConfiguration;

    #[test]
    fn test_storage_type_from_str() {
        assert_eq!(StorageType::from_str("memory"), Some(StorageType::InMemory));
        assert_eq!(StorageType::from_str("In-Memory"), Some(StorageType::InMemory));
        assert_eq!(StorageType::from_str("postgres"), Some(StorageType::Postgres));
        assert_eq!(StorageType::from_str("postgresql"), Some(StorageType::Postgres));
        assert_eq!(StorageType::from_str("pg"), Some(StorageType::Postgres));
        assert_eq!(StorageType::from_str("sqlite"), None);
    }

    #[test]
    fn test_storage_config_types() {
        assert_eq!(StorageConfig::in_memory().storage_type(), StorageType::InMemory);

        let postgres = StorageConfig::postgres(PostgresConfig::new("postgres://localhost/test"));
        assert_eq!(postgres.storage_type(), StorageType::Postgres);
    }

    #[tokio::test]
    async fn test_create_in_memory_repository() {
        let repository = StorageFactory::create(&StorageConfig::in_memory())
            .await
            .unwrap();

        let stored = repository
            .insert(CreateModelConfiguration::new("gpt", "openai", "gpt-4").into())
            .await
            .unwrap();

        assert_eq!(stored.id, 1);
    }
}
