//! Storage infrastructure - Repository implementations

mod factory;
mod in_memory;
mod postgres;

pub use factory::{StorageConfig, StorageFactory, StorageType};
pub use in_memory::InMemoryModelConfigurationRepository;
pub use postgres::{PostgresConfig, PostgresModelConfigurationRepository, DEFAULT_TABLE_NAME};
