//! LLM Model Registry
//!
//! HTTP service for registering the configuration of large-language-model
//! endpoints (provider, model name, credential, sampling settings) and
//! managing them through a CRUD API under `/api/llm-models`.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use infrastructure::services::ModelConfigurationService;
use infrastructure::storage::StorageFactory;
use tracing::info;

/// Create the application state for the configured storage backend
///
/// Connects to storage and creates the table and indexes if they are missing.
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let storage_config = config.storage.storage_config();
    info!("Storage backend: {:?}", storage_config.storage_type());

    let repository = StorageFactory::create(&storage_config).await?;
    let service = ModelConfigurationService::new(repository);

    Ok(AppState::new(Arc::new(service)))
}
