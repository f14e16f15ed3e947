//! Model configuration service - CRUD operations over the repository

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{
    validate_request, CreateModelConfiguration, DomainError, ModelConfiguration,
    ModelConfigurationId, ModelConfigurationRepository, UpdateModelConfiguration,
};

/// Record store for model configurations
#[derive(Debug, Clone)]
pub struct ModelConfigurationService {
    repository: Arc<dyn ModelConfigurationRepository>,
}

impl ModelConfigurationService {
    /// Create a new service over the given repository
    pub fn new(repository: Arc<dyn ModelConfigurationRepository>) -> Self {
        Self { repository }
    }

    /// Store a new model configuration
    pub async fn create(
        &self,
        request: CreateModelConfiguration,
    ) -> Result<ModelConfiguration, DomainError> {
        validate_request(&request)?;

        let record = self.repository.insert(request.into()).await?;
        info!(id = record.id, name = %record.name, "Model configuration created");

        Ok(record)
    }

    /// Get a model configuration by id
    pub async fn get(
        &self,
        id: ModelConfigurationId,
    ) -> Result<Option<ModelConfiguration>, DomainError> {
        self.repository.get(id).await
    }

    /// List model configurations in id order
    pub async fn list(
        &self,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<ModelConfiguration>, DomainError> {
        self.repository.list(offset, limit).await
    }

    /// Apply a partial update. Returns `None` when the id does not exist.
    pub async fn update(
        &self,
        id: ModelConfigurationId,
        request: UpdateModelConfiguration,
    ) -> Result<Option<ModelConfiguration>, DomainError> {
        validate_request(&request)?;

        let Some(mut record) = self.repository.get(id).await? else {
            debug!(id, "Model configuration not found for update");
            return Ok(None);
        };

        record.apply(request);
        record.touch();

        let updated = self.repository.update(&record).await?;

        if updated.is_some() {
            info!(id, "Model configuration updated");
        }

        Ok(updated)
    }

    /// Delete a model configuration, returns true if it existed
    pub async fn delete(&self, id: ModelConfigurationId) -> Result<bool, DomainError> {
        let deleted = self.repository.delete(id).await?;

        if deleted {
            info!(id, "Model configuration deleted");
        } else {
            debug!(id, "Model configuration not found for delete");
        }

        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::MockModelConfigurationRepository;
    use crate::infrastructure::storage::InMemoryModelConfigurationRepository;

    fn create_service() -> ModelConfigurationService {
        ModelConfigurationService::new(Arc::new(InMemoryModelConfigurationRepository::new()))
    }

    fn create_request(name: &str) -> CreateModelConfiguration {
        CreateModelConfiguration::new(name, "openai", "gpt-4")
            .with_api_key("sk-test")
            .with_description("A test model")
    }

    #[tokio::test]
    async fn test_create_and_get_round_trip() {
        let service = create_service();
        let request = create_request("gpt").with_temperature("0.2").with_max_tokens(2048);

        let created = service.create(request.clone()).await.unwrap();
        let fetched = service.get(created.id).await.unwrap().unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.name, request.name);
        assert_eq!(fetched.model_type, request.model_type);
        assert_eq!(fetched.model_name, request.model_name);
        assert_eq!(fetched.api_key, request.api_key);
        assert_eq!(fetched.temperature, "0.2");
        assert_eq!(fetched.max_tokens, 2048);
        assert_eq!(fetched.description, request.description);
        assert!(fetched.is_active);
        assert!(fetched.updated_at.is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input() {
        let service = create_service();

        for request in [
            create_request("gpt").with_max_tokens(0),
            create_request("gpt").with_max_tokens(4001),
            create_request(""),
        ] {
            let result = service.create(request).await;
            assert!(matches!(result, Err(DomainError::Validation { .. })));
        }

        assert!(service.list(0, 100).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_accepts_token_bounds() {
        let service = create_service();

        assert!(service.create(create_request("low").with_max_tokens(1)).await.is_ok());
        assert!(service.create(create_request("high").with_max_tokens(4000)).await.is_ok());
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let service = create_service();
        assert!(service.get(404).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_keeps_omitted_fields() {
        let service = create_service();
        let created = service.create(create_request("gpt")).await.unwrap();

        let updated = service
            .update(
                created.id,
                UpdateModelConfiguration {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert!(!updated.is_active);
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.model_type, created.model_type);
        assert_eq!(updated.model_name, created.model_name);
        assert_eq!(updated.api_key, created.api_key);
        assert_eq!(updated.temperature, created.temperature);
        assert_eq!(updated.max_tokens, created.max_tokens);
        assert_eq!(updated.description, created.description);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_update_refreshes_updated_at() {
        let service = create_service();
        let created = service.create(create_request("gpt")).await.unwrap();

        let first = service
            .update(created.id, UpdateModelConfiguration::default())
            .await
            .unwrap()
            .unwrap();
        let second = service
            .update(
                created.id,
                UpdateModelConfiguration {
                    name: Some("renamed".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert!(first.updated_at.is_some());
        assert!(second.updated_at >= first.updated_at);
        assert_eq!(second.name, "renamed");
        assert_eq!(second.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_present_field() {
        let service = create_service();
        let created = service.create(create_request("gpt")).await.unwrap();

        let result = service
            .update(
                created.id,
                UpdateModelConfiguration {
                    max_tokens: Some(5000),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
        let unchanged = service.get(created.id).await.unwrap().unwrap();
        assert_eq!(unchanged.max_tokens, created.max_tokens);
        assert!(unchanged.updated_at.is_none());
    }

    #[tokio::test]
    async fn test_update_not_found() {
        let service = create_service();

        let result = service
            .update(
                7,
                UpdateModelConfiguration {
                    name: Some("Updated".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(result.is_none());
        assert!(service.list(0, 100).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete() {
        let service = create_service();
        let created = service.create(create_request("gpt")).await.unwrap();

        assert!(service.delete(created.id).await.unwrap());
        assert!(service.get(created.id).await.unwrap().is_none());
        assert!(!service.delete(created.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_pagination_bounds() {
        let service = create_service();

        for i in 0..7 {
            service.create(create_request(&format!("model-{}", i))).await.unwrap();
        }

        let all = service.list(0, 100).await.unwrap();
        assert_eq!(all.len(), 7);

        for (offset, limit) in [(0, 3), (2, 3), (5, 3), (7, 3), (3, 0)] {
            let page = service.list(offset, limit).await.unwrap();
            let expected: Vec<_> = all
                .iter()
                .skip(offset as usize)
                .take(limit as usize)
                .cloned()
                .collect();

            assert!(page.len() <= limit as usize);
            assert_eq!(page, expected);
        }
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let mut repository = MockModelConfigurationRepository::new();
        repository
            .expect_insert()
            .returning(|_| Err(DomainError::storage("connection lost")));
        repository
            .expect_get()
            .returning(|_| Err(DomainError::storage("connection lost")));

        let service = ModelConfigurationService::new(Arc::new(repository));

        let created = service.create(create_request("gpt")).await;
        assert!(matches!(created, Err(DomainError::Storage { .. })));

        let updated = service
            .update(1, UpdateModelConfiguration::default())
            .await;
        assert!(matches!(updated, Err(DomainError::Storage { .. })));
    }

    #[tokio::test]
    async fn test_update_skips_write_when_missing() {
        let mut repository = MockModelConfigurationRepository::new();
        repository.expect_get().times(1).returning(|_| Ok(None));
        repository.expect_update().never();

        let service = ModelConfigurationService::new(Arc::new(repository));

        let result = service
            .update(3, UpdateModelConfiguration::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }
}
