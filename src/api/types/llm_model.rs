//! Response shape for model configuration endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{ModelConfiguration, ModelConfigurationId};

/// Model configuration as returned by the API
///
/// Optional fields are always present and serialize as `null` when unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmModelResponse {
    pub id: ModelConfigurationId,
    pub name: String,
    pub model_type: String,
    pub model_name: String,
    pub api_key: Option<String>,
    pub temperature: String,
    pub max_tokens: i32,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<ModelConfiguration> for LlmModelResponse {
    fn from(record: ModelConfiguration) -> Self {
        Self {
            id: record.id,
            name: record.name,
            model_type: record.model_type,
            model_name: record.model_name,
            api_key: record.api_key,
            temperature: record.temperature,
            max_tokens: record.max_tokens,
            description: record.description,
            is_active: record.is_active,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
