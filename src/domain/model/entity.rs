//! Model configuration entity

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{CreateModelConfiguration, UpdateModelConfiguration};

/// Identifier assigned by the store on insert
pub type ModelConfigurationId = i32;

/// Temperature applied when a create request omits it
pub const DEFAULT_TEMPERATURE: &str = "0.7";

/// Token limit applied when a create request omits it
pub const DEFAULT_MAX_TOKENS: i32 = 1000;

/// A persisted language model configuration
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfiguration {
    pub id: ModelConfigurationId,
    pub name: String,
    /// Provider family, e.g. "openai"
    pub model_type: String,
    /// Provider-specific model identifier, e.g. "gpt-4"
    pub model_name: String,
    /// Stored as given, without encryption
    pub api_key: Option<String>,
    /// Kept as text for compatibility with existing clients
    pub temperature: String,
    pub max_tokens: i32,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    /// Absent until the first update
    pub updated_at: Option<DateTime<Utc>>,
}

impl ModelConfiguration {
    /// Overwrite the fields present in `changes`, leaving the rest untouched.
    ///
    /// Does not stamp `updated_at`; see [`ModelConfiguration::touch`].
    pub fn apply(&mut self, changes: UpdateModelConfiguration) {
        let UpdateModelConfiguration {
            name,
            model_type,
            model_name,
            api_key,
            temperature,
            max_tokens,
            description,
            is_active,
        } = changes;

        if let Some(name) = name {
            self.name = name;
        }

        if let Some(model_type) = model_type {
            self.model_type = model_type;
        }

        if let Some(model_name) = model_name {
            self.model_name = model_name;
        }

        if let Some(api_key) = api_key {
            self.api_key = api_key;
        }

        if let Some(temperature) = temperature {
            self.temperature = temperature;
        }

        if let Some(max_tokens) = max_tokens {
            self.max_tokens = max_tokens;
        }

        if let Some(description) = description {
            self.description = description;
        }

        if let Some(is_active) = is_active {
            self.is_active = is_active;
        }
    }

    /// Mark the record as modified now
    pub fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}

impl fmt::Debug for ModelConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelConfiguration")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("model_type", &self.model_type)
            .field("model_name", &self.model_name)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("description", &self.description)
            .field("is_active", &self.is_active)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// Field values for a record that has not been stored yet
#[derive(Clone, PartialEq)]
pub struct NewModelConfiguration {
    pub name: String,
    pub model_type: String,
    pub model_name: String,
    pub api_key: Option<String>,
    pub temperature: String,
    pub max_tokens: i32,
    pub description: Option<String>,
    pub is_active: bool,
}

impl NewModelConfiguration {
    /// Materialize as a stored record with the given id and creation time
    pub fn into_record(
        self,
        id: ModelConfigurationId,
        created_at: DateTime<Utc>,
    ) -> ModelConfiguration {
        ModelConfiguration {
            id,
            name: self.name,
            model_type: self.model_type,
            model_name: self.model_name,
            api_key: self.api_key,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            description: self.description,
            is_active: self.is_active,
            created_at,
            updated_at: None,
        }
    }
}

impl From<CreateModelConfiguration> for NewModelConfiguration {
    fn from(request: CreateModelConfiguration) -> Self {
        Self {
            name: request.name,
            model_type: request.model_type,
            model_name: request.model_name,
            api_key: request.api_key,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            description: request.description,
            is_active: request.is_active,
        }
    }
}

impl fmt::Debug for NewModelConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewModelConfiguration")
            .field("name", &self.name)
            .field("model_type", &self.model_type)
            .field("model_name", &self.model_name)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("description", &self.description)
            .field("is_active", &self.is_active)
            .finish()
    }
}
