//! Application state shared with handlers

use std::sync::Arc;

use crate::infrastructure::services::ModelConfigurationService;

/// Handles injected into every request via axum `State`
#[derive(Debug, Clone)]
pub struct AppState {
    pub model_configuration_service: Arc<ModelConfigurationService>,
}

impl AppState {
    pub fn new(model_configuration_service: Arc<ModelConfigurationService>) -> Self {
        Self {
            model_configuration_service,
        }
    }
}
