//! Infrastructure services

mod model_configuration_service;

pub use model_configuration_service::ModelConfigurationService;
