//! Domain layer - Model configuration entity, request shapes and persistence contract

pub mod error;
pub mod model;

pub use error::DomainError;
pub use model::{
    validate_request, CreateModelConfiguration, FieldViolation, ModelConfiguration,
    ModelConfigurationId, ModelConfigurationRepository, NewModelConfiguration,
    UpdateModelConfiguration,
};
