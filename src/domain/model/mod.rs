mod entity;
mod repository;
mod validation;

pub use entity::{
    ModelConfiguration, ModelConfigurationId, NewModelConfiguration, DEFAULT_MAX_TOKENS,
    DEFAULT_TEMPERATURE,
};
#[cfg(test)]
pub use repository::MockModelConfigurationRepository;
pub use repository::ModelConfigurationRepository;
pub use validation::{
    validate_request, CreateModelConfiguration, FieldViolation, UpdateModelConfiguration,
};
