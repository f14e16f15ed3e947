//! Request and response types shared by the HTTP handlers

pub mod error;
pub mod json;
pub mod llm_model;
pub mod params;

pub use error::{ApiError, ApiErrorResponse, ErrorDetail, FieldError, InputLocation};
pub use json::Json;
pub use llm_model::LlmModelResponse;
pub use params::{ModelId, Pagination};
