//! Error envelope returned by every endpoint: `{"detail": ...}`

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::{DomainError, FieldViolation};

/// Detail returned when a model configuration id has no matching record
pub const NOT_FOUND_DETAIL: &str = "LLM Model não encontrado.";

/// Detail returned for storage and other unexpected failures
pub const INTERNAL_ERROR_DETAIL: &str = "Internal Server Error";

/// Where an invalid input came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputLocation {
    Body,
    Query,
    Path,
}

impl InputLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::Query => "query",
            Self::Path => "path",
        }
    }
}

/// One invalid input, e.g. `{"loc": ["body", "name"], "msg": "...", "type": "missing"}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub error_type: String,
}

impl FieldError {
    pub fn new(
        location: InputLocation,
        field: Option<&str>,
        msg: impl Into<String>,
        error_type: impl Into<String>,
    ) -> Self {
        let mut loc = vec![location.as_str().to_string()];

        if let Some(field) = field {
            loc.push(field.to_string());
        }

        Self {
            loc,
            msg: msg.into(),
            error_type: error_type.into(),
        }
    }
}

/// Either a human-readable message or a list of field errors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    Fields(Vec<FieldError>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub detail: ErrorDetail,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    /// Create an error carrying a plain message
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                detail: ErrorDetail::Message(message.into()),
            },
        }
    }

    /// Create an error listing invalid inputs
    pub fn fields(status: StatusCode, errors: Vec<FieldError>) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                detail: ErrorDetail::Fields(errors),
            },
        }
    }

    /// Record not found
    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, NOT_FOUND_DETAIL)
    }

    /// Invalid input (422)
    pub fn unprocessable(errors: Vec<FieldError>) -> Self {
        Self::fields(StatusCode::UNPROCESSABLE_ENTITY, errors)
    }

    /// Internal server error
    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_DETAIL)
    }
}

fn violation_to_field_error(violation: &FieldViolation) -> FieldError {
    FieldError::new(
        InputLocation::Body,
        Some(&violation.field),
        &violation.message,
        &violation.kind,
    )
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

/// Validation failures are attributed to the request body
impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation { violations, .. } => {
                Self::unprocessable(violations.iter().map(violation_to_field_error).collect())
            }
            DomainError::Storage { message } => {
                error!(error = %message, "Request failed");
                Self::internal()
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.response.detail {
            ErrorDetail::Message(message) => write!(f, "{}: {}", self.status, message),
            ErrorDetail::Fields(errors) => write!(
                f,
                "{}: {}",
                self.status,
                errors
                    .iter()
                    .map(|e| format!("{} ({})", e.msg, e.loc.join(".")))
                    .collect::<Vec<_>>()
                    .join("; ")
            ),
        }
    }
}

impl std::error::Error for ApiError {}
