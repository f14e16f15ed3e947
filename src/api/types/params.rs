//! Path and query extractors for the llm-models endpoints

use axum::{
    extract::{FromRequestParts, Path, Query},
    http::request::Parts,
};
use serde::Deserialize;

use super::error::{ApiError, FieldError, InputLocation};
use crate::domain::ModelConfigurationId;

/// Offset used when `page` is omitted
pub const DEFAULT_PAGE: u64 = 0;

/// Limit used when `size` is omitted
pub const DEFAULT_SIZE: u64 = 100;

const INT_PARSING_MESSAGE: &str = "Input should be a valid integer, unable to parse string as an integer";

/// Model configuration id taken from the `{model_id}` path segment
///
/// Integers outside the id range cannot match a record and are reported as
/// not found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelId(pub ModelConfigurationId);

impl<S> FromRequestParts<S> for ModelId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                ApiError::fields(
                    rejection.status(),
                    vec![FieldError::new(
                        InputLocation::Path,
                        Some("model_id"),
                        rejection.body_text(),
                        "value_error",
                    )],
                )
            })?;

        let value = raw.trim().parse::<i64>().map_err(|_| {
            ApiError::unprocessable(vec![FieldError::new(
                InputLocation::Path,
                Some("model_id"),
                INT_PARSING_MESSAGE,
                "int_parsing",
            )])
        })?;

        ModelConfigurationId::try_from(value)
            .map(ModelId)
            .map_err(|_| ApiError::not_found())
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawPagination {
    page: Option<String>,
    size: Option<String>,
}

/// `?page=<offset>&size=<limit>` query parameters
///
/// `page` is the number of records to skip, not a page index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: DEFAULT_PAGE,
            limit: DEFAULT_SIZE,
        }
    }
}

impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(raw) = Query::<RawPagination>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                ApiError::unprocessable(vec![FieldError::new(
                    InputLocation::Query,
                    None,
                    rejection.body_text(),
                    "value_error",
                )])
            })?;

        let mut errors = Vec::new();
        let offset = parse_non_negative("page", raw.page.as_deref(), DEFAULT_PAGE, &mut errors);
        let limit = parse_non_negative("size", raw.size.as_deref(), DEFAULT_SIZE, &mut errors);

        if !errors.is_empty() {
            return Err(ApiError::unprocessable(errors));
        }

        Ok(Self { offset, limit })
    }
}

fn parse_non_negative(
    name: &str,
    raw: Option<&str>,
    default: u64,
    errors: &mut Vec<FieldError>,
) -> u64 {
    let Some(raw) = raw else {
        return default;
    };

    match raw.trim().parse::<i64>() {
        Ok(value) if value >= 0 => value as u64,
        Ok(_) => {
            errors.push(FieldError::new(
                InputLocation::Query,
                Some(name),
                "Input should be greater than or equal to 0",
                "greater_than_equal",
            ));
            default
        }
        Err(_) => {
            errors.push(FieldError::new(
                InputLocation::Query,
                Some(name),
                INT_PARSING_MESSAGE,
                "int_parsing",
            ));
            default
        }
    }
}
