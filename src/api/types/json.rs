//! JSON extractor whose rejections use the `{"detail": [...]}` envelope

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    response::{IntoResponse, Response},
    Json as AxumJson,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;

use super::error::{ApiError, FieldError, InputLocation};

static MISSING_FIELD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"missing field `([^`]+)`").unwrap());

static FIELD_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z_][\w.\[\]]*): (.+)$").unwrap());

static EXPECTED: Lazy<Regex> = Lazy::new(|| Regex::new(r", expected (.+)$").unwrap());

static POSITION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" at line \d+ column \d+$").unwrap());

const DATA_ERROR_PREFIX: &str = "Failed to deserialize the JSON body into the target type: ";

/// JSON extractor and response wrapper
///
/// Deserialization failures are reported per field with `loc: ["body", <field>]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match AxumJson::<T>::from_request(req, state).await {
            Ok(AxumJson(value)) => Ok(Json(value)),
            Err(rejection) => Err(rejection_to_error(&rejection)),
        }
    }
}

fn rejection_to_error(rejection: &JsonRejection) -> ApiError {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => data_error(&err.body_text()),
        JsonRejection::JsonSyntaxError(_) => FieldError::new(
            InputLocation::Body,
            None,
            "JSON decode error",
            "json_invalid",
        ),
        JsonRejection::MissingJsonContentType(_) => {
            // Reported with axum's status (415)
            return ApiError::fields(
                rejection.status(),
                vec![FieldError::new(
                    InputLocation::Body,
                    None,
                    "Expected request with `Content-Type: application/json`",
                    "content_type",
                )],
            );
        }
        other => {
            return ApiError::fields(
                other.status(),
                vec![FieldError::new(
                    InputLocation::Body,
                    None,
                    other.body_text(),
                    "value_error",
                )],
            );
        }
    };

    ApiError::unprocessable(vec![error])
}

/// Turn a serde data error into a field error
fn data_error(body_text: &str) -> FieldError {
    let text = body_text.strip_prefix(DATA_ERROR_PREFIX).unwrap_or(body_text);
    let text = POSITION.replace(text, "");

    if let Some(caps) = MISSING_FIELD.captures(&text) {
        return FieldError::new(InputLocation::Body, Some(&caps[1]), "Field required", "missing");
    }

    let (field, message) = match FIELD_PATH.captures(&text) {
        Some(caps) => (Some(caps[1].to_string()), caps[2].to_string()),
        None => (None, text.to_string()),
    };

    let (msg, error_type) = describe(&message);

    FieldError::new(InputLocation::Body, field.as_deref(), msg, error_type)
}

/// Describe a serde message by the expected input kind, without Rust type names
fn describe(message: &str) -> (&'static str, &'static str) {
    let expected = EXPECTED
        .captures(message)
        .map(|caps| caps[1].to_string())
        .unwrap_or_default();

    match expected.as_str() {
        "i8" | "i16" | "i32" | "i64" | "u8" | "u16" | "u32" | "u64" => {
            ("Input should be a valid integer", "int_type")
        }
        "a string" => ("Input should be a valid string", "string_type"),
        "a boolean" => ("Input should be a valid boolean", "bool_type"),
        e if e.starts_with("struct ") || e == "a map" => (
            "Input should be a valid dictionary or object to extract fields from",
            "model_attributes_type",
        ),
        _ => ("Input is not valid", "value_error"),
    }
}

impl<T> IntoResponse for Json<T>
where
    T: serde::Serialize,
{
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}

impl<T> From<T> for Json<T> {
    fn from(value: T) -> Self {
        Json(value)
    }
}
