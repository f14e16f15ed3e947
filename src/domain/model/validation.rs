//! Accepted request shapes and their field constraints

use std::fmt;

use serde::{Deserialize, Deserializer};
use validator::{Validate, ValidationError, ValidationErrors};

use super::entity::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
use crate::domain::DomainError;

/// Order in which violations are reported
const FIELD_ORDER: [&str; 8] = [
    "name",
    "model_type",
    "model_name",
    "api_key",
    "temperature",
    "max_tokens",
    "description",
    "is_active",
];

/// Payload for registering a model configuration
#[derive(Clone, PartialEq, Deserialize, Validate)]
pub struct CreateModelConfiguration {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(length(min = 1, max = 100))]
    pub model_type: String,

    #[validate(length(min = 1, max = 255))]
    pub model_name: String,

    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_temperature")]
    #[validate(length(max = 10))]
    pub temperature: String,

    #[serde(default = "default_max_tokens")]
    #[validate(range(min = 1, max = 4000))]
    pub max_tokens: i32,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

fn default_temperature() -> String {
    DEFAULT_TEMPERATURE.to_string()
}

fn default_max_tokens() -> i32 {
    DEFAULT_MAX_TOKENS
}

fn default_is_active() -> bool {
    true
}

impl CreateModelConfiguration {
    /// Create a payload with the required fields, defaulting the rest
    pub fn new(
        name: impl Into<String>,
        model_type: impl Into<String>,
        model_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            model_type: model_type.into(),
            model_name: model_name.into(),
            api_key: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            description: None,
            is_active: default_is_active(),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_temperature(mut self, temperature: impl Into<String>) -> Self {
        self.temperature = temperature.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: i32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }
}

impl fmt::Debug for CreateModelConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateModelConfiguration")
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

/// Partial update payload. An absent field leaves the stored value unchanged.
///
/// `api_key` and `description` distinguish "absent" (`None`) from an explicit
/// JSON `null` (`Some(None)`), which clears the stored value.
#[derive(Clone, Default, PartialEq, Deserialize, Validate)]
pub struct UpdateModelConfiguration {
    #[serde(default)]
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[serde(default)]
    #[validate(length(min = 1, max = 100))]
    pub model_type: Option<String>,

    #[serde(default)]
    #[validate(length(min = 1, max = 255))]
    pub model_name: Option<String>,

    #[serde(default, deserialize_with = "deserialize_present")]
    pub api_key: Option<Option<String>>,

    #[serde(default)]
    #[validate(length(max = 10))]
    pub temperature: Option<String>,

    #[serde(default)]
    #[validate(range(min = 1, max = 4000))]
    pub max_tokens: Option<i32>,

    #[serde(default, deserialize_with = "deserialize_present")]
    pub description: Option<Option<String>>,

    #[serde(default)]
    pub is_active: Option<bool>,
}

impl fmt::Debug for UpdateModelConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_key = self
            .api_key
            .as_ref()
            .map(|key| key.as_ref().map(|_| "[REDACTED]"));

        f.debug_struct("UpdateModelConfiguration")
            .field("name", &self.name)
            .field("model_type", &self.model_type)
            .field("model_name", &self.model_name)
            .field("api_key", &api_key)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("description", &self.description)
            .field("is_active", &self.is_active)
            .finish()
    }
}

/// Wraps any present value, including `null`, so it can be told apart from a missing key
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// A single field that failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
    /// Machine-readable kind, e.g. `string_too_short`
    pub kind: String,
}

impl FieldViolation {
    pub fn new(
        field: impl Into<String>,
        message: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            kind: kind.into(),
        }
    }
}

/// Run the declared constraints of a request shape
pub fn validate_request<T: Validate>(request: &T) -> Result<(), DomainError> {
    request
        .validate()
        .map_err(|errors| DomainError::invalid_fields(collect_violations(&errors)))
}

fn collect_violations(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut violations: Vec<FieldViolation> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            let field = field.to_string();
            field_errors
                .iter()
                .map(move |error| describe(&field, error))
        })
        .collect();

    violations.sort_by_key(|v| {
        FIELD_ORDER
            .iter()
            .position(|name| *name == v.field)
            .unwrap_or(FIELD_ORDER.len())
    });

    violations
}

fn describe(field: &str, error: &ValidationError) -> FieldViolation {
    let param = |name: &str| error.params.get(name).and_then(|v| v.as_f64());

    match error.code.as_ref() {
        "length" => {
            let length = error
                .params
                .get("value")
                .and_then(|v| v.as_str())
                .map(|s| s.chars().count() as f64);

            match (length, param("min"), param("max")) {
                (Some(length), Some(min), _) if length < min => FieldViolation::new(
                    field,
                    format!("String should have at least {}", characters(min)),
                    "string_too_short",
                ),
                (_, _, Some(max)) => FieldViolation::new(
                    field,
                    format!("String should have at most {}", characters(max)),
                    "string_too_long",
                ),
                _ => FieldViolation::new(field, "String has an invalid length", "string_length"),
            }
        }
        "range" => match (param("value"), param("min"), param("max")) {
            (Some(value), Some(min), _) if value < min => FieldViolation::new(
                field,
                format!("Input should be greater than or equal to {}", min as i64),
                "greater_than_equal",
            ),
            (_, _, Some(max)) => FieldViolation::new(
                field,
                format!("Input should be less than or equal to {}", max as i64),
                "less_than_equal",
            ),
            _ => FieldViolation::new(field, "Input is out of range", "range"),
        },
        code => FieldViolation::new(
            field,
            error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid value ({})", code)),
            code,
        ),
    }
}

fn characters(count: f64) -> String {
    let count = count as i64;

    if count == 1 {
        "1 character".to_string()
    } else {
        format!("{} characters", count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violations(result: Result<(), DomainError>) -> Vec<FieldViolation> {
        match result {
            Err(DomainError::Validation { violations, .. }) => violations,
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_create_minimal_payload_gets_defaults() {
        let json = r#"{"name":"gpt","model_type":"openai","model_name":"gpt-4"}"#;
        let request: CreateModelConfiguration = serde_json::from_str(json).unwrap();

        assert_eq!(request.temperature, "0.7");
        assert_eq!(request.max_tokens, 1000);
        assert!(request.is_active);
        assert!(request.api_key.is_none());
        assert!(request.description.is_none());
        assert!(validate_request(&request).is_ok());
    }

    #[test]
    fn test_create_missing_required_field_fails_to_parse() {
        let json = r#"{"name":"gpt","model_type":"openai"}"#;
        let result = serde_json::from_str::<CreateModelConfiguration>(json);

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("model_name"));
    }

    #[test]
    fn test_create_max_tokens_bounds() {
        let base = CreateModelConfiguration::new("gpt", "openai", "gpt-4");

        assert!(validate_request(&base.clone().with_max_tokens(1)).is_ok());
        assert!(validate_request(&base.clone().with_max_tokens(4000)).is_ok());

        let too_low = violations(validate_request(&base.clone().with_max_tokens(0)));
        assert_eq!(too_low.len(), 1);
        assert_eq!(too_low[0].field, "max_tokens");
        assert_eq!(too_low[0].kind, "greater_than_equal");

        let too_high = violations(validate_request(&base.with_max_tokens(4001)));
        assert_eq!(too_high[0].field, "max_tokens");
        assert_eq!(too_high[0].kind, "less_than_equal");
        assert_eq!(
            too_high[0].message,
            "Input should be less than or equal to 4000"
        );
    }

    #[test]
    fn test_create_empty_name_rejected() {
        let request = CreateModelConfiguration::new("", "openai", "gpt-4");
        let found = violations(validate_request(&request));

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].field, "name");
        assert_eq!(found[0].kind, "string_too_short");
        assert_eq!(found[0].message, "String should have at least 1 character");
    }

    #[test]
    fn test_create_length_limits() {
        let request = CreateModelConfiguration::new("a".repeat(255), "t".repeat(100), "m".repeat(255));
        assert!(validate_request(&request).is_ok());

        let request = CreateModelConfiguration::new("a".repeat(256), "t".repeat(101), "gpt-4");
        let found = violations(validate_request(&request));

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].field, "name");
        assert_eq!(found[0].message, "String should have at most 255 characters");
        assert_eq!(found[1].field, "model_type");
        assert_eq!(found[1].message, "String should have at most 100 characters");
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let request = CreateModelConfiguration::new("é".repeat(255), "openai", "gpt-4");
        assert!(validate_request(&request).is_ok());
    }

    #[test]
    fn test_create_temperature_width() {
        let base = CreateModelConfiguration::new("gpt", "openai", "gpt-4");

        assert!(validate_request(&base.clone().with_temperature("0.12345678")).is_ok());

        let found = violations(validate_request(&base.with_temperature("0.123456789")));
        assert_eq!(found[0].field, "temperature");
        assert_eq!(found[0].kind, "string_too_long");
    }

    #[test]
    fn test_update_empty_payload() {
        let request: UpdateModelConfiguration = serde_json::from_str("{}").unwrap();

        assert_eq!(request, UpdateModelConfiguration::default());
        assert!(validate_request(&request).is_ok());
    }

    #[test]
    fn test_update_constraints_apply_when_present() {
        let request: UpdateModelConfiguration =
            serde_json::from_str(r#"{"name":"","max_tokens":0}"#).unwrap();
        let found = violations(validate_request(&request));

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].field, "name");
        assert_eq!(found[1].field, "max_tokens");
    }

    #[test]
    fn test_update_null_distinguishes_clearable_fields() {
        let request: UpdateModelConfiguration =
            serde_json::from_str(r#"{"api_key":null,"name":null}"#).unwrap();

        assert_eq!(request.api_key, Some(None));
        assert!(request.description.is_none());
        assert!(request.name.is_none());
    }

    #[test]
    fn test_update_present_values() {
        let request: UpdateModelConfiguration = serde_json::from_str(
            r#"{"api_key":"sk-new","description":"notes","is_active":false}"#,
        )
        .unwrap();

        assert_eq!(request.api_key, Some(Some("sk-new".to_string())));
        assert_eq!(request.description, Some(Some("notes".to_string())));
        assert_eq!(request.is_active, Some(false));
        assert_ne!(request, UpdateModelConfiguration::default());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let create = CreateModelConfiguration::new("gpt", "openai", "gpt-4").with_api_key("sk-secret");
        let update = UpdateModelConfiguration {
            api_key: Some(Some("sk-secret".to_string())),
            ..Default::default()
        };

        assert!(!format!("{:?}", create).contains("sk-secret"));
        assert!(!format!("{:?}", update).contains("sk-secret"));
    }
}
