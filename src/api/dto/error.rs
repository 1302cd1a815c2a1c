//! Error response DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ValidationFieldError;

/// Fixed taxonomy of error codes returned to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationError,
    BadRequest,
    /// A collaborator failed without a more specific classification
    UnexpectedError,
    Unauthorized,
    Forbidden,
    NotFound,
    MethodNotAllowed,
    RequestTimeout,
    DuplicateEntry,
    PayloadTooLarge,
    UnsupportedMediaType,
    UploadFailed,
    DatabaseError,
    ConfigurationError,
    ServiceUnavailable,
    InternalError,
}

/// Standard error response format.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "statusCode": 400,
    "message": "Validation failed: email: Invalid email format",
    "code": "VALIDATION_ERROR",
    "description": "Failed to log in.",
    "errors": [{"field": "email", "message": "Invalid email format"}]
}))]
pub struct ErrorResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    /// The failure's own message
    pub message: String,
    pub code: ErrorCode,
    /// Static description of the operation that failed
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ValidationFieldError>>,
}

impl ErrorResponse {
    pub fn new(status_code: u16, code: ErrorCode, message: &str, description: &str) -> Self {
        Self {
            status_code,
            message: message.to_string(),
            code,
            description: description.to_string(),
            cause: None,
            errors: None,
        }
    }

    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    pub fn with_errors(mut self, errors: Vec<ValidationFieldError>) -> Self {
        self.errors = Some(errors);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_codes_serialize_screaming_snake_case() {
        assert_eq!(
            serde_json::to_value(ErrorCode::UnexpectedError).unwrap(),
            json!("UNEXPECTED_ERROR")
        );
        assert_eq!(
            serde_json::to_value(ErrorCode::UnsupportedMediaType).unwrap(),
            json!("UNSUPPORTED_MEDIA_TYPE")
        );
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let body = ErrorResponse::new(
            400,
            ErrorCode::UnexpectedError,
            "boom",
            "Failed to fetch me",
        );
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(
            value,
            json!({
                "statusCode": 400,
                "message": "boom",
                "code": "UNEXPECTED_ERROR",
                "description": "Failed to fetch me"
            })
        );
    }

    #[test]
    fn test_with_cause_and_errors() {
        let body = ErrorResponse::new(400, ErrorCode::ValidationError, "bad", "Failed to log in.")
            .with_cause("upstream")
            .with_errors(vec![ValidationFieldError {
                field: "email".to_string(),
                message: "Invalid email format".to_string(),
            }]);
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(value["cause"], "upstream");
        assert_eq!(value["errors"][0]["field"], "email");
    }
}
