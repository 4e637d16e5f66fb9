//! API error handling.
//!
//! Every failure leaves the service as `{code, message, details?}` JSON with
//! a matching status code. Store failures are logged here and never reach the
//! client verbatim.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use tasktracker_domain::TitleError;
use tasktracker_store::StoreError;

// =============================================================================
// API Error
// =============================================================================

/// API error structure for JSON responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional field-level errors for validation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

impl ApiError {
    /// Creates a new API error.
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a validation error with field-level details.
    #[must_use]
    pub fn validation(message: impl Into<String>, details: Vec<FieldError>) -> Self {
        Self {
            code: "VALIDATION_ERROR".to_string(),
            message: message.into(),
            details: Some(details),
        }
    }
}

/// Field-level error for validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Name of the offending field.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl FieldError {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

// =============================================================================
// API Error Response
// =============================================================================

/// API error response containing status code and error details.
#[derive(Debug, Clone)]
pub struct ApiErrorResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    #[must_use]
    pub const fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }

    /// Creates a 400 Bad Request response.
    #[must_use]
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiError::new(code, message))
    }

    /// Creates a 400 Bad Request response for validation errors.
    ///
    /// The top-level message is the first field message, so clients that
    /// only show `message` still show something specific.
    #[must_use]
    pub fn validation_error(details: Vec<FieldError>) -> Self {
        let message = details
            .first()
            .map_or_else(|| "Validation failed".to_string(), |detail| detail.message.clone());
        Self::new(
            StatusCode::BAD_REQUEST,
            ApiError::validation(message, details),
        )
    }

    /// Creates a 404 Not Found response.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", message))
    }

    /// Creates a 404 response for a task identifier.
    #[must_use]
    pub fn task_not_found(id: &str) -> Self {
        Self::not_found(format!("Task not found: {id}"))
    }

    /// Creates a 500 Internal Server Error response.
    #[must_use]
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::new("INTERNAL_ERROR", message),
        )
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<StoreError> for ApiErrorResponse {
    fn from(error: StoreError) -> Self {
        tracing::error!(%error, "Store operation failed");
        match error {
            StoreError::Unavailable(_) => Self::internal_error("Task store is unavailable"),
            StoreError::Database(_) | StoreError::Serialization(_) => {
                Self::internal_error("An internal error occurred")
            }
        }
    }
}

impl From<JsonRejection> for ApiErrorResponse {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!(%rejection, "Rejected request body");
        match rejection {
            JsonRejection::JsonDataError(error) => {
                Self::validation_error(vec![FieldError::new("body", error.body_text())])
            }
            JsonRejection::JsonSyntaxError(error) => {
                Self::bad_request("INVALID_JSON", error.body_text())
            }
            JsonRejection::MissingJsonContentType(error) => {
                Self::bad_request("INVALID_CONTENT_TYPE", error.body_text())
            }
            other => Self::bad_request("INVALID_REQUEST_BODY", other.body_text()),
        }
    }
}

impl From<QueryRejection> for ApiErrorResponse {
    fn from(rejection: QueryRejection) -> Self {
        tracing::warn!(%rejection, "Rejected query string");
        Self::bad_request("INVALID_QUERY", rejection.body_text())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field-level validation failures collected from a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    #[must_use]
    pub const fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    /// Creates a validation error with a single field error.
    #[must_use]
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(vec![FieldError::new(field, message)])
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl From<TitleError> for ValidationError {
    fn from(error: TitleError) -> Self {
        Self::single("title", error.to_string())
    }
}

impl From<ValidationError> for ApiErrorResponse {
    fn from(error: ValidationError) -> Self {
        Self::validation_error(error.errors)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_api_error_new() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        assert_eq!(error.code, "TEST_ERROR");
        assert_eq!(error.message, "Test message");
        assert!(error.details.is_none());
    }

    #[rstest]
    fn test_api_error_omits_empty_details() {
        let json = serde_json::to_value(ApiError::new("NOT_FOUND", "gone")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "code": "NOT_FOUND", "message": "gone" })
        );
    }

    #[rstest]
    fn test_validation_error_message_is_first_detail() {
        let response = ApiErrorResponse::validation_error(vec![
            FieldError::new("title", "Title is required"),
            FieldError::new("status", "Unknown"),
        ]);
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error.code, "VALIDATION_ERROR");
        assert_eq!(response.error.message, "Title is required");
        assert_eq!(response.error.details.unwrap().len(), 2);
    }

    #[rstest]
    fn test_validation_error_without_details() {
        let response = ApiErrorResponse::validation_error(Vec::new());
        assert_eq!(response.error.message, "Validation failed");
    }

    #[rstest]
    fn test_title_error_becomes_title_field_error() {
        let error = ValidationError::from(TitleError::Empty);
        assert_eq!(
            error.errors,
            vec![FieldError::new("title", "Title is required")]
        );
    }

    #[rstest]
    fn test_task_not_found() {
        let response = ApiErrorResponse::task_not_found("abc");
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.error.code, "NOT_FOUND");
        assert_eq!(response.error.message, "Task not found: abc");
    }

    #[rstest]
    #[case(StoreError::Unavailable("pool timed out".to_string()))]
    #[case(StoreError::Database("relation missing".to_string()))]
    #[case(StoreError::Serialization("bad document".to_string()))]
    fn test_store_error_is_internal_and_opaque(#[case] error: StoreError) {
        let detail = error.to_string();
        let response = ApiErrorResponse::from(error);

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.error.code, "INTERNAL_ERROR");
        assert!(!response.error.message.contains(&detail));
    }
}
