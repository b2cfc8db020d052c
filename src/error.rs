// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::catalog::CatalogError;

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),
    ValidationError {
        message: String,
        field_errors: Option<HashMap<String, String>>,
    },

    // 401 Unauthorized
    Unauthorized(String),

    // 404 Not Found
    NotFound(String),

    // 413 Payload Too Large
    PayloadTooLarge(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::ValidationError { .. } => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::NotFound(_) => 404,
            ApiError::PayloadTooLarge(_) => 413,
            ApiError::InternalServerError(_) => 500,
            ApiError::ServiceUnavailable(_) => 503,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::ValidationError { message, .. } => message,
            ApiError::Unauthorized(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::PayloadTooLarge(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
            ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::ValidationError { message, field_errors } => {
                let mut response = json!({
                    "error": true,
                    "message": message,
                    "code": "VALIDATION_ERROR"
                });

                if let Some(field_errors) = field_errors {
                    response["field_errors"] = json!(field_errors);
                }

                response
            }
            _ => {
                json!({
                    "error": true,
                    "message": self.message(),
                    "code": self.error_code()
                })
            }
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::ValidationError { .. } => "VALIDATION_ERROR",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
            ApiError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn validation_error(message: impl Into<String>, field_errors: Option<HashMap<String, String>>) -> Self {
        ApiError::ValidationError {
            message: message.into(),
            field_errors,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn payload_too_large(message: impl Into<String>) -> Self {
        ApiError::PayloadTooLarge(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Unauthorized => ApiError::unauthorized("Unauthorized"),
            CatalogError::InvalidParameter { ref field, ref reason } => {
                let mut field_errors = HashMap::new();
                field_errors.insert(field.clone(), reason.clone());
                ApiError::validation_error(err.to_string(), Some(field_errors))
            }
            CatalogError::Validation(_) => ApiError::validation_error(err.to_string(), None),
            CatalogError::NotFound(msg) => ApiError::not_found(msg),
            CatalogError::Storage(msg) => {
                // Don't expose internal SQL errors to clients
                tracing::error!("Storage error: {}", msg);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
            CatalogError::Upload(msg) => {
                tracing::error!("Upload error: {}", msg);
                ApiError::internal_server_error("Failed to upload file")
            }
        }
    }
}

impl From<axum::extract::multipart::MultipartError> for ApiError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::payload_too_large(err.body_text())
        } else {
            ApiError::bad_request(err.body_text())
        }
    }
}

impl From<axum::extract::multipart::MultipartRejection> for ApiError {
    fn from(rejection: axum::extract::multipart::MultipartRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_errors_map_to_status_codes() {
        assert_eq!(ApiError::from(CatalogError::Unauthorized).status_code(), 401);
        assert_eq!(
            ApiError::from(CatalogError::invalid_parameter("page", "must be an integer")).status_code(),
            400
        );
        assert_eq!(ApiError::from(CatalogError::Validation("title is required".into())).status_code(), 400);
        assert_eq!(ApiError::from(CatalogError::NotFound("content 1 not found".into())).status_code(), 404);
        assert_eq!(ApiError::from(CatalogError::Storage("db down".into())).status_code(), 500);
        assert_eq!(ApiError::from(CatalogError::Upload("bucket".into())).status_code(), 500);
    }

    #[test]
    fn internal_details_are_not_leaked() {
        let err = ApiError::from(CatalogError::Storage("relation \"contents\" does not exist".into()));
        assert!(!err.message().contains("contents"));
    }

    #[test]
    fn validation_body_carries_message() {
        let body = ApiError::from(CatalogError::Validation("title is required".into())).to_json();
        assert_eq!(body["message"], "validation error: title is required");
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[test]
    fn service_unavailable_is_503() {
        let err = ApiError::service_unavailable("database unavailable");
        assert_eq!(err.status_code(), 503);
        assert_eq!(err.to_json()["code"], "SERVICE_UNAVAILABLE");
    }

    #[test]
    fn invalid_parameter_names_the_field() {
        let body = ApiError::from(CatalogError::invalid_parameter("orderBy", "unknown column")).to_json();
        assert_eq!(body["field_errors"]["orderBy"], "unknown column");
    }
}
