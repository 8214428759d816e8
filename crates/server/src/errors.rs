use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use models::errors::ModelError;
use service::errors::ServiceError;

/// Canonical JSON error body. Plain failures render as
/// `{"error": ..., "detail": ...}`; field-level validation failures render
/// as `{"errors": {field: [messages]}}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub body: serde_json::Value,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &str, detail: impl Into<String>) -> Self {
        Self { status, body: json!({ "error": title, "detail": detail.into() }) }
    }

    pub fn field_errors(field: &str, message: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: json!({ "errors": { field: [message] } }),
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "not found", what)
    }

    pub fn bad_json(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "invalid json", detail)
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::FieldValidation { field, message } => {
                Self::field_errors(&field, &message)
            }
            ServiceError::NotFound(what) => Self::not_found(what),
            ServiceError::Validation(msg) => {
                Self::new(StatusCode::BAD_REQUEST, "validation failed", msg)
            }
            ServiceError::Model(ModelError::Validation(msg)) => {
                Self::new(StatusCode::BAD_REQUEST, "validation failed", msg)
            }
            ServiceError::Model(ModelError::Db(e)) => {
                error!(error = %e, "persistence failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal error", "persistence failure")
            }
            ServiceError::Db(e) => {
                error!(error = %e, "database failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal error", "database failure")
            }
            ServiceError::Storage(e) => {
                error!(error = %e, "storage failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal error", "storage failure")
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_validation_maps_to_errors_map() {
        let err: JsonApiError = ServiceError::field("province", "mismatch").into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.body["errors"]["province"][0], "mismatch");
    }

    #[test]
    fn not_found_maps_to_404() {
        let err: JsonApiError = ServiceError::not_found("brand").into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.body["error"], "not found");
    }

    #[test]
    fn db_failure_hides_detail() {
        let err: JsonApiError = ServiceError::Db("connection reset".into()).into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.body["detail"], "database failure");
    }
}
