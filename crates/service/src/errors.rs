use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    /// Cross-field or format validation naming the offending field.
    #[error("validation error: {field}: {message}")]
    FieldValidation { field: String, message: String },
    #[error("not found: {0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self {
        Self::NotFound(format!("{} not found", entity))
    }

    pub fn field(field: &str, message: impl Into<String>) -> Self {
        Self::FieldValidation { field: field.to_string(), message: message.into() }
    }
}
