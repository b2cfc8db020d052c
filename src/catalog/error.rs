use thiserror::Error;

/// Failures produced by the content catalog.
///
/// Each layer returns the first error it hits; the only context added on the
/// way up is the `stage` field on the log line written where it was detected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("invalid parameter {field}: {reason}")]
    InvalidParameter { field: String, reason: String },

    #[error("validation error: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("upload error: {0}")]
    Upload(String),
}

impl CatalogError {
    pub fn invalid_parameter(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CatalogError::InvalidParameter {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn storage(err: impl std::fmt::Display) -> Self {
        CatalogError::Storage(err.to_string())
    }

    pub fn upload(err: impl std::fmt::Display) -> Self {
        CatalogError::Upload(err.to_string())
    }
}

impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => CatalogError::NotFound("record not found".to_string()),
            other => CatalogError::Storage(other.to_string()),
        }
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
