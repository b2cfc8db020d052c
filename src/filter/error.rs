use thiserror::Error;

use crate::catalog::CatalogError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("Invalid limit: {0}")]
    InvalidLimit(String),

    #[error("Invalid offset: {0}")]
    InvalidOffset(String),
}

impl From<FilterError> for CatalogError {
    fn from(err: FilterError) -> Self {
        match err {
            FilterError::InvalidLimit(reason) => CatalogError::invalid_parameter("limit", reason),
            FilterError::InvalidOffset(reason) => CatalogError::invalid_parameter("page", reason),
        }
    }
}
