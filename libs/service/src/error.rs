//! Service-boundary error taxonomy.
//!
//! Only these three kinds cross the boundary. Enrichment and audit
//! failures are absorbed where they happen and never surface here.

use thiserror::Error;
use validator::ValidationErrors;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{resource_type} not found with id: {id}")]
    NotFound { resource_type: String, id: String },

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("upstream failure: {0}")]
    Upstream(String),
}

impl Error {
    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self::NotFound {
            resource_type: resource_type.to_string(),
            id: id.to_string(),
        }
    }
}

impl From<arogya_client::Error> for Error {
    fn from(err: arogya_client::Error) -> Self {
        match err {
            arogya_client::Error::NotFound { resource_type, id } => {
                Self::NotFound { resource_type, id }
            }
            other => Self::Upstream(other.to_string()),
        }
    }
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}
