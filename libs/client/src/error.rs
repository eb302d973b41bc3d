//! Store-boundary error type.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{resource_type}/{id} not found")]
    NotFound { resource_type: String, id: String },

    #[error("upstream store rejected the request ({status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed document from store: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid store configuration: {0}")]
    Config(String),
}

impl Error {
    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self::NotFound {
            resource_type: resource_type.to_string(),
            id: id.to_string(),
        }
    }
}
