// In crates/api-client/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to build the API client: {0}")]
    ClientBuildError(String),
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(#[from] serde_json::Error),
    #[error("API error: {error_type}: {message}")]
    ApiError { error_type: String, message: String },
    #[error("WebSocket error: {0}")]
    WebSocket(String),
    #[error("{0} is not configured")]
    NotConfigured(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
