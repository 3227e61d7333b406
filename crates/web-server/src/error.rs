// In crates/web-server/src/error.rs

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid mode: {0}")]
    InvalidMode(String),
    #[error("Order history unavailable: {0}")]
    Database(#[from] database::Error),
    #[error("Failed to bind the server address: {0}")]
    ServerBindError(std::io::Error),
    #[error("The server stopped: {0}")]
    ServeError(std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Error::InvalidMode(_) => (StatusCode::BAD_REQUEST, json!({ "success": false })),
            Error::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Error fetching history" }),
            ),
            Error::ServerBindError(_) | Error::ServeError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Internal server error" }),
            ),
        };
        tracing::warn!(error = %self, status = %status, "Request failed.");
        (status, Json(body)).into_response()
    }
}
