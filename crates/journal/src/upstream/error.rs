//! Client error types.

use journal_core::upstream::UpstreamError;
use thiserror::Error;

/// Errors that can occur while talking to the remote API.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    #[error("Not authorized")]
    Unauthorized,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ClientError> for UpstreamError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Request(e) if e.is_decode() => {
                UpstreamError::InvalidResponse(e.to_string())
            }
            ClientError::Request(e) => UpstreamError::Unavailable(e.to_string()),
            ClientError::ServerError { status, message } => {
                UpstreamError::Rejected { status, message }
            }
            ClientError::NotFound { entity_type, id } => {
                UpstreamError::NotFound { entity_type, id }
            }
            ClientError::Unauthorized => UpstreamError::Unauthorized,
            ClientError::Json(e) => UpstreamError::InvalidResponse(e.to_string()),
        }
    }
}
