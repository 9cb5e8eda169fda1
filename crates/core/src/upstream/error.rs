use thiserror::Error;

/// Errors returned by the remote notes API.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("Not authorized")]
    Unauthorized,
    #[error("Upstream rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("Upstream unavailable: {0}")]
    Unavailable(String),
    #[error("Invalid upstream response: {0}")]
    InvalidResponse(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Result type for upstream operations.
pub type Result<T> = std::result::Result<T, UpstreamError>;
