//! Pure mapping from [`UpstreamError`] to the status code the proxy returns.

use super::UpstreamError;

/// Maps an [`UpstreamError`] to an HTTP status code.
///
/// - `NotFound` -> 404
/// - `Unauthorized` -> 401
/// - `Rejected` -> the upstream 4xx status, 502 for anything else
/// - `Unavailable` -> 503
/// - `InvalidResponse` -> 502
/// - `InvalidRequest` -> 400
///
/// # Examples
///
/// ```
/// use journal_core::upstream::{upstream_error_to_status_code, UpstreamError};
///
/// let error = UpstreamError::NotFound {
///     entity_type: "Note",
///     id: "abc-123".to_string(),
/// };
/// assert_eq!(upstream_error_to_status_code(&error), 404);
/// ```
pub fn upstream_error_to_status_code(error: &UpstreamError) -> u16 {
    match error {
        UpstreamError::NotFound { .. } => 404,
        UpstreamError::Unauthorized => 401,
        UpstreamError::Rejected { status, .. } if (400..500).contains(status) => *status,
        UpstreamError::Rejected { .. } => 502,
        UpstreamError::Unavailable(_) => 503,
        UpstreamError::InvalidResponse(_) => 502,
        UpstreamError::InvalidRequest(_) => 400,
    }
}
