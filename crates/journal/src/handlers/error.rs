use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use journal_core::notes::NoteError;
use journal_core::upstream::{upstream_error_to_status_code, UpstreamError};

/// Application error type that wraps `anyhow::Error`.
///
/// The status code is chosen by downcasting: upstream failures use
/// [`upstream_error_to_status_code`], validation failures are 400 and
/// everything else is 500.
pub struct AppError(pub anyhow::Error);

impl AppError {
    /// A 400 with the given message.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self(anyhow::Error::new(UpstreamError::InvalidRequest(message.into())))
    }

    pub fn status_code(&self) -> StatusCode {
        if let Some(upstream) = self.0.downcast_ref::<UpstreamError>() {
            let code = upstream_error_to_status_code(upstream);
            StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        } else if self.0.downcast_ref::<NoteError>().is_some() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            tracing::error!(status = %status_code, error = %self.0, "Application error");
        } else {
            tracing::warn!(status = %status_code, error = %self.0, "Request failed");
        }

        (status_code, self.0.to_string()).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_not_found_is_404() {
        let err = AppError::from(UpstreamError::NotFound {
            entity_type: "Note",
            id: "n1".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_validation_error_is_400() {
        let err = AppError::from(NoteError::EmptyTitle);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::bad_request("nope").status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_other_errors_are_500() {
        let err = AppError::from(anyhow::anyhow!("boom"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
