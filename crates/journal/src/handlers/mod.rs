pub mod error;
pub mod health;
pub mod notes;
pub mod posts;
pub mod tags;
pub mod wines;

pub use error::AppError;

use axum::http::{header, HeaderValue};

/// Cache-Control for per-user proxy responses.
pub const PRIVATE_NO_CACHE_MUST_REVALIDATE: &str = "private, no-cache, must-revalidate";

/// `(Cache-Control, private no-cache)` header tuple for proxied responses.
pub fn private_no_cache() -> [(header::HeaderName, HeaderValue); 1] {
    [(
        header::CACHE_CONTROL,
        HeaderValue::from_static(PRIVATE_NO_CACHE_MUST_REVALIDATE),
    )]
}
