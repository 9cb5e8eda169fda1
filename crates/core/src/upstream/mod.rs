mod error;
mod http_mapping;
mod traits;
mod types;

pub use error::{Result, UpstreamError};
pub use http_mapping::upstream_error_to_status_code;
pub use traits::NotesApi;
pub use types::Credentials;
