//! HTTP caching policy for the notes list view.
//!
//! The flow is one-way: [`derive_context`] classifies the request, then
//! [`build_policy`] turns the classified context, the note set and the
//! conditional request headers into response headers plus a
//! "not modified" verdict. Callers read their [`Clock`] once and pass the
//! same instant to both.
//!
//! The weak ETag encodes `(selected date, last modified, note count)`
//! instead of a content hash. Two edits inside the same second, or an add
//! and a delete that cancel out, leave the tag unchanged.

mod builder;
mod clock;
mod config;
mod context;
mod headers;
mod http_date;
mod types;

pub use builder::build_policy;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::CacheConfig;
pub use context::{derive_context, reference_today, REFERENCE_UTC_OFFSET_SECONDS};
pub use headers::{normalize_if_none_match, parse_etag_note_count, ConditionalHeaders};
pub use http_date::{format_http_date, parse_http_date, parse_updated_at};
pub use types::{CacheContext, CacheHeaders, CachePolicy, RequestHeaderSnapshot};
