//! Implementations of [`journal_core::upstream::NotesApi`].
//!
//! - [`HttpNotesApi`] forwards to the remote API with `reqwest`.
//! - [`InMemoryNotesApi`] keeps everything in process; used for tests and
//!   when no upstream URL is configured.

mod error;
mod http;
mod inmemory;

pub use error::ClientError;
pub use http::HttpNotesApi;
pub use inmemory::InMemoryNotesApi;
