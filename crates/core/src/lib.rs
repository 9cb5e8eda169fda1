//! journal_core - pure domain logic for the journal front end.
//!
//! Nothing in this crate performs I/O. The HTTP shell (`journal`) reads the
//! clock, talks to the remote API through [`upstream::NotesApi`] and applies
//! the decisions computed here.

pub mod cache_policy;
pub mod notes;
pub mod serde;
pub mod upstream;
