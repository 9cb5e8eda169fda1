//! Application state shared by all request handlers.

use std::sync::Arc;

use journal_core::cache_policy::{Clock, SystemClock};
use journal_core::upstream::NotesApi;

use crate::{config::Config, upstream::InMemoryNotesApi};

/// Shared application state.
///
/// Cloned for each request handler. The remote API sits behind a trait
/// object so tests and demo mode can swap in the in-memory backend.
#[derive(Clone)]
pub struct AppState {
    /// Remote notes API (HTTP or in-memory).
    pub api: Arc<dyn NotesApi>,
    /// Source of "now" for cache decisions.
    pub clock: Arc<dyn Clock>,
    /// Application configuration.
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates a new AppState.
    pub fn new(api: Arc<dyn NotesApi>, clock: Arc<dyn Clock>, config: Config) -> Self {
        Self {
            api,
            clock,
            config: Arc::new(config),
        }
    }

    /// In-memory backend seeded with demo notes.
    pub fn with_demo_data(config: Config) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let api = InMemoryNotesApi::with_demo_data(clock.clone());
        Self::new(Arc::new(api), clock, config)
    }
}

impl Default for AppState {
    fn default() -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let api = InMemoryNotesApi::new(clock.clone());
        Self::new(Arc::new(api), clock, Config::default())
    }
}
