use std::{env, time::Duration};

use journal_core::cache_policy::CacheConfig;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Name of the session cookie that marks a viewer as signed in (default: "session")
    pub session_cookie_name: String,
    /// Timeout for calls to the remote API in seconds (default: 10)
    pub upstream_timeout_seconds: u64,
    /// Cache-Control tuning for the notes list.
    pub cache: CacheConfig,
}

fn parse_or<T, F>(lookup: &F, name: &str, default: T) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SESSION_COOKIE_NAME` - Session cookie name (default: "session")
    /// - `UPSTREAM_TIMEOUT_SECONDS` - Remote API timeout (default: 10)
    /// - `CACHE_PUBLIC_MAX_AGE_SECONDS` (default: 60)
    /// - `CACHE_PRIVATE_MAX_AGE_SECONDS` (default: 0)
    /// - `CACHE_PUBLIC_S_MAXAGE_SECONDS` (default: 300)
    /// - `CACHE_PUBLIC_STALE_WHILE_REVALIDATE_SECONDS` (default: 600)
    /// - `CACHE_PRIVATE_STALE_WHILE_REVALIDATE_SECONDS` (default: 30)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from any name to value lookup.
    ///
    /// Missing or unparseable values fall back to their defaults.
    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = CacheConfig::default();

        Self {
            session_cookie_name: lookup("SESSION_COOKIE_NAME")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| "session".to_string()),
            upstream_timeout_seconds: parse_or(&lookup, "UPSTREAM_TIMEOUT_SECONDS", 10),
            cache: CacheConfig {
                public_max_age_seconds: parse_or(
                    &lookup,
                    "CACHE_PUBLIC_MAX_AGE_SECONDS",
                    defaults.public_max_age_seconds,
                ),
                private_max_age_seconds: parse_or(
                    &lookup,
                    "CACHE_PRIVATE_MAX_AGE_SECONDS",
                    defaults.private_max_age_seconds,
                ),
                public_s_maxage_seconds: parse_or(
                    &lookup,
                    "CACHE_PUBLIC_S_MAXAGE_SECONDS",
                    defaults.public_s_maxage_seconds,
                ),
                public_stale_while_revalidate_seconds: parse_or(
                    &lookup,
                    "CACHE_PUBLIC_STALE_WHILE_REVALIDATE_SECONDS",
                    defaults.public_stale_while_revalidate_seconds,
                ),
                private_stale_while_revalidate_seconds: parse_or(
                    &lookup,
                    "CACHE_PRIVATE_STALE_WHILE_REVALIDATE_SECONDS",
                    defaults.private_stale_while_revalidate_seconds,
                ),
            },
        }
    }

    /// Get the upstream timeout as a Duration.
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            session_cookie_name: "session".to_string(),
            upstream_timeout_seconds: 10,
            cache: CacheConfig::default(),
        }
    }
}
