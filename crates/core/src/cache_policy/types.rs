/// The request headers that influence caching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestHeaderSnapshot {
    pub cache_control: Option<String>,
    pub cookie: Option<String>,
    pub if_none_match: Option<String>,
    pub if_modified_since: Option<String>,
}

impl RequestHeaderSnapshot {
    /// Sets the `If-None-Match` header value.
    pub fn with_if_none_match(mut self, value: impl Into<String>) -> Self {
        self.if_none_match = Some(value.into());
        self
    }

    /// Sets the `If-Modified-Since` header value.
    pub fn with_if_modified_since(mut self, value: impl Into<String>) -> Self {
        self.if_modified_since = Some(value.into());
        self
    }
}

/// Cache eligibility derived from the selected date and the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheContext {
    /// Anonymous viewer of today-or-earlier content.
    pub should_use_public_cache: bool,
    /// The selected date is strictly in the past.
    pub is_immutable_candidate: bool,
    /// The selected date is today or later.
    pub is_recent_range: bool,
}

/// Response headers produced by the policy builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheHeaders {
    pub cache_control: String,
    pub etag: String,
    pub last_modified: String,
    pub vary: &'static str,
}

impl CacheHeaders {
    /// Header name/value pairs in a stable order.
    pub fn header_pairs(&self) -> [(&'static str, &str); 4] {
        [
            ("Cache-Control", self.cache_control.as_str()),
            ("ETag", self.etag.as_str()),
            ("Last-Modified", self.last_modified.as_str()),
            ("Vary", self.vary),
        ]
    }
}

/// The caching decision for one notes-list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachePolicy {
    pub should_use_public_cache: bool,
    pub headers: CacheHeaders,
    pub is_not_modified: bool,
    /// The note count changed under an unchanged timestamp and
    /// `Last-Modified` was pushed forward to expose it.
    pub forced_timestamp_bump: bool,
}

impl CachePolicy {
    /// See [`CacheHeaders::header_pairs`].
    pub fn header_pairs(&self) -> [(&'static str, &str); 4] {
        self.headers.header_pairs()
    }
}
