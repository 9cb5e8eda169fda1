/// What the proxy forwards to the remote API on behalf of the browser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Raw `Cookie` header of the incoming request.
    pub cookie: Option<String>,
    /// Whether the session cookie was present.
    pub is_authenticated: bool,
}

impl Credentials {
    /// No cookie at all.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A signed-in viewer whose cookie header is `cookie` (useful for testing).
    pub fn with_session(cookie: impl Into<String>) -> Self {
        Self {
            cookie: Some(cookie.into()),
            is_authenticated: true,
        }
    }
}
