//! Axum extractor for RequestContext.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, HeaderMap},
};
use axum_extra::extract::CookieJar;
use std::convert::Infallible;
use uuid::Uuid;

use journal_core::cache_policy::RequestHeaderSnapshot;
use journal_core::upstream::Credentials;

use super::types::{RequestContext, RequestId};
use crate::state::AppState;

fn extract_request_id(headers: &HeaderMap) -> RequestId {
    headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .map(RequestId::from_uuid)
        .unwrap_or_else(RequestId::new)
}

/// Header value as a string; non-UTF-8 values count as absent.
fn header_string(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn extract_header_snapshot(headers: &HeaderMap) -> RequestHeaderSnapshot {
    RequestHeaderSnapshot {
        cache_control: header_string(headers, header::CACHE_CONTROL),
        cookie: header_string(headers, header::COOKIE),
        if_none_match: header_string(headers, header::IF_NONE_MATCH),
        if_modified_since: header_string(headers, header::IF_MODIFIED_SINCE),
    }
}

fn extract_credentials(headers: &HeaderMap, session_cookie_name: &str) -> Credentials {
    let jar = CookieJar::from_headers(headers);
    let has_session = jar
        .get(session_cookie_name)
        .is_some_and(|cookie| !cookie.value().is_empty());

    // Multiple Cookie headers are joined the way browsers would send one.
    let cookie = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect::<Vec<_>>()
        .join("; ");

    Credentials {
        cookie: (!cookie.is_empty()).then_some(cookie),
        is_authenticated: has_session,
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        Ok(RequestContext {
            request_id: extract_request_id(&parts.headers),
            credentials: extract_credentials(&parts.headers, &app_state.config.session_cookie_name),
            headers: extract_header_snapshot(&parts.headers),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_request_id_from_header() {
        let mut headers = HeaderMap::new();
        let id = "550e8400-e29b-41d4-a716-446655440000";
        headers.insert("x-request-id", id.parse().unwrap());

        let request_id = extract_request_id(&headers);
        assert_eq!(request_id.to_string(), id);
    }

    #[test]
    fn test_extract_request_id_generates_when_invalid() {
        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", "not-a-uuid".parse().unwrap());

        let request_id = extract_request_id(&headers);

        Uuid::parse_str(&request_id.to_string()).expect("Should be valid UUID");
    }

    #[test]
    fn test_extract_header_snapshot() {
        let mut headers = HeaderMap::new();
        headers.insert(header::IF_NONE_MATCH, r#"W/"a", W/"b""#.parse().unwrap());
        headers.insert(
            header::IF_MODIFIED_SINCE,
            "Mon, 01 Jan 2024 10:00:00 GMT".parse().unwrap(),
        );

        let snapshot = extract_header_snapshot(&headers);

        assert_eq!(snapshot.if_none_match.as_deref(), Some(r#"W/"a", W/"b""#));
        assert_eq!(
            snapshot.if_modified_since.as_deref(),
            Some("Mon, 01 Jan 2024 10:00:00 GMT")
        );
        assert_eq!(snapshot.cookie, None);
        assert_eq!(snapshot.cache_control, None);
    }

    #[test]
    fn test_extract_credentials_with_session() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, "theme=dark; session=abc".parse().unwrap());

        let creds = extract_credentials(&headers, "session");

        assert!(creds.is_authenticated);
        assert_eq!(creds.cookie.as_deref(), Some("theme=dark; session=abc"));
    }

    #[test]
    fn test_extract_credentials_without_cookie() {
        let creds = extract_credentials(&HeaderMap::new(), "session");
        assert_eq!(creds, Credentials::anonymous());
    }

    #[test]
    fn test_extract_credentials_respects_cookie_name() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, "session=abc".parse().unwrap());

        let creds = extract_credentials(&headers, "sid");

        assert!(!creds.is_authenticated);
        assert!(creds.cookie.is_some());
    }
}
