use chrono::{DateTime, Utc};

use super::http_date::parse_http_date;
use super::types::RequestHeaderSnapshot;

/// Conditional request headers after normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConditionalHeaders {
    /// First entity tag of `If-None-Match`.
    pub if_none_match: Option<String>,
    /// Note count embedded in that entity tag.
    pub previous_notes_count: Option<usize>,
    /// Parsed `If-Modified-Since`.
    pub if_modified_since: Option<DateTime<Utc>>,
}

impl ConditionalHeaders {
    pub fn from_snapshot(snapshot: &RequestHeaderSnapshot) -> Self {
        let if_none_match = snapshot
            .if_none_match
            .as_deref()
            .and_then(normalize_if_none_match);

        let previous_notes_count = if_none_match.as_deref().and_then(parse_etag_note_count);

        let if_modified_since = snapshot
            .if_modified_since
            .as_deref()
            .and_then(parse_http_date);

        Self {
            if_none_match,
            previous_notes_count,
            if_modified_since,
        }
    }
}

/// Returns the first entity tag of an `If-None-Match` list, trimmed.
///
/// An empty first entry is treated as if the header were absent.
///
/// # Examples
///
/// ```
/// use journal_core::cache_policy::normalize_if_none_match;
///
/// assert_eq!(
///     normalize_if_none_match(r#" W/"a", W/"b""#),
///     Some(r#"W/"a""#.to_string())
/// );
/// assert_eq!(normalize_if_none_match(" , W/\"b\""), None);
/// ```
pub fn normalize_if_none_match(value: &str) -> Option<String> {
    let first = value.split(',').next()?.trim();
    if first.is_empty() {
        None
    } else {
        Some(first.to_string())
    }
}

/// Extracts `<n>` from an entity tag ending in `count:<n>"`.
pub fn parse_etag_note_count(etag: &str) -> Option<usize> {
    let start = etag.rfind("count:")? + "count:".len();
    let digits = etag[start..].strip_suffix('"')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
