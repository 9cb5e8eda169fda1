use chrono::{DateTime, Duration, NaiveDate, Utc};

use super::config::CacheConfig;
use super::headers::ConditionalHeaders;
use super::http_date::{
    format_http_date, format_iso_millis, parse_updated_at, start_of_day, truncate_to_seconds,
};
use super::types::{CacheContext, CacheHeaders, CachePolicy, RequestHeaderSnapshot};
use crate::notes::NoteSummary;

const VARY_PUBLIC: &str = "Accept-Encoding";
const VARY_PRIVATE: &str = "Cookie, Accept-Encoding";

/// Builds the cache headers and the "not modified" verdict for a notes list.
///
/// Never fails: unparseable `updatedAt` values are skipped and invalid
/// conditional headers count as absent, so the worst case is a full 200.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use journal_core::cache_policy::{
///     build_policy, derive_context, CacheConfig, RequestHeaderSnapshot,
/// };
/// use journal_core::notes::NoteSummary;
///
/// let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
/// let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let notes = vec![NoteSummary::new("n1").with_updated_at("2024-01-01T10:00:00Z")];
///
/// let context = derive_context(date, false, now);
/// let policy = build_policy(
///     date,
///     &notes,
///     &RequestHeaderSnapshot::default(),
///     &context,
///     &CacheConfig::default(),
///     now,
/// );
///
/// assert_eq!(
///     policy.headers.etag,
///     r#"W/"notes-2024-01-01T00:00:00.000Z-1704103200000-count:1""#
/// );
/// assert!(!policy.is_not_modified);
/// ```
pub fn build_policy(
    selected_date: NaiveDate,
    notes: &[NoteSummary],
    headers: &RequestHeaderSnapshot,
    context: &CacheContext,
    config: &CacheConfig,
    now: DateTime<Utc>,
) -> CachePolicy {
    let now = truncate_to_seconds(now);
    let selected_instant = start_of_day(selected_date);

    let latest_updated_at = latest_updated_at(selected_instant, notes);
    let conditional = ConditionalHeaders::from_snapshot(headers);

    let (last_modified, forced_timestamp_bump) =
        reconcile_last_modified(latest_updated_at, notes.len(), &conditional, now);

    let etag = format!(
        "W/\"notes-{}-{}-count:{}\"",
        format_iso_millis(selected_instant),
        last_modified.timestamp_millis(),
        notes.len()
    );

    let is_not_modified = match (&conditional.if_none_match, conditional.if_modified_since) {
        (Some(if_none_match), _) => *if_none_match == etag,
        (None, Some(if_modified_since)) if !forced_timestamp_bump => {
            last_modified <= if_modified_since
        }
        _ => false,
    };

    let vary = if context.should_use_public_cache {
        VARY_PUBLIC
    } else {
        VARY_PRIVATE
    };

    CachePolicy {
        should_use_public_cache: context.should_use_public_cache,
        headers: CacheHeaders {
            cache_control: cache_control_directives(context, config),
            etag,
            last_modified: format_http_date(last_modified),
            vary,
        },
        is_not_modified,
        forced_timestamp_bump,
    }
}

/// Newest parseable `updatedAt`, floored at `floor`, to whole seconds.
fn latest_updated_at(floor: DateTime<Utc>, notes: &[NoteSummary]) -> DateTime<Utc> {
    let latest = notes
        .iter()
        .filter_map(|note| note.updated_at.as_deref())
        .filter_map(parse_updated_at)
        .fold(floor, |latest, updated_at| latest.max(updated_at));

    truncate_to_seconds(latest)
}

/// Reconciles the computed timestamp with what the client already holds.
///
/// Returns the timestamp to advertise and whether it was bumped past
/// `If-Modified-Since` because the note count changed.
fn reconcile_last_modified(
    latest_updated_at: DateTime<Utc>,
    notes_count: usize,
    conditional: &ConditionalHeaders,
    now: DateTime<Utc>,
) -> (DateTime<Utc>, bool) {
    let Some(if_modified_since) = conditional.if_modified_since else {
        return (latest_updated_at, false);
    };

    let mut last_modified = latest_updated_at;

    // Never older than the client's copy, never in the future.
    if if_modified_since > last_modified {
        last_modified = if_modified_since.min(now);
    }

    let count_changed = conditional
        .previous_notes_count
        .is_some_and(|previous| previous != notes_count);

    if count_changed && last_modified <= if_modified_since {
        last_modified = now.min(if_modified_since + Duration::seconds(1));
        return (last_modified, true);
    }

    (last_modified, false)
}

fn cache_control_directives(context: &CacheContext, config: &CacheConfig) -> String {
    let mut directives = Vec::with_capacity(6);

    if context.should_use_public_cache {
        directives.push("public".to_string());
        directives.push(format!("max-age={}", config.public_max_age_seconds));

        let s_maxage = if context.is_recent_range {
            config.public_s_maxage_seconds
        } else {
            config.public_s_maxage_seconds.saturating_mul(2)
        };
        if s_maxage > 0 {
            directives.push(format!("s-maxage={s_maxage}"));
        }

        if config.public_stale_while_revalidate_seconds > 0 {
            directives.push(format!(
                "stale-while-revalidate={}",
                config.public_stale_while_revalidate_seconds
            ));
        }

        if context.is_immutable_candidate {
            directives.push("immutable".to_string());
        }
    } else {
        directives.push("private".to_string());
        directives.push(format!("max-age={}", config.private_max_age_seconds));

        if config.private_stale_while_revalidate_seconds > 0 {
            directives.push(format!(
                "stale-while-revalidate={}",
                config.private_stale_while_revalidate_seconds
            ));
        }

        directives.push("must-revalidate".to_string());
    }

    directives.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache_policy::context::derive_context;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    fn new_year() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn one_note() -> Vec<NoteSummary> {
        vec![NoteSummary::new("n1").with_updated_at("2024-01-01T10:00:00Z")]
    }

    fn policy_for(
        date: NaiveDate,
        notes: &[NoteSummary],
        headers: &RequestHeaderSnapshot,
        is_authenticated: bool,
    ) -> CachePolicy {
        let context = derive_context(date, is_authenticated, now());
        build_policy(
            date,
            notes,
            headers,
            &context,
            &CacheConfig::default(),
            now(),
        )
    }

    #[test]
    fn test_past_date_anonymous() {
        let policy = policy_for(
            new_year(),
            &one_note(),
            &RequestHeaderSnapshot::default(),
            false,
        );

        assert!(policy.should_use_public_cache);
        assert!(!policy.is_not_modified);
        assert!(!policy.forced_timestamp_bump);
        assert_eq!(
            policy.headers.etag,
            r#"W/"notes-2024-01-01T00:00:00.000Z-1704103200000-count:1""#
        );
        assert_eq!(policy.headers.last_modified, "Mon, 01 Jan 2024 10:00:00 GMT");
        assert_eq!(
            policy.headers.cache_control,
            "public, max-age=60, s-maxage=600, stale-while-revalidate=600, immutable"
        );
        assert_eq!(policy.headers.vary, "Accept-Encoding");
    }

    #[test]
    fn test_matching_etag_is_not_modified() {
        let first = policy_for(
            new_year(),
            &one_note(),
            &RequestHeaderSnapshot::default(),
            false,
        );
        let headers = RequestHeaderSnapshot::default().with_if_none_match(first.headers.etag);

        let second = policy_for(new_year(), &one_note(), &headers, false);

        assert!(second.is_not_modified);
    }

    #[test]
    fn test_etag_is_deterministic() {
        let a = policy_for(
            new_year(),
            &one_note(),
            &RequestHeaderSnapshot::default(),
            false,
        );
        let b = policy_for(
            new_year(),
            &one_note(),
            &RequestHeaderSnapshot::default(),
            false,
        );
        assert_eq!(a.headers.etag, b.headers.etag);
    }

    #[test]
    fn test_if_modified_since_equal_to_last_modified_is_not_modified() {
        let first = policy_for(
            new_year(),
            &one_note(),
            &RequestHeaderSnapshot::default(),
            false,
        );
        let headers =
            RequestHeaderSnapshot::default().with_if_modified_since(first.headers.last_modified);

        let second = policy_for(new_year(), &one_note(), &headers, false);

        assert!(second.is_not_modified);
    }

    #[test]
    fn test_newer_note_invalidates_if_modified_since() {
        let headers =
            RequestHeaderSnapshot::default().with_if_modified_since("Mon, 01 Jan 2024 09:59:59 GMT");

        let policy = policy_for(new_year(), &one_note(), &headers, false);

        assert!(!policy.is_not_modified);
        assert_eq!(policy.headers.last_modified, "Mon, 01 Jan 2024 10:00:00 GMT");
    }

    #[test]
    fn test_count_divergence_forces_bump() {
        let first = policy_for(
            new_year(),
            &one_note(),
            &RequestHeaderSnapshot::default(),
            false,
        );
        let headers = RequestHeaderSnapshot::default()
            .with_if_none_match(first.headers.etag.clone())
            .with_if_modified_since(first.headers.last_modified.clone());

        let policy = policy_for(new_year(), &[], &headers, false);

        assert!(policy.forced_timestamp_bump);
        assert!(!policy.is_not_modified);
        assert_eq!(policy.headers.last_modified, "Mon, 01 Jan 2024 10:00:01 GMT");
        assert!(policy.headers.etag.ends_with("-count:0\""));
    }

    #[test]
    fn test_etag_path_is_plain_equality_despite_count_divergence() {
        // Count 5 in the tag, 3 notes now: the bump happens on the
        // Last-Modified side, the ETag side only compares tags.
        let notes = vec![
            NoteSummary::new("a").with_updated_at("2024-01-01T10:00:00Z"),
            NoteSummary::new("b").with_updated_at("2024-01-01T11:00:00Z"),
            NoteSummary::new("c").with_updated_at("2024-01-01T12:00:00Z"),
        ];
        let stale_tag = r#"W/"notes-2024-01-01T00:00:00.000Z-1704110400000-count:5""#;
        let headers = RequestHeaderSnapshot::default()
            .with_if_none_match(stale_tag)
            .with_if_modified_since("Mon, 01 Jan 2024 12:00:00 GMT");

        let policy = policy_for(new_year(), &notes, &headers, false);

        assert!(policy.forced_timestamp_bump);
        assert_eq!(policy.is_not_modified, policy.headers.etag == stale_tag);
        assert!(!policy.is_not_modified);

        // Without If-None-Match there is no embedded count, so no bump.
        let headers =
            RequestHeaderSnapshot::default().with_if_modified_since("Mon, 01 Jan 2024 12:00:00 GMT");
        let policy = policy_for(new_year(), &notes, &headers, false);
        assert!(!policy.forced_timestamp_bump);
        assert!(policy.is_not_modified);
    }

    #[test]
    fn test_if_modified_since_newer_than_notes_is_adopted() {
        let headers =
            RequestHeaderSnapshot::default().with_if_modified_since("Fri, 01 Mar 2024 08:00:00 GMT");

        let policy = policy_for(new_year(), &one_note(), &headers, false);

        assert_eq!(policy.headers.last_modified, "Fri, 01 Mar 2024 08:00:00 GMT");
        assert!(policy.is_not_modified);
    }

    #[test]
    fn test_if_modified_since_in_future_is_capped_at_now() {
        let headers =
            RequestHeaderSnapshot::default().with_if_modified_since("Wed, 01 Jan 2025 00:00:00 GMT");

        let policy = policy_for(new_year(), &one_note(), &headers, false);

        assert_eq!(policy.headers.last_modified, "Sat, 01 Jun 2024 00:00:00 GMT");
        assert!(policy.is_not_modified);
    }

    #[test]
    fn test_forced_bump_is_capped_at_now() {
        let headers = RequestHeaderSnapshot::default()
            .with_if_none_match(r#"W/"notes-2024-01-01T00:00:00.000Z-1704103200000-count:5""#)
            .with_if_modified_since("Wed, 01 Jan 2025 00:00:00 GMT");

        let policy = policy_for(new_year(), &one_note(), &headers, false);

        assert!(policy.forced_timestamp_bump);
        assert_eq!(policy.headers.last_modified, format_http_date(now()));
        assert!(!policy.is_not_modified);
    }

    #[test]
    fn test_if_none_match_mismatch_overrides_if_modified_since() {
        // Same count as the current list, so no bump; only the tag decides.
        let headers = RequestHeaderSnapshot::default()
            .with_if_none_match(r#"W/"notes-2024-01-01T00:00:00.000Z-1704000000000-count:1""#)
            .with_if_modified_since("Mon, 01 Jan 2024 10:00:00 GMT");

        let policy = policy_for(new_year(), &one_note(), &headers, false);

        assert!(!policy.forced_timestamp_bump);
        assert_eq!(policy.headers.last_modified, "Mon, 01 Jan 2024 10:00:00 GMT");
        assert!(!policy.is_not_modified);
    }

    #[test]
    fn test_unparseable_updated_at_is_ignored() {
        let notes = vec![
            NoteSummary::new("a").with_updated_at("garbage"),
            NoteSummary::new("b"),
            NoteSummary::new("c").with_updated_at("2024-01-01T08:30:00.750Z"),
        ];

        let policy = policy_for(new_year(), &notes, &RequestHeaderSnapshot::default(), false);

        assert_eq!(policy.headers.last_modified, "Mon, 01 Jan 2024 08:30:00 GMT");
        assert!(policy.headers.etag.contains("-1704097800000-count:3"));
    }

    #[test]
    fn test_empty_notes_fall_back_to_selected_date() {
        let policy = policy_for(new_year(), &[], &RequestHeaderSnapshot::default(), false);

        assert_eq!(policy.headers.last_modified, "Mon, 01 Jan 2024 00:00:00 GMT");
        assert_eq!(
            policy.headers.etag,
            r#"W/"notes-2024-01-01T00:00:00.000Z-1704067200000-count:0""#
        );
    }

    #[test]
    fn test_invalid_if_modified_since_is_absent() {
        let headers = RequestHeaderSnapshot::default().with_if_modified_since("not a date");

        let policy = policy_for(new_year(), &one_note(), &headers, false);

        assert!(!policy.is_not_modified);
        assert_eq!(policy.headers.last_modified, "Mon, 01 Jan 2024 10:00:00 GMT");
    }

    #[test]
    fn test_authenticated_is_private() {
        let policy = policy_for(
            new_year(),
            &one_note(),
            &RequestHeaderSnapshot::default(),
            true,
        );

        assert!(!policy.should_use_public_cache);
        assert_eq!(
            policy.headers.cache_control,
            "private, max-age=0, stale-while-revalidate=30, must-revalidate"
        );
        assert_eq!(policy.headers.vary, "Cookie, Accept-Encoding");
    }

    #[test]
    fn test_today_public_uses_base_s_maxage() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        let policy = policy_for(today, &[], &RequestHeaderSnapshot::default(), false);

        assert_eq!(
            policy.headers.cache_control,
            "public, max-age=60, s-maxage=300, stale-while-revalidate=600"
        );
    }

    #[test]
    fn test_zero_valued_directives_are_omitted() {
        let config = CacheConfig {
            public_max_age_seconds: 0,
            private_max_age_seconds: 0,
            public_s_maxage_seconds: 0,
            public_stale_while_revalidate_seconds: 0,
            private_stale_while_revalidate_seconds: 0,
        };
        let headers = RequestHeaderSnapshot::default();

        let public = derive_context(new_year(), false, now());
        let policy = build_policy(new_year(), &[], &headers, &public, &config, now());
        assert_eq!(policy.headers.cache_control, "public, max-age=0, immutable");

        let private = derive_context(new_year(), true, now());
        let policy = build_policy(new_year(), &[], &headers, &private, &config, now());
        assert_eq!(
            policy.headers.cache_control,
            "private, max-age=0, must-revalidate"
        );
    }

    #[test]
    fn test_header_pairs_order() {
        let policy = policy_for(new_year(), &[], &RequestHeaderSnapshot::default(), false);
        let names: Vec<&str> = policy.header_pairs().iter().map(|(name, _)| *name).collect();
        assert_eq!(names, ["Cache-Control", "ETag", "Last-Modified", "Vary"]);
    }
}
