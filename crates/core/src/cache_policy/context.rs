use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

use super::types::CacheContext;

/// Offset of the timezone that defines "today" (UTC+09:00).
pub const REFERENCE_UTC_OFFSET_SECONDS: i32 = 9 * 60 * 60;

/// Returns the calendar date of `now` in the reference timezone.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use journal_core::cache_policy::reference_today;
///
/// // 20:00 UTC is already the next morning in UTC+9.
/// let now = Utc.with_ymd_and_hms(2024, 3, 10, 20, 0, 0).unwrap();
/// assert_eq!(reference_today(now), NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
/// ```
pub fn reference_today(now: DateTime<Utc>) -> NaiveDate {
    // A constant in range never fails; fall back to UTC to stay total.
    match FixedOffset::east_opt(REFERENCE_UTC_OFFSET_SECONDS) {
        Some(offset) => now.with_timezone(&offset).date_naive(),
        None => now.date_naive(),
    }
}

/// Classifies a `(selected_date, is_authenticated)` pair.
///
/// - future dates are never publicly cached
/// - authenticated viewers always get a private cache
/// - strictly past dates are candidates for `immutable`
pub fn derive_context(
    selected_date: NaiveDate,
    is_authenticated: bool,
    now: DateTime<Utc>,
) -> CacheContext {
    let day_diff = (selected_date - reference_today(now)).num_days();

    let is_future_date = day_diff > 0;

    CacheContext {
        should_use_public_cache: !is_authenticated && !is_future_date,
        is_immutable_candidate: day_diff < 0,
        is_recent_range: day_diff >= 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        // 2024-06-01T12:00:00+09:00
        Utc.with_ymd_and_hms(2024, 6, 1, 3, 0, 0).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_reference_today_ignores_utc_date() {
        let late_utc = Utc.with_ymd_and_hms(2024, 5, 31, 15, 0, 0).unwrap();
        assert_eq!(reference_today(late_utc), today());

        let early_utc = Utc.with_ymd_and_hms(2024, 5, 31, 14, 59, 59).unwrap();
        assert_eq!(
            reference_today(early_utc),
            NaiveDate::from_ymd_opt(2024, 5, 31).unwrap()
        );
    }

    #[test]
    fn test_yesterday_anonymous_is_public_and_immutable() {
        let context = derive_context(today() - Duration::days(1), false, now());

        assert!(context.should_use_public_cache);
        assert!(context.is_immutable_candidate);
        assert!(!context.is_recent_range);
    }

    #[test]
    fn test_today_anonymous_is_public_and_recent() {
        let context = derive_context(today(), false, now());

        assert!(context.should_use_public_cache);
        assert!(!context.is_immutable_candidate);
        assert!(context.is_recent_range);
    }

    #[test]
    fn test_tomorrow_anonymous_is_never_public() {
        let context = derive_context(today() + Duration::days(1), false, now());

        assert!(!context.should_use_public_cache);
        assert!(!context.is_immutable_candidate);
        assert!(context.is_recent_range);
    }

    #[test]
    fn test_authenticated_is_always_private() {
        for offset in [-30, -1, 0, 1, 30] {
            let context = derive_context(today() + Duration::days(offset), true, now());
            assert!(!context.should_use_public_cache, "offset {offset}");
        }
    }

    #[test]
    fn test_immutable_and_recent_are_exclusive() {
        for offset in -3..=3 {
            let context = derive_context(today() + Duration::days(offset), false, now());
            assert_ne!(context.is_immutable_candidate, context.is_recent_range);
        }
    }
}
