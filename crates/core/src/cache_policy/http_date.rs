//! Date parsing and formatting at the HTTP boundary.
//!
//! All parsers are lenient and total: anything unrecognised is `None`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Timelike, Utc};

/// Formats an instant as an IMF-fixdate (`Mon, 01 Jan 2024 10:00:00 GMT`).
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use journal_core::cache_policy::format_http_date;
///
/// let instant = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
/// assert_eq!(format_http_date(instant), "Mon, 01 Jan 2024 10:00:00 GMT");
/// ```
pub fn format_http_date(instant: DateTime<Utc>) -> String {
    instant.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Parses an HTTP-date header value.
///
/// Accepts IMF-fixdate/RFC 2822, RFC 850 and asctime forms, plus RFC 3339
/// timestamps sent by non-conforming clients.
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    httpdate::parse_http_date(value)
        .ok()
        .map(DateTime::<Utc>::from)
        .or_else(|| {
            DateTime::parse_from_rfc2822(value)
                .or_else(|_| DateTime::parse_from_rfc3339(value))
                .map(|dt| dt.with_timezone(&Utc))
                .ok()
        })
}

/// Parses a note's `updatedAt` value.
///
/// Offset-less timestamps and bare dates are read as UTC.
pub fn parse_updated_at(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// UTC midnight of a calendar date.
pub(crate) fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::default()).and_utc()
}

/// `2024-01-01T00:00:00.000Z`
pub(crate) fn format_iso_millis(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Drops the sub-second component.
pub(crate) fn truncate_to_seconds(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant.with_nanosecond(0).unwrap_or(instant)
}
