//! Time utilities and the injectable clock seam

use std::sync::LazyLock;

use chrono::{DateTime, Duration, Utc};
use regex::Regex;

/// Wall clock source. Core logic never reads the system clock directly;
/// it goes through this trait so expiry comparisons are testable.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

static DURATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*(hour|hr|minute|min)").expect("valid duration regex"));

/// Parse a human-readable session duration like "2 hours" or "45 min".
///
/// Unit keywords `hour`/`hr` map to hours, `minute`/`min` to minutes,
/// case-insensitively. Anything unparseable falls back to 1 hour.
pub fn parse_duration(s: &str) -> Duration {
    if let Some(caps) = DURATION_RE.captures(s) {
        let value: i64 = caps[1].parse().unwrap_or(1);
        let unit = caps[2].to_lowercase();

        if unit.starts_with("hour") || unit == "hr" {
            return Duration::hours(value);
        }
        return Duration::minutes(value);
    }

    Duration::hours(1)
}

/// Calendar-day difference between two instants (UTC midnights)
pub fn days_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> i64 {
    (later.date_naive() - earlier.date_naive()).num_days()
}

/// Parse a datetime string in ISO 8601 format
pub fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_duration_hours() {
        assert_eq!(parse_duration("2 hours"), Duration::hours(2));
        assert_eq!(parse_duration("1 hour"), Duration::hours(1));
        assert_eq!(parse_duration("3 hrs"), Duration::hours(3));
        assert_eq!(parse_duration("2 HOURS"), Duration::hours(2));
    }

    #[test]
    fn test_parse_duration_minutes() {
        assert_eq!(parse_duration("45 minutes"), Duration::minutes(45));
        assert_eq!(parse_duration("30 min"), Duration::minutes(30));
        assert_eq!(parse_duration("90 Minutes"), Duration::minutes(90));
    }

    #[test]
    fn test_parse_duration_fallback() {
        assert_eq!(parse_duration("garbage"), Duration::hours(1));
        assert_eq!(parse_duration(""), Duration::hours(1));
        assert_eq!(parse_duration("two hours"), Duration::hours(1));
    }

    #[test]
    fn test_days_between() {
        let a = Utc.with_ymd_and_hms(2024, 1, 15, 23, 59, 0).unwrap();
        let b = Utc.with_ymd_and_hms(2024, 1, 16, 0, 1, 0).unwrap();
        // Two minutes apart but across a midnight boundary
        assert_eq!(days_between(a, b), 1);

        let same_day = Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap();
        assert_eq!(days_between(same_day, a), 0);

        let much_later = Utc.with_ymd_and_hms(2024, 1, 20, 12, 0, 0).unwrap();
        assert_eq!(days_between(a, much_later), 5);
    }

    #[test]
    fn test_parse_datetime() {
        assert!(parse_datetime("2024-01-15T12:00:00Z").is_some());
        assert!(parse_datetime("not a date").is_none());
    }

    #[test]
    fn test_mock_clock() {
        let mut clock = MockClock::new();
        let fixed = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        clock.expect_now().return_const(fixed);
        assert_eq!(clock.now(), fixed);
    }
}
