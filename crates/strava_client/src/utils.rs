//! Utility functions for reading activity timestamps.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Parse `start_date_local` into its wall-clock fields.
///
/// Strava labels local times with a trailing `Z` even though they are not
/// UTC, so any offset is dropped and the written date and time are kept
/// as-is. Accepts:
/// - YYYY-MM-DDTHH:MM:SSZ or any RFC3339 offset
/// - Naive datetime YYYY-MM-DDTHH:MM:SS (optionally fractional seconds)
/// - YYYY-MM-DD -> midnight
pub fn parse_start_local(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ndt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike, Weekday};

    #[test]
    fn parse_start_local_keeps_z_fields() {
        let dt = parse_start_local("2024-05-07T19:00:00Z").unwrap();
        assert_eq!(dt.weekday(), Weekday::Tue);
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (19, 0, 0));
    }

    #[test]
    fn parse_start_local_ignores_offset() {
        let dt = parse_start_local("2024-05-07T18:50:00+02:00").unwrap();
        assert_eq!((dt.hour(), dt.minute()), (18, 50));
    }

    #[test]
    fn parse_start_local_accepts_naive_and_fractional() {
        assert!(parse_start_local("2024-05-07T19:00:00").is_some());
        let dt = parse_start_local("2024-05-07T19:00:00.250").unwrap();
        assert_eq!(dt.second(), 0);
        assert!(parse_start_local("2024-05-07 19:00:00").is_some());
    }

    #[test]
    fn parse_start_local_date_only_is_midnight() {
        let dt = parse_start_local("2024-05-07").unwrap();
        assert_eq!((dt.hour(), dt.minute()), (0, 0));
    }

    #[test]
    fn parse_start_local_rejects_invalid() {
        assert!(parse_start_local("not-a-date").is_none());
        assert!(parse_start_local("").is_none());
        assert!(parse_start_local("2024-13-40T19:00:00Z").is_none());
    }
}
