// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, Local, NaiveDateTime, SecondsFormat, Utc};
use chrono_tz::Tz;

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse an IANA timezone name such as `Europe/London`.
pub fn parse_timezone(name: &str) -> Option<Tz> {
    name.trim().parse::<Tz>().ok()
}

/// Wall-clock time of `instant` in the named timezone.
///
/// Falls back to the server's local timezone when the name is missing or
/// unknown.
pub fn localize(instant: DateTime<Utc>, timezone: Option<&str>) -> NaiveDateTime {
    match timezone.and_then(parse_timezone) {
        Some(tz) => instant.with_timezone(&tz).naive_local(),
        None => {
            tracing::debug!(timezone = ?timezone, "Unknown timezone, using server local time");
            instant.with_timezone(&Local).naive_local()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn test_localize_known_timezone() {
        // 2024-07-01 12:30 UTC is 13:30 BST
        let instant = Utc.with_ymd_and_hms(2024, 7, 1, 12, 30, 0).unwrap();
        let local = localize(instant, Some("Europe/London"));
        assert_eq!(local.hour(), 13);
        assert_eq!(local.minute(), 30);
    }

    #[test]
    fn test_localize_unknown_timezone_falls_back() {
        let instant = Utc.with_ymd_and_hms(2024, 7, 1, 12, 30, 0).unwrap();
        let expected = instant.with_timezone(&Local).naive_local();
        assert_eq!(localize(instant, Some("Mars/Olympus_Mons")), expected);
        assert_eq!(localize(instant, None), expected);
        assert_eq!(localize(instant, Some("")), expected);
    }

    #[test]
    fn test_format_utc_rfc3339() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(format_utc_rfc3339(instant), "2024-01-02T03:04:05Z");
    }
}
