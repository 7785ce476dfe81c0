//! Utilities for date and time formatting
//!
//! Timestamps arrive in UTC and are shown in the browser's local offset.
use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};

/// Format a timestamp like "Mar 15, 2024, 02:02 PM"
pub fn format_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    dt.format("%b %-d, %Y, %I:%M %p").to_string()
}

/// Shift a UTC timestamp by an offset given in minutes west of UTC
/// (the sign convention of `Date.getTimezoneOffset`).
pub fn with_offset_minutes(dt: DateTime<Utc>, minutes_west: i32) -> DateTime<FixedOffset> {
    let offset = FixedOffset::west_opt(minutes_west * 60).unwrap_or_else(|| Utc.fix());
    dt.with_timezone(&offset)
}

/// Format in the browser's local time zone
pub fn format_local_datetime(dt: DateTime<Utc>) -> String {
    let minutes_west = js_sys::Date::new(&wasm_bindgen::JsValue::from_f64(
        dt.timestamp_millis() as f64,
    ))
    .get_timezone_offset() as i32;
    format_datetime(&with_offset_minutes(dt, minutes_west))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-03-15T14:02:26.123Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_format_datetime() {
        assert_eq!(format_datetime(&sample()), "Mar 15, 2024, 02:02 PM");
    }

    #[test]
    fn test_offsets() {
        // UTC-5 (getTimezoneOffset() == 300)
        assert_eq!(
            format_datetime(&with_offset_minutes(sample(), 300)),
            "Mar 15, 2024, 09:02 AM"
        );
        // UTC+3
        assert_eq!(
            format_datetime(&with_offset_minutes(sample(), -180)),
            "Mar 15, 2024, 05:02 PM"
        );
    }

    #[test]
    fn test_invalid_offset_falls_back_to_utc() {
        assert_eq!(
            format_datetime(&with_offset_minutes(sample(), 100_000)),
            "Mar 15, 2024, 02:02 PM"
        );
    }
}
