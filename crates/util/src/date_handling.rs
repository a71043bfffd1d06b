//! # Date Handling Utilities
//!
//! Formats notification timestamps relative to "now" for compact display in
//! the bell list.

use chrono::{DateTime, Utc};

/// Formats `timestamp` relative to `now`.
///
/// Under a minute reads "just now"; then minutes, hours, and days up to a
/// week; anything older (or in the future by more than a minute) falls back
/// to a `MM/DD/YYYY` date.
///
/// # Example
/// ```rust
/// use chrono::{Duration, Utc};
/// use driverconnect_util::date_handling::format_relative;
///
/// let now = Utc::now();
/// assert_eq!(format_relative(now - Duration::minutes(5), now), "5m ago");
/// ```
pub fn format_relative(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(timestamp);
    let seconds = elapsed.num_seconds();
    if (-60..60).contains(&seconds) {
        return "just now".to_string();
    }
    if seconds < 0 {
        return format_date_mmddyyyy(timestamp);
    }

    let minutes = elapsed.num_minutes();
    if minutes < 60 {
        return format!("{minutes}m ago");
    }
    let hours = elapsed.num_hours();
    if hours < 24 {
        return format!("{hours}h ago");
    }
    let days = elapsed.num_days();
    if days < 7 {
        return format!("{days}d ago");
    }
    format_date_mmddyyyy(timestamp)
}

fn format_date_mmddyyyy(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%m/%d/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::format_relative;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn formats_each_bucket() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).single().expect("valid date");
        assert_eq!(format_relative(now - Duration::seconds(20), now), "just now");
        assert_eq!(format_relative(now - Duration::minutes(59), now), "59m ago");
        assert_eq!(format_relative(now - Duration::hours(3), now), "3h ago");
        assert_eq!(format_relative(now - Duration::days(2), now), "2d ago");
        assert_eq!(format_relative(now - Duration::days(30), now), "02/09/2024");
    }

    #[test]
    fn future_timestamps_fall_back_to_a_date() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).single().expect("valid date");
        assert_eq!(format_relative(now + Duration::seconds(30), now), "just now");
        assert_eq!(format_relative(now + Duration::days(1), now), "03/11/2024");
    }
}
