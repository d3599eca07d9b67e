//! Human-readable note ages ("Today at 03:07 PM", "Yesterday", "3 days ago").

use std::fmt::Display;

use chrono::{DateTime, Datelike, TimeZone, Utc};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Format `timestamp` relative to `now`, in `now`'s time zone.
///
/// Days are whole 24-hour periods of elapsed time, not calendar days, so a
/// note written at 23:00 still reads "Today" at 01:00 the next morning.
pub fn format_age<Tz>(timestamp: DateTime<Utc>, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let local = timestamp.with_timezone(&now.timezone());
    let days = (now.timestamp_millis() - timestamp.timestamp_millis()).abs() / MILLIS_PER_DAY;

    match days {
        0 => format!("Today at {}", local.format("%I:%M %p")),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{} days ago", days),
        _ if local.year() != now.year() => local.format("%b %-d, %Y").to_string(),
        _ => local.format("%b %-d").to_string(),
    }
}
