//! Meeting-time strings as printed by the registry's class schedule pages.
//!
//! A meeting string looks like `"MoWe 09:00AM - 10:20AM"`. Day tokens map to
//! weekday integers (Mo=1 .. Sa=6, Su=0) and clock times become decimal hours
//! rounded to two places.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

static TIME_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2}):(\d{2})(AM|PM)\s*-\s*(\d{2}):(\d{2})(AM|PM)").unwrap()
});

const DAY_TOKENS: [(&str, u8); 7] = [
    ("Mo", 1),
    ("Tu", 2),
    ("We", 3),
    ("Th", 4),
    ("Fr", 5),
    ("Sa", 6),
    ("Su", 0),
];

/// Days and hours extracted from a meeting string.
#[derive(Debug, Clone, PartialEq)]
pub struct MeetingTime {
    pub days: BTreeSet<u8>,
    pub start: f64,
    pub end: f64,
}

/// Parse a meeting string. Returns `None` for `"TBA"`, empty input or
/// anything without a recognizable time range.
pub fn parse_meeting_time(raw: &str) -> Option<MeetingTime> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "TBA" {
        return None;
    }

    let days = DAY_TOKENS
        .iter()
        .filter(|(token, _)| raw.contains(token))
        .map(|(_, day)| *day)
        .collect();

    let caps = TIME_RANGE_RE.captures(raw)?;
    let start = to_decimal_hours(&caps[1], &caps[2], &caps[3])?;
    let end = to_decimal_hours(&caps[4], &caps[5], &caps[6])?;

    Some(MeetingTime { days, start, end })
}

fn to_decimal_hours(hour: &str, minute: &str, period: &str) -> Option<f64> {
    let mut hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;
    match period {
        "PM" if hour != 12 => hour += 12,
        "AM" if hour == 12 => hour = 0,
        _ => {}
    }
    let value = hour as f64 + minute as f64 / 60.0;
    Some((value * 100.0).round() / 100.0)
}
