//! Session planning: how many fixed-length sessions fit, and when each one starts.

use chrono::{Duration, NaiveTime};

/// Number of whole sessions that fit in the playing window. Zero-length sessions fit none.
pub fn session_count(total_minutes: u32, session_minutes: u32) -> u32 {
    if session_minutes == 0 {
        return 0;
    }
    total_minutes / session_minutes
}

/// Parse "HH:MM"; anything unparseable is treated as midnight.
fn parse_start(start_time: &str) -> NaiveTime {
    NaiveTime::parse_from_str(start_time.trim(), "%H:%M").unwrap_or_default()
}

/// Clock time ("HH:MM") at which session `index` (0-based) starts, wrapping past midnight.
pub fn session_time(start_time: &str, index: u32, session_minutes: u32) -> String {
    let offset = Duration::minutes(i64::from(index) * i64::from(session_minutes));
    let (time, _) = parse_start(start_time).overflowing_add_signed(offset);
    time.format("%H:%M").to_string()
}
