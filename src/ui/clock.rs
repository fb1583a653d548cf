use chrono::{Duration, NaiveDateTime};

/// Remaining time as MM:SS; minutes keep counting past 99
pub fn format_time(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Wall clock time at which `remaining` seconds from `now` run out.
/// Includes the weekday when the period crosses midnight.
pub fn end_time(now: NaiveDateTime, remaining: u64) -> Option<String> {
    if remaining > (i64::MAX / 1000) as u64 {
        return None;
    }
    let end = now.checked_add_signed(Duration::seconds(remaining as i64))?;
    if end.date() == now.date() {
        Some(end.format("%H:%M").to_string())
    } else {
        Some(end.format("%a %H:%M").to_string())
    }
}
