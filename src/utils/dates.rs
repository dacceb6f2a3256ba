//! Date and time utilities

use chrono::{DateTime, Local, Utc};

/// Today's date as `YYYY-MM-DD`, the format release dates are stored in
pub fn today_iso() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Convert timestamp to relative time string (e.g., "2 hours ago")
pub fn timestamp_to_relative(timestamp: i64) -> String {
    let dt = DateTime::from_timestamp(timestamp, 0).unwrap_or_else(Utc::now);
    chrono_humanize::HumanTime::from(dt).to_string()
}
