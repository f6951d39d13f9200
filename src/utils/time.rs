//! Time utilities: stopwatch readout formatting and localized record timestamps.

use crate::models::SavedTimeRecord;

/// Format a second count as `HH:MM:SS`.
///
/// Every field is zero-padded to two digits. Hours are never wrapped, so
/// 100 hours and beyond simply print with more digits.
pub fn format_time(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Localized creation timestamp of a record, or the raw value when the store
/// returned something we cannot parse.
pub fn format_created_at(record: &SavedTimeRecord) -> String {
    match record.created_at_local() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => record.created_at.clone(),
    }
}
