//! Text formatting of sizes, dates, and entries.

use std::time::SystemTime;

use chrono::{DateTime, Local, TimeZone};

use sumfiles_core::StatEntry;

use crate::ViewOptions;

const KIB: f64 = 1024.0;
const MIB: u64 = 1024 * 1024;
const GIB: u64 = 1024 * 1024 * 1024;

/// Timestamp shown at the start of the status line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Date shown for the modification-time range.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Shown in place of a date before any file was seen.
pub const NO_DATE: &str = "----------";

/// Format bytes with one decimal, never below kilobyte granularity.
///
/// `500` is `"0.5K"`, `1_572_864` is `"1.5M"`, `2_147_483_648` is `"2.0G"`.
pub fn human_size(bytes: u64) -> String {
    if bytes >= GIB {
        format!("{:.1}G", bytes as f64 / GIB as f64)
    } else if bytes >= MIB {
        format!("{:.1}M", bytes as f64 / MIB as f64)
    } else {
        format!("{:.1}K", bytes as f64 / KIB)
    }
}

/// One entry as text, without padding.
pub fn format_entry(entry: &StatEntry, opts: &ViewOptions) -> String {
    if opts.count_lines {
        format!(
            "{:>10}: {:>10} lines in {} files",
            entry.label, entry.line_count, entry.file_count
        )
    } else {
        format!(
            "{:>10}: {:>10} in {} files",
            entry.label,
            human_size(entry.total_bytes),
            entry.file_count
        )
    }
}

/// A grid cell exactly `width` characters wide: a `|` separator followed
/// by `text`, padded or cut to fit.
pub fn fit_cell(text: &str, width: usize) -> String {
    let inner = width.saturating_sub(1);
    let cut: String = text.chars().take(inner).collect();
    format!("|{cut:<inner$}")
}

/// Cut `text` to at most `max` characters.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// Calendar date of `time` in the local timezone.
pub fn format_date(time: Option<SystemTime>) -> String {
    format_date_in(time, &Local)
}

pub fn format_date_in<Tz: TimeZone>(time: Option<SystemTime>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match time {
        Some(time) => DateTime::<chrono::Utc>::from(time)
            .with_timezone(tz)
            .format(DATE_FORMAT)
            .to_string(),
        None => NO_DATE.to_string(),
    }
}
