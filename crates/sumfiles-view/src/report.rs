//! Final summary outputs: the `file_summary.txt` log and JSON export.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use sumfiles_core::{GroupMode, ScanError, StatEntry, Summary};

use crate::ViewOptions;
use crate::format::format_entry;
use crate::layout::select_entries;

/// Name of the log written by `--log`.
pub const LOG_FILE_NAME: &str = "file_summary.txt";

/// Write one unpadded line per displayed entry, in display order.
///
/// Returns the number of lines written.
pub fn write_log<W: Write>(
    mut out: W,
    summary: &Summary,
    opts: &ViewOptions,
) -> std::io::Result<usize> {
    let entries = select_entries(summary, opts);
    for entry in &entries {
        writeln!(out, "{}", format_entry(entry, opts))?;
    }
    out.flush()?;
    Ok(entries.len())
}

/// Create (or overwrite) the log file in `dir`.
pub fn write_log_file(
    dir: &Path,
    summary: &Summary,
    opts: &ViewOptions,
) -> Result<PathBuf, ScanError> {
    let path = dir.join(LOG_FILE_NAME);
    let file = File::create(&path).map_err(|e| ScanError::io(&path, e))?;
    let mut writer = BufWriter::new(file);
    let lines = write_log(&mut writer, summary, opts).map_err(|e| ScanError::io(&path, e))?;
    writer
        .into_inner()
        .map_err(|e| ScanError::io(&path, e.into_error()))?
        .sync_all()
        .map_err(|e| ScanError::io(&path, e))?;

    debug!(path = %path.display(), lines, "wrote summary log");
    Ok(path)
}

/// Serializable view of a finished run.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    pub root: PathBuf,
    pub mode: GroupMode,
    pub count_lines: bool,
    pub total_bytes: u64,
    pub files_seen: u64,
    pub exception_count: u64,
    pub min_mod_time: Option<DateTime<Utc>>,
    pub max_mod_time: Option<DateTime<Utc>>,
    /// Displayed entries, in display order.
    pub entries: Vec<ReportEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub group: String,
    pub label: String,
    pub total_bytes: u64,
    pub line_count: u64,
    pub file_count: u64,
    pub min_mod_time: DateTime<Utc>,
    pub max_mod_time: DateTime<Utc>,
}

impl From<&StatEntry> for ReportEntry {
    fn from(entry: &StatEntry) -> Self {
        Self {
            group: entry.group.to_string(),
            label: entry.label.to_string(),
            total_bytes: entry.total_bytes,
            line_count: entry.line_count,
            file_count: entry.file_count,
            min_mod_time: entry.min_mod_time.into(),
            max_mod_time: entry.max_mod_time.into(),
        }
    }
}

impl SummaryReport {
    pub fn new(summary: &Summary, opts: &ViewOptions) -> Self {
        Self {
            root: summary.root.clone(),
            mode: summary.mode(),
            count_lines: opts.count_lines,
            total_bytes: summary.total,
            files_seen: summary.files_seen,
            exception_count: summary.exception_count,
            min_mod_time: summary.min_mod_time.map(utc),
            max_mod_time: summary.max_mod_time.map(utc),
            entries: select_entries(summary, opts)
                .into_iter()
                .map(ReportEntry::from)
                .collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn utc(time: SystemTime) -> DateTime<Utc> {
    time.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;
    use sumfiles_core::GroupKey;
    use tempfile::TempDir;

    fn at(secs: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
    }

    fn sample(mode: GroupMode) -> Summary {
        let mut summary = Summary::new("/work", mode);
        let keys = match mode {
            GroupMode::Extension => [GroupKey::extension("go"), GroupKey::extension("md")],
            GroupMode::Time => [
                GroupKey::age("01month", "2024-12-31"),
                GroupKey::age("03older", "2020"),
            ],
        };
        for (key, size) in keys.iter().zip([4096, 2048]) {
            summary.record_file(size, at(1_700_000_000));
            summary.add_or_update(key, size, at(1_700_000_000)).unwrap();
        }
        summary.record_file(10, at(1_700_000_000));
        summary
            .add_or_update(&keys[0], 10, at(1_700_000_000))
            .unwrap();
        summary
    }

    #[test]
    fn test_write_log_lines() {
        let summary = sample(GroupMode::Extension);
        let mut out = Vec::new();
        let lines = write_log(&mut out, &summary, &ViewOptions::default()).unwrap();

        assert_eq!(lines, 2);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "        go:       4.0K in 2 files\n        md:       2.0K in 1 files\n"
        );
    }

    #[test]
    fn test_write_log_uses_time_order() {
        let summary = sample(GroupMode::Time);
        let mut out = Vec::new();
        write_log(&mut out, &summary, &ViewOptions::new(GroupMode::Time, false)).unwrap();

        let text = String::from_utf8(out).unwrap();
        let labels: Vec<&str> = text
            .lines()
            .map(|l| l.split(':').next().unwrap().trim())
            .collect();
        assert_eq!(labels, ["2024-12-31", "2020"]);
    }

    #[test]
    fn test_write_log_file_overwrites() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(LOG_FILE_NAME), "stale contents\n".repeat(50)).unwrap();

        let summary = sample(GroupMode::Extension);
        let path = write_log_file(temp.path(), &summary, &ViewOptions::default()).unwrap();

        assert_eq!(path, temp.path().join(LOG_FILE_NAME));
        let text = fs::read_to_string(path).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(!text.contains("stale"));
    }

    #[test]
    fn test_write_log_file_missing_dir() {
        let temp = TempDir::new().unwrap();
        let err = write_log_file(
            &temp.path().join("absent"),
            &sample(GroupMode::Extension),
            &ViewOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ScanError::NotFound { .. }));
    }

    #[test]
    fn test_json_report() {
        let summary = sample(GroupMode::Time);
        let report = SummaryReport::new(&summary, &ViewOptions::new(GroupMode::Time, false));
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(value["mode"], "time");
        assert_eq!(value["total_bytes"], 4096 + 2048 + 10);
        assert_eq!(value["files_seen"], 3);
        assert_eq!(value["entries"][0]["group"], "01month");
        assert_eq!(value["entries"][0]["file_count"], 2);
        assert_eq!(value["min_mod_time"], "2023-11-14T22:13:20Z");
    }
}
