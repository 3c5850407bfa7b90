use std::fs::{self, File};
use std::path::Path;
use std::time::{Duration, SystemTime};

use sumfiles_scan::{
    FileEvent, GroupMode, IngestPipeline, Ingested, ScanError, Scanner, SniffOracle, Summary,
    SummaryConfig,
};
use tempfile::TempDir;

const DAY: Duration = Duration::from_secs(24 * 60 * 60);

fn now() -> SystemTime {
    // 2025-01-01T00:00:00Z
    SystemTime::UNIX_EPOCH + Duration::from_secs(1_735_689_600)
}

#[test]
fn extension_summary_of_mixed_files() {
    let config = SummaryConfig::new("/src");
    let pipeline = IngestPipeline::new(&config, SniffOracle::new()).with_now(now());
    let mut summary = Summary::new("/src", GroupMode::Extension);
    let old = now() - DAY * 400;

    for (name, size) in [("a.go", 500), ("b.go", 2000), ("c.txt", 10)] {
        let path = Path::new("/src").join(name);
        let result = pipeline.ingest(&mut summary, &FileEvent::file(&path, size, old));
        assert!(matches!(result, Ok(Ingested::Grouped { .. })));
    }

    let entries = summary.entries().unwrap();
    let go = entries.get("go").unwrap();
    assert_eq!((go.file_count, go.total_bytes), (2, 2500));
    let txt = entries.get("txt").unwrap();
    assert_eq!((txt.file_count, txt.total_bytes), (1, 10));
    assert_eq!(summary.total, 2510);
    assert_eq!(summary.min_mod_time, Some(old));
    assert_eq!(summary.max_mod_time, Some(old));
}

#[test]
fn time_mode_scan_reads_modification_times() {
    let temp = TempDir::new().unwrap();
    let fresh = temp.path().join("fresh.log");
    let stale = temp.path().join("stale.log");
    fs::write(&fresh, "x").unwrap();
    fs::write(&stale, "yy").unwrap();
    File::options()
        .write(true)
        .open(&stale)
        .unwrap()
        .set_modified(SystemTime::now() - DAY * 800)
        .unwrap();

    let config = SummaryConfig::builder()
        .root(temp.path())
        .mode(GroupMode::Time)
        .build()
        .unwrap();
    let scanner = Scanner::new(config).unwrap();
    let mut summary = scanner.new_summary();
    let outcome = scanner.run(&mut summary, |_| {});

    assert!(outcome.is_complete());
    let groups = summary.groups().unwrap();
    assert!(groups.contains_key("01month"));
    assert!(groups.contains_key("03older"));
    assert_eq!(summary.total, 3);
}

#[test]
fn line_mode_skips_binary_files() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("notes.txt"), "a\nb\nc\n").unwrap();
    fs::write(temp.path().join("blob.txt"), [0u8, b'\n', b'\n']).unwrap();

    let config = SummaryConfig::builder()
        .root(temp.path())
        .count_lines(true)
        .build()
        .unwrap();
    let scanner = Scanner::new(config).unwrap();
    let mut summary = scanner.new_summary();
    scanner.run(&mut summary, |_| {});

    let txt = summary.entries().unwrap().get("txt").unwrap();
    assert_eq!(txt.file_count, 2);
    assert_eq!(txt.line_count, 3);
    assert_eq!(summary.exception_count, 0);
}

#[test]
fn refresh_callback_sees_partial_summaries() {
    let temp = TempDir::new().unwrap();
    for i in 0..5 {
        fs::write(temp.path().join(format!("f{i}.dat")), "data").unwrap();
    }

    let config = SummaryConfig::builder()
        .root(temp.path())
        .refresh_interval(Duration::from_nanos(1))
        .build()
        .unwrap();
    let scanner = Scanner::new(config).unwrap();
    let mut summary = scanner.new_summary();
    let mut seen = Vec::new();
    scanner.run(&mut summary, |live| seen.push(live.files_seen));

    assert!(!seen.is_empty());
    assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    assert!(seen.iter().all(|&n| n <= summary.files_seen));
    assert_eq!(summary.files_seen, 5);
}

#[test]
fn hidden_entries_can_be_skipped() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join(".cache")).unwrap();
    fs::write(temp.path().join(".cache/blob.bin"), "1234").unwrap();
    fs::write(temp.path().join("visible.md"), "12").unwrap();

    let config = SummaryConfig::builder()
        .root(temp.path())
        .include_hidden(false)
        .build()
        .unwrap();
    let scanner = Scanner::new(config).unwrap();
    let mut summary = scanner.new_summary();
    scanner.run(&mut summary, |_| {});

    assert_eq!(summary.total, 2);
    assert!(summary.entries().unwrap().get("bin").is_none());
}

#[test]
fn missing_root_reports_walk_error() {
    let temp = TempDir::new().unwrap();
    let scanner = Scanner::new(SummaryConfig::new(temp.path().join("nope"))).unwrap();
    let mut summary = scanner.new_summary();

    let outcome = scanner.run(&mut summary, |_| {});
    assert!(matches!(outcome.error, Some(ScanError::Walk { .. })));
    assert_eq!(summary.entry_count(), 0);
}
