use std::path::Path;
use std::time::{Duration, SystemTime};

use chrono::Utc;
use sumfiles_analyze::{AgeTier, BucketConfig, Extension, OtherReason, TimeBucketer};
use sumfiles_core::{GroupMode, Summary};

const DAY: u64 = 24 * 60 * 60;

fn now() -> SystemTime {
    // 2025-01-01T00:00:00Z
    SystemTime::UNIX_EPOCH + Duration::from_secs(1_735_689_600)
}

#[test]
fn test_bucket_boundaries_are_deterministic() {
    let bucketer = TimeBucketer::new();
    let now = now();
    let cases = [
        (29, AgeTier::Recent),
        (30, AgeTier::ThisYear),
        (364, AgeTier::ThisYear),
        (365, AgeTier::Older),
    ];

    for (age, expected) in cases {
        let modified = now - Duration::from_secs(age * DAY);
        for _ in 0..3 {
            assert_eq!(
                bucketer.classify_in(modified, now, &Utc).tier,
                expected,
                "age {age} days"
            );
        }
    }
}

#[test]
fn test_buckets_route_into_time_summary() {
    let bucketer = TimeBucketer::new();
    let now = now();
    let mut summary = Summary::new("/srv", GroupMode::Time);

    for age in [1, 2, 1, 40, 800] {
        let modified = now - Duration::from_secs(age * DAY);
        let key = bucketer.classify_in(modified, now, &Utc).into_key();
        summary.add_or_update(&key, 100, modified).unwrap();
    }

    let groups = summary.groups().unwrap();
    let names: Vec<&str> = groups.keys().map(|k| k.as_str()).collect();
    assert_eq!(names, ["01month", "02year", "03older"]);
    assert_eq!(groups["01month"].entries.get("2024-12-31").unwrap().file_count, 2);
    assert_eq!(groups["01month"].entries.get("2024-12-30").unwrap().file_count, 1);
    assert_eq!(groups["02year"].entries.get("2024-11").unwrap().file_count, 1);
    assert_eq!(groups["03older"].entries.get("2022").unwrap().file_count, 1);
}

#[test]
fn test_bucket_config_defaults() {
    let config = BucketConfig::default();
    assert_eq!(config.recent_days, 30);
    assert_eq!(config.year_days, 365);

    let built = BucketConfig::builder().build().unwrap();
    assert_eq!(built.recent_days, 30);
    assert_eq!(built.year_days, 365);
}

#[test]
fn test_extension_dropout_cases() {
    assert_eq!(
        Extension::of(Path::new("/backups/archive.tar.gz.backup.toolongext")),
        Extension::Other(OtherReason::TooLong)
    );
    assert_eq!(
        Extension::of(Path::new("/backups/LICENSE")),
        Extension::Other(OtherReason::NoDot)
    );
    assert_eq!(
        Extension::of(Path::new("/backups/archive.tar.gz.backup.longext")),
        Extension::Known("longext".into())
    );
}
