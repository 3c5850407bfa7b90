//! Modification-time bucketing.
//!
//! Files are split into three tiers by age in whole days:
//! - recent (under 30 days), labelled by day `YYYY-MM-DD`
//! - this year (under 365 days), labelled by month `YYYY-MM`
//! - older, labelled by year `YYYY`
//!
//! Tier ids carry numeric prefixes so that sorting them as strings lists
//! the tiers from newest to oldest.

use std::time::{Duration, SystemTime};

use chrono::{DateTime, Local, TimeZone, Utc};
use compact_str::{CompactString, format_compact};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use sumfiles_core::GroupKey;

const SECS_PER_DAY: u64 = 24 * 60 * 60;

/// Coarse age tier of a file.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum AgeTier {
    /// Modified within the recent window.
    #[strum(serialize = "recent")]
    Recent,
    /// Modified within the year window.
    #[strum(serialize = "this-year")]
    ThisYear,
    /// Anything older.
    #[strum(serialize = "older")]
    Older,
}

impl AgeTier {
    /// Group id used as the coarse key; ids sort in tier order.
    pub fn group_id(self) -> &'static str {
        match self {
            Self::Recent => "01month",
            Self::ThisYear => "02year",
            Self::Older => "03older",
        }
    }

    /// Tier for a group id produced by [`AgeTier::group_id`].
    pub fn from_group_id(id: &str) -> Option<Self> {
        match id {
            "01month" => Some(Self::Recent),
            "02year" => Some(Self::ThisYear),
            "03older" => Some(Self::Older),
            _ => None,
        }
    }

    fn label_format(self) -> &'static str {
        match self {
            Self::Recent => "%Y-%m-%d",
            Self::ThisYear => "%Y-%m",
            Self::Older => "%Y",
        }
    }
}

/// Tier thresholds in days.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct BucketConfig {
    /// Files younger than this many days are recent.
    #[builder(default = "30")]
    pub recent_days: u64,

    /// Files younger than this many days (and not recent) are this year's.
    #[builder(default = "365")]
    pub year_days: u64,
}

impl BucketConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        let recent = self.recent_days.unwrap_or(30);
        let year = self.year_days.unwrap_or(365);
        if recent > year {
            return Err(format!(
                "recent window ({recent} days) exceeds year window ({year} days)"
            ));
        }
        Ok(())
    }
}

impl Default for BucketConfig {
    fn default() -> Self {
        Self {
            recent_days: 30,
            year_days: 365,
        }
    }
}

impl BucketConfig {
    /// Create a new config builder.
    pub fn builder() -> BucketConfigBuilder {
        BucketConfigBuilder::default()
    }
}

/// Result of classifying one modification time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeBucket {
    pub tier: AgeTier,
    /// Date of the modification, truncated to the tier's precision.
    pub label: CompactString,
}

impl TimeBucket {
    pub fn group(&self) -> &'static str {
        self.tier.group_id()
    }

    /// Key addressing this bucket inside a time-mode summary.
    pub fn into_key(self) -> GroupKey {
        GroupKey::age(self.tier.group_id(), self.label)
    }
}

/// Maps modification times to (tier, label) pairs.
#[derive(Debug, Clone, Default)]
pub struct TimeBucketer {
    config: BucketConfig,
}

impl TimeBucketer {
    /// Create a bucketer with the default 30/365 day windows.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BucketConfig) -> Self {
        Self { config }
    }

    /// Tier for a file that is `days` old.
    pub fn tier_for_age(&self, days: u64) -> AgeTier {
        if days < self.config.recent_days {
            AgeTier::Recent
        } else if days < self.config.year_days {
            AgeTier::ThisYear
        } else {
            AgeTier::Older
        }
    }

    /// Classify using the local time zone for labels.
    pub fn classify(&self, modified: SystemTime, now: SystemTime) -> TimeBucket {
        self.classify_in(modified, now, &Local)
    }

    /// Classify with labels rendered in `tz`.
    pub fn classify_in<Tz>(&self, modified: SystemTime, now: SystemTime, tz: &Tz) -> TimeBucket
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let tier = self.tier_for_age(age_in_days(modified, now));
        let date = DateTime::<Utc>::from(modified).with_timezone(tz);
        TimeBucket {
            tier,
            label: format_compact!("{}", date.format(tier.label_format())),
        }
    }
}

/// Whole days between `modified` and `now`; future times are zero days old.
pub fn age_in_days(modified: SystemTime, now: SystemTime) -> u64 {
    now.duration_since(modified)
        .unwrap_or(Duration::ZERO)
        .as_secs()
        / SECS_PER_DAY
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn days(n: u64) -> Duration {
        Duration::from_secs(n * SECS_PER_DAY)
    }

    fn fixed_now() -> SystemTime {
        // 2024-06-15T12:00:00Z
        SystemTime::UNIX_EPOCH + Duration::from_secs(1_718_452_800)
    }

    #[test]
    fn test_boundaries() {
        let bucketer = TimeBucketer::new();
        let now = fixed_now();

        let tier = |n| bucketer.classify_in(now - days(n), now, &Utc).tier;
        assert_eq!(tier(0), AgeTier::Recent);
        assert_eq!(tier(29), AgeTier::Recent);
        assert_eq!(tier(30), AgeTier::ThisYear);
        assert_eq!(tier(364), AgeTier::ThisYear);
        assert_eq!(tier(365), AgeTier::Older);
    }

    #[test]
    fn test_partial_days_round_down() {
        let bucketer = TimeBucketer::new();
        let now = fixed_now();
        let modified = now - days(30) + Duration::from_secs(1);
        assert_eq!(bucketer.classify_in(modified, now, &Utc).tier, AgeTier::Recent);
    }

    #[test]
    fn test_labels_follow_tier_precision() {
        let bucketer = TimeBucketer::new();
        let now = fixed_now();

        let recent = bucketer.classify_in(now - days(1), now, &Utc);
        assert_eq!(recent.label, "2024-06-14");
        assert_eq!(recent.group(), "01month");

        let year = bucketer.classify_in(now - days(100), now, &Utc);
        assert_eq!(year.label, "2024-03");
        assert_eq!(year.group(), "02year");

        let older = bucketer.classify_in(now - days(400), now, &Utc);
        assert_eq!(older.label, "2023");
        assert_eq!(older.group(), "03older");
    }

    #[test]
    fn test_future_mtime_is_recent() {
        let bucketer = TimeBucketer::new();
        let now = fixed_now();
        let bucket = bucketer.classify_in(now + days(3), now, &Utc);
        assert_eq!(bucket.tier, AgeTier::Recent);
        assert_eq!(age_in_days(now + days(3), now), 0);
    }

    #[test]
    fn test_group_ids_sort_in_tier_order() {
        let ids: Vec<&str> = AgeTier::iter().map(AgeTier::group_id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);

        for tier in AgeTier::iter() {
            assert_eq!(AgeTier::from_group_id(tier.group_id()), Some(tier));
        }
        assert_eq!(AgeTier::from_group_id("99never"), None);
    }

    #[test]
    fn test_tier_names() {
        assert_eq!(AgeTier::Recent.to_string(), "recent");
        assert_eq!(AgeTier::ThisYear.to_string(), "this-year");
        assert_eq!(AgeTier::Older.to_string(), "older");
    }

    #[test]
    fn test_custom_windows() {
        let config = BucketConfig::builder()
            .recent_days(7u64)
            .year_days(90u64)
            .build()
            .unwrap();
        let bucketer = TimeBucketer::with_config(config);
        assert_eq!(bucketer.tier_for_age(6), AgeTier::Recent);
        assert_eq!(bucketer.tier_for_age(7), AgeTier::ThisYear);
        assert_eq!(bucketer.tier_for_age(90), AgeTier::Older);

        assert!(BucketConfig::builder().recent_days(400u64).build().is_err());
    }

    #[test]
    fn test_into_key() {
        let bucket = TimeBucket {
            tier: AgeTier::Older,
            label: "2001".into(),
        };
        assert_eq!(bucket.into_key(), GroupKey::age("03older", "2001"));
    }
}
