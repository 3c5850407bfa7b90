//! Root aggregate for one run.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::config::GroupMode;
use crate::entry::{EntryMap, StatEntry};
use crate::error::ScanError;

/// Where a file's statistics are routed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupKey {
    /// Flat key: a file extension.
    Extension(CompactString),
    /// Age tier id plus date label within it.
    Age {
        group: CompactString,
        label: CompactString,
    },
}

impl GroupKey {
    pub fn extension(ext: impl Into<CompactString>) -> Self {
        Self::Extension(ext.into())
    }

    pub fn age(group: impl Into<CompactString>, label: impl Into<CompactString>) -> Self {
        Self::Age {
            group: group.into(),
            label: label.into(),
        }
    }

    /// Display label of the key.
    pub fn label(&self) -> &str {
        match self {
            Self::Extension(ext) => ext.as_str(),
            Self::Age { label, .. } => label.as_str(),
        }
    }
}

/// Entries sharing one coarse age tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupBucket {
    /// Tier id; ids sort in tier order.
    pub name: CompactString,
    /// Entries keyed by date label.
    pub entries: EntryMap,
}

impl GroupBucket {
    pub fn new(name: impl Into<CompactString>) -> Self {
        let name = name.into();
        Self {
            entries: EntryMap::for_group(name.clone()),
            name,
        }
    }
}

/// The single active map shape of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "entries", rename_all = "lowercase")]
pub enum Grouping {
    /// Extension-keyed entries.
    Flat(EntryMap),
    /// Tier id -> bucket of date-keyed entries.
    Bucketed(BTreeMap<CompactString, GroupBucket>),
}

impl Grouping {
    pub fn for_mode(mode: GroupMode) -> Self {
        match mode {
            GroupMode::Extension => Self::Flat(EntryMap::new()),
            GroupMode::Time => Self::Bucketed(BTreeMap::new()),
        }
    }

    pub fn mode(&self) -> GroupMode {
        match self {
            Self::Flat(_) => GroupMode::Extension,
            Self::Bucketed(_) => GroupMode::Time,
        }
    }
}

/// Everything accumulated while walking one root.
///
/// Created once per invocation, grown by ingestion, read by the renderer.
/// Nothing is ever removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    /// Path that was scanned.
    pub root: PathBuf,
    /// Root path as shown in the status line (possibly elided).
    pub root_display: String,
    /// Bytes over every file seen, including files without an entry.
    pub total: u64,
    /// Number of files seen.
    pub files_seen: u64,
    /// Oldest modification time over every file seen.
    pub min_mod_time: Option<SystemTime>,
    /// Newest modification time over every file seen.
    pub max_mod_time: Option<SystemTime>,
    /// Number of files whose processing failed.
    pub exception_count: u64,
    grouping: Grouping,
}

impl Summary {
    /// Create an empty summary for `root` in the given mode.
    pub fn new(root: impl Into<PathBuf>, mode: GroupMode) -> Self {
        let root = root.into();
        Self {
            root_display: root.display().to_string(),
            root,
            total: 0,
            files_seen: 0,
            min_mod_time: None,
            max_mod_time: None,
            exception_count: 0,
            grouping: Grouping::for_mode(mode),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn mode(&self) -> GroupMode {
        self.grouping.mode()
    }

    pub fn grouping(&self) -> &Grouping {
        &self.grouping
    }

    /// Update the running total and global extrema for one file.
    pub fn record_file(&mut self, size: u64, modified: SystemTime) {
        self.total += size;
        self.files_seen += 1;
        self.min_mod_time = Some(self.min_mod_time.map_or(modified, |t| t.min(modified)));
        self.max_mod_time = Some(self.max_mod_time.map_or(modified, |t| t.max(modified)));
    }

    /// Add a file to the entry addressed by `key`.
    ///
    /// Age buckets are created lazily on their first file.
    pub fn add_or_update(
        &mut self,
        key: &GroupKey,
        size: u64,
        modified: SystemTime,
    ) -> Result<&mut StatEntry, ScanError> {
        match (&mut self.grouping, key) {
            (Grouping::Flat(entries), GroupKey::Extension(ext)) => {
                Ok(entries.add_or_update(ext, size, modified))
            }
            (Grouping::Bucketed(buckets), GroupKey::Age { group, label }) => Ok(buckets
                .entry(group.clone())
                .or_insert_with(|| GroupBucket::new(group.clone()))
                .entries
                .add_or_update(label, size, modified)),
            _ => Err(ScanError::GroupingMismatch),
        }
    }

    /// Count one failed file.
    pub fn record_exception(&mut self) {
        self.exception_count += 1;
    }

    /// Flat entries, present only in extension mode.
    pub fn entries(&self) -> Option<&EntryMap> {
        match &self.grouping {
            Grouping::Flat(entries) => Some(entries),
            Grouping::Bucketed(_) => None,
        }
    }

    /// Age buckets in tier order, present only in time mode.
    pub fn groups(&self) -> Option<&BTreeMap<CompactString, GroupBucket>> {
        match &self.grouping {
            Grouping::Flat(_) => None,
            Grouping::Bucketed(buckets) => Some(buckets),
        }
    }

    /// Every entry of the active shape, in unspecified order.
    pub fn all_entries(&self) -> Box<dyn Iterator<Item = &StatEntry> + '_> {
        match &self.grouping {
            Grouping::Flat(entries) => Box::new(entries.values()),
            Grouping::Bucketed(buckets) => {
                Box::new(buckets.values().flat_map(|b| b.entries.values()))
            }
        }
    }

    /// Bytes reachable from entries (excludes dropped files).
    pub fn grouped_bytes(&self) -> u64 {
        self.all_entries().map(|e| e.total_bytes).sum()
    }

    /// Number of entries of the active shape.
    pub fn entry_count(&self) -> usize {
        match &self.grouping {
            Grouping::Flat(entries) => entries.len(),
            Grouping::Bucketed(buckets) => buckets.values().map(|b| b.entries.len()).sum(),
        }
    }
}
