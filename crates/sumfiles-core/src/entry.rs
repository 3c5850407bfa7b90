//! Per-group statistics and the add-or-update aggregator.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::time::SystemTime;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Accumulated statistics for one label.
///
/// Counters only grow; the modification-time range only widens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatEntry {
    /// Coarse bucket id (empty in extension mode).
    pub group: CompactString,
    /// Display key: an extension or a date label.
    pub label: CompactString,
    /// Sum of file sizes in bytes.
    pub total_bytes: u64,
    /// Sum of newline counts of text files.
    pub line_count: u64,
    /// Number of files added.
    pub file_count: u64,
    /// Oldest modification time seen.
    pub min_mod_time: SystemTime,
    /// Newest modification time seen.
    pub max_mod_time: SystemTime,
}

impl StatEntry {
    /// Create an entry holding a single file.
    pub fn new(
        group: impl Into<CompactString>,
        label: impl Into<CompactString>,
        size: u64,
        modified: SystemTime,
    ) -> Self {
        Self {
            group: group.into(),
            label: label.into(),
            total_bytes: size,
            line_count: 0,
            file_count: 1,
            min_mod_time: modified,
            max_mod_time: modified,
        }
    }

    /// Add another file to this entry.
    pub fn record(&mut self, size: u64, modified: SystemTime) {
        self.total_bytes += size;
        self.file_count += 1;
        self.min_mod_time = self.min_mod_time.min(modified);
        self.max_mod_time = self.max_mod_time.max(modified);
    }

    /// Add a file's newline count.
    pub fn add_lines(&mut self, lines: u64) {
        self.line_count += lines;
    }
}

/// Label-keyed collection of entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryMap {
    group: CompactString,
    entries: HashMap<CompactString, StatEntry>,
}

impl EntryMap {
    /// Create an empty map for entries without a coarse group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty map whose entries carry `group`.
    pub fn for_group(group: impl Into<CompactString>) -> Self {
        Self {
            group: group.into(),
            entries: HashMap::new(),
        }
    }

    /// Add a file under `label`, creating the entry on first sight.
    ///
    /// Each physical file must reach this at most once per run; a second
    /// call for the same file counts it twice.
    pub fn add_or_update(&mut self, label: &str, size: u64, modified: SystemTime) -> &mut StatEntry {
        match self.entries.entry(CompactString::from(label)) {
            Entry::Occupied(occupied) => {
                let entry = occupied.into_mut();
                entry.record(size, modified);
                entry
            }
            Entry::Vacant(vacant) => {
                vacant.insert(StatEntry::new(self.group.clone(), label, size, modified))
            }
        }
    }

    pub fn get(&self, label: &str) -> Option<&StatEntry> {
        self.entries.get(label)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in unspecified order.
    pub fn values(&self) -> impl Iterator<Item = &StatEntry> {
        self.entries.values()
    }

    /// Sum of bytes over all entries.
    pub fn total_bytes(&self) -> u64 {
        self.entries.values().map(|e| e.total_bytes).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn at(secs: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
    }

    #[test]
    fn test_first_add_creates_entry() {
        let mut map = EntryMap::new();
        let entry = map.add_or_update("rs", 100, at(50));

        assert_eq!(entry.label, "rs");
        assert_eq!(entry.group, "");
        assert_eq!(entry.file_count, 1);
        assert_eq!(entry.total_bytes, 100);
        assert_eq!(entry.min_mod_time, at(50));
        assert_eq!(entry.max_mod_time, at(50));
    }

    #[test]
    fn test_update_accumulates_and_tightens() {
        let mut map = EntryMap::new();
        map.add_or_update("rs", 100, at(50));
        map.add_or_update("rs", 20, at(10));
        let entry = map.add_or_update("rs", 3, at(90));

        assert_eq!(entry.file_count, 3);
        assert_eq!(entry.total_bytes, 123);
        assert_eq!(entry.min_mod_time, at(10));
        assert_eq!(entry.max_mod_time, at(90));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_group_is_stamped_on_entries() {
        let mut map = EntryMap::for_group("02year");
        let entry = map.add_or_update("2024-05", 1, at(1));
        assert_eq!(entry.group, "02year");
    }

    #[test]
    fn test_lines_are_separate_from_bytes() {
        let mut map = EntryMap::new();
        map.add_or_update("txt", 10, at(1)).add_lines(4);
        map.add_or_update("txt", 10, at(2)).add_lines(6);

        let entry = map.get("txt").unwrap();
        assert_eq!(entry.line_count, 10);
        assert_eq!(entry.total_bytes, 20);
    }

    #[test]
    fn test_total_bytes() {
        let mut map = EntryMap::new();
        map.add_or_update("a", 5, at(1));
        map.add_or_update("b", 7, at(1));
        assert_eq!(map.total_bytes(), 12);
    }
}
