//! Routing of single files into a summary.

use std::fs::Metadata;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

use sumfiles_analyze::{Extension, OtherReason, TimeBucketer};
use sumfiles_core::{GroupKey, GroupMode, ScanError, Summary, SummaryConfig};

use crate::linecount::maybe_count_lines;
use crate::oracle::TextOracle;

/// One walk step as seen by the pipeline.
#[derive(Debug, Clone, Copy)]
pub struct FileEvent<'a> {
    pub path: &'a Path,
    pub size: u64,
    pub modified: SystemTime,
    pub is_dir: bool,
}

impl<'a> FileEvent<'a> {
    pub fn file(path: &'a Path, size: u64, modified: SystemTime) -> Self {
        Self {
            path,
            size,
            modified,
            is_dir: false,
        }
    }

    pub fn from_metadata(path: &'a Path, metadata: &Metadata) -> Self {
        Self {
            path,
            size: metadata.len(),
            modified: metadata.modified().unwrap_or(UNIX_EPOCH),
            is_dir: metadata.is_dir(),
        }
    }
}

/// What happened to an ingested event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ingested {
    /// Directories carry no statistics.
    Directory,
    /// Counted in the running total but routed to no entry.
    Dropped(OtherReason),
    /// Added to an entry; `lines` is set when line counting is on.
    Grouped { key: GroupKey, lines: Option<u64> },
}

/// Decides the grouping key of each file and updates the summary.
pub struct IngestPipeline<O> {
    mode: GroupMode,
    count_lines: bool,
    bucketer: TimeBucketer,
    oracle: O,
    now: SystemTime,
}

impl<O: TextOracle> IngestPipeline<O> {
    /// Create a pipeline for the given config, dating ages from now.
    pub fn new(config: &SummaryConfig, oracle: O) -> Self {
        Self {
            mode: config.mode,
            count_lines: config.count_lines,
            bucketer: TimeBucketer::new(),
            oracle,
            now: SystemTime::now(),
        }
    }

    /// Use a fixed reference time for age bucketing.
    pub fn with_now(mut self, now: SystemTime) -> Self {
        self.now = now;
        self
    }

    pub fn with_bucketer(mut self, bucketer: TimeBucketer) -> Self {
        self.bucketer = bucketer;
        self
    }

    pub fn mode(&self) -> GroupMode {
        self.mode
    }

    /// Add one file to `summary`.
    ///
    /// The running total and extrema are always updated. A failed line
    /// count is returned as an error after the file's size and time were
    /// applied and the exception counter was bumped.
    pub fn ingest(&self, summary: &mut Summary, event: &FileEvent<'_>) -> Result<Ingested, ScanError> {
        if event.is_dir {
            return Ok(Ingested::Directory);
        }

        summary.record_file(event.size, event.modified);

        let key = match self.key_for(event) {
            Ok(key) => key,
            Err(reason) => {
                debug!(path = %event.path.display(), ?reason, "classified as Other");
                return Ok(Ingested::Dropped(reason));
            }
        };

        let lines = self
            .count_lines
            .then(|| maybe_count_lines(&self.oracle, event.path));

        let entry = summary.add_or_update(&key, event.size, event.modified)?;
        match lines {
            None => Ok(Ingested::Grouped { key, lines: None }),
            Some(Ok(count)) => {
                entry.add_lines(count);
                Ok(Ingested::Grouped {
                    key,
                    lines: Some(count),
                })
            }
            Some(Err(err)) => {
                summary.record_exception();
                Err(err)
            }
        }
    }

    fn key_for(&self, event: &FileEvent<'_>) -> Result<GroupKey, OtherReason> {
        match self.mode {
            GroupMode::Extension => match Extension::of(event.path) {
                Extension::Known(ext) => Ok(GroupKey::Extension(ext)),
                Extension::Other(reason) => Err(reason),
            },
            GroupMode::Time => Ok(self.bucketer.classify(event.modified, self.now).into_key()),
        }
    }
}
