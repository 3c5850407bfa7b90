//! Serial jwalk driver feeding the ingest pipeline.

use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};
use jwalk::{Parallelism, WalkDir};
use tracing::{debug, warn};

use sumfiles_core::{ScanError, Summary, SummaryConfig};

use crate::ingest::{FileEvent, Ingested, IngestPipeline};
use crate::oracle::{SniffOracle, TextOracle};
use crate::progress::{ProgressTracker, RefreshTimer, ScanProgress};

/// Result of a completed or aborted walk.
#[derive(Debug)]
pub struct ScanOutcome {
    pub progress: ScanProgress,
    /// The error that stopped the walk early, if any.
    pub error: Option<ScanError>,
}

impl ScanOutcome {
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

/// Walks a tree on the calling thread, one entry at a time.
///
/// Renders are requested between two entries, never during an update.
pub struct Scanner<O = SniffOracle> {
    config: SummaryConfig,
    pipeline: IngestPipeline<O>,
    ignore: GlobSet,
}

impl Scanner<SniffOracle> {
    /// Create a scanner using content sniffing to detect text files.
    pub fn new(config: SummaryConfig) -> Result<Self, ScanError> {
        Self::with_oracle(config, SniffOracle::new())
    }
}

impl<O: TextOracle> Scanner<O> {
    /// Create a scanner with a custom text oracle.
    pub fn with_oracle(config: SummaryConfig, oracle: O) -> Result<Self, ScanError> {
        let pipeline = IngestPipeline::new(&config, oracle);
        Self::with_pipeline(config, pipeline)
    }

    /// Create a scanner around a prepared pipeline.
    pub fn with_pipeline(config: SummaryConfig, pipeline: IngestPipeline<O>) -> Result<Self, ScanError> {
        let ignore = build_ignore_set(&config.ignore_patterns)?;
        Ok(Self {
            config,
            pipeline,
            ignore,
        })
    }

    pub fn config(&self) -> &SummaryConfig {
        &self.config
    }

    /// A fresh summary shaped for this scanner's grouping mode.
    pub fn new_summary(&self) -> Summary {
        Summary::new(&self.config.root, self.config.mode)
    }

    /// Walk the root, ingesting every entry into `summary`.
    ///
    /// `on_refresh` runs whenever the refresh interval elapsed since its
    /// last call. The first walk error stops the walk and is returned in
    /// the outcome; failed line counts only stop it when the configured
    /// error limit is crossed.
    pub fn run<F>(&self, summary: &mut Summary, mut on_refresh: F) -> ScanOutcome
    where
        F: FnMut(&Summary),
    {
        let mut tracker = ProgressTracker::new();
        let mut timer = RefreshTimer::new(self.config.refresh_interval);
        let mut error = None;

        for entry_result in self.walker() {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err.path().map(Path::to_path_buf).unwrap_or_default();
                    warn!(path = %path.display(), error = %err, "walk aborted");
                    error = Some(ScanError::Walk {
                        path,
                        message: err.to_string(),
                    });
                    break;
                }
            };

            let path = entry.path();
            let metadata = match entry.metadata() {
                Ok(metadata) => metadata,
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "walk aborted");
                    error = Some(ScanError::Walk {
                        path,
                        message: err.to_string(),
                    });
                    break;
                }
            };

            let event = FileEvent::from_metadata(&path, &metadata);
            match self.pipeline.ingest(summary, &event) {
                Ok(Ingested::Directory) => tracker.record_dir(),
                Ok(_) => tracker.record_file(path.clone(), event.size),
                Err(err) if !err.is_fatal() => {
                    warn!(error = %err, "counted as exception");
                    tracker.record_file(path.clone(), event.size);
                    tracker.record_error();
                    if self.config.exceeds_error_limit(summary.exception_count) {
                        error = Some(ScanError::TooManyErrors {
                            count: summary.exception_count,
                        });
                        break;
                    }
                }
                Err(err) => {
                    error = Some(err);
                    break;
                }
            }

            if timer.due() {
                on_refresh(summary);
            }
        }

        let progress = tracker.finish();
        debug!(
            files = progress.files_scanned,
            dirs = progress.dirs_scanned,
            errors = progress.errors_count,
            elapsed_ms = progress.elapsed.as_millis() as u64,
            "walk finished"
        );
        ScanOutcome { progress, error }
    }

    fn walker(&self) -> WalkDir {
        let ignore = self.ignore.clone();
        WalkDir::new(&self.config.root)
            .parallelism(Parallelism::Serial)
            .skip_hidden(!self.config.include_hidden)
            .follow_links(self.config.follow_symlinks)
            .process_read_dir(move |_depth, _path, _state, children| {
                if ignore.is_empty() {
                    return;
                }
                children.retain(|child| match child {
                    Ok(entry) => !ignore.is_match(entry.file_name()),
                    Err(_) => true,
                });
            })
    }
}

/// Compile ignore patterns, matched against entry names.
fn build_ignore_set(patterns: &[String]) -> Result<GlobSet, ScanError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| ScanError::InvalidConfig {
            message: format!("bad ignore pattern {pattern:?}: {e}"),
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| ScanError::InvalidConfig {
        message: e.to_string(),
    })
}
