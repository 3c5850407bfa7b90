//! Scan progress and refresh cadence.

use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Progress information for a walk.
#[derive(Debug, Clone)]
pub struct ScanProgress {
    /// Number of files ingested so far.
    pub files_scanned: u64,
    /// Number of directories entered so far.
    pub dirs_scanned: u64,
    /// Total bytes of ingested files.
    pub bytes_scanned: u64,
    /// Last path ingested.
    pub current_path: PathBuf,
    /// Number of files whose line count failed.
    pub errors_count: u64,
    /// Time elapsed since the walk started.
    pub elapsed: Duration,
}

impl ScanProgress {
    /// Create initial progress state.
    pub fn new() -> Self {
        Self {
            files_scanned: 0,
            dirs_scanned: 0,
            bytes_scanned: 0,
            current_path: PathBuf::new(),
            errors_count: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// Calculate scan rate in files per second.
    pub fn files_per_second(&self) -> f64 {
        if self.elapsed.as_secs_f64() > 0.0 {
            self.files_scanned as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        }
    }
}

impl Default for ScanProgress {
    fn default() -> Self {
        Self::new()
    }
}

/// Internal progress tracker with timing.
#[derive(Debug)]
pub(crate) struct ProgressTracker {
    start_time: Instant,
    progress: ScanProgress,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            progress: ScanProgress::new(),
        }
    }

    pub fn record_file(&mut self, path: PathBuf, size: u64) {
        self.progress.files_scanned += 1;
        self.progress.bytes_scanned += size;
        self.progress.current_path = path;
    }

    pub fn record_dir(&mut self) {
        self.progress.dirs_scanned += 1;
    }

    pub fn record_error(&mut self) {
        self.progress.errors_count += 1;
    }

    pub fn finish(mut self) -> ScanProgress {
        self.progress.elapsed = self.start_time.elapsed();
        self.progress
    }
}

/// Fires at most once per interval; polled between walk steps.
#[derive(Debug)]
pub(crate) struct RefreshTimer {
    interval: Duration,
    last: Instant,
}

impl RefreshTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: Instant::now(),
        }
    }

    /// Whether a refresh is due; resets the timer when it is.
    pub fn due(&mut self) -> bool {
        self.due_at(Instant::now())
    }

    fn due_at(&mut self, now: Instant) -> bool {
        if now.duration_since(self.last) >= self.interval {
            self.last = now;
            true
        } else {
            false
        }
    }
}
