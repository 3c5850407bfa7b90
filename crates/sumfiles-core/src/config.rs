//! Run configuration.

use std::path::PathBuf;
use std::time::Duration;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How files are grouped into entries.
///
/// Chosen once before the walk starts; a run never mixes the two.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GroupMode {
    /// Flat grouping keyed by file extension.
    #[default]
    Extension,
    /// Two-level grouping keyed by modification-time tier, then date label.
    Time,
}

/// Terminal dimensions available to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermSize {
    /// Usable columns.
    pub cols: u16,
    /// Usable grid rows (status and spinner lines excluded).
    pub rows: u16,
}

impl TermSize {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }
}

/// Configuration for one summarizing run.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct SummaryConfig {
    /// Root directory to walk.
    pub root: PathBuf,

    /// Grouping mode.
    #[builder(default)]
    #[serde(default)]
    pub mode: GroupMode,

    /// Count newline bytes of text files in addition to sizes.
    #[builder(default = "false")]
    #[serde(default)]
    pub count_lines: bool,

    /// Write `file_summary.txt` after the walk.
    #[builder(default = "false")]
    #[serde(default)]
    pub log: bool,

    /// Verbose diagnostics; disables periodic cursor homing.
    #[builder(default = "false")]
    #[serde(default)]
    pub debug: bool,

    /// Print the final summary as JSON.
    #[builder(default = "false")]
    #[serde(default)]
    pub json: bool,

    /// Minimum time between two live renders.
    #[builder(default = "Duration::from_millis(300)")]
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: Duration,

    /// Fixed terminal size instead of querying the console.
    #[builder(default)]
    #[serde(default)]
    pub terminal: Option<TermSize>,

    /// Entry names to skip (glob syntax). Matching directories are pruned.
    #[builder(default)]
    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    /// Include hidden files (starting with `.`).
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub include_hidden: bool,

    /// Follow symbolic links while walking.
    #[builder(default = "false")]
    #[serde(default)]
    pub follow_symlinks: bool,

    /// Abort the walk once more than this many files failed (None = never).
    #[builder(default)]
    #[serde(default)]
    pub max_errors: Option<u64>,
}

fn default_true() -> bool {
    true
}

fn default_refresh_interval() -> Duration {
    Duration::from_millis(300)
}

impl SummaryConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.root {
            Some(ref root) if root.as_os_str().is_empty() => {
                return Err("Root path cannot be empty".to_string());
            }
            None => return Err("Root path is required".to_string()),
            _ => {}
        }
        if let Some(interval) = self.refresh_interval {
            if interval.is_zero() {
                return Err("Refresh interval must be positive".to_string());
            }
        }
        Ok(())
    }
}

impl SummaryConfig {
    /// Create a new config builder.
    pub fn builder() -> SummaryConfigBuilder {
        SummaryConfigBuilder::default()
    }

    /// Create a default config for a root path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            mode: GroupMode::Extension,
            count_lines: false,
            log: false,
            debug: false,
            json: false,
            refresh_interval: default_refresh_interval(),
            terminal: None,
            ignore_patterns: Vec::new(),
            include_hidden: true,
            follow_symlinks: false,
            max_errors: None,
        }
    }

    /// Whether the renderer needs the wide column layout.
    pub fn wide_columns(&self) -> bool {
        self.mode == GroupMode::Time || self.count_lines
    }

    /// Whether the exception count has crossed the configured limit.
    pub fn exceeds_error_limit(&self, exceptions: u64) -> bool {
        self.max_errors.is_some_and(|max| exceptions > max)
    }
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self::new(".")
    }
}
