//! Terminal rendering for sumfiles.
//!
//! Turns a [`Summary`](sumfiles_core::Summary) into the live column grid
//! shown while a scan runs, and into the final outputs written after it:
//!
//! - **Frames** - status line, spinner glyph, and a column-major grid
//!   sized to the terminal
//! - **Log** - `file_summary.txt`, one line per displayed entry
//! - **JSON** - a serializable [`SummaryReport`]
//!
//! ```rust
//! use sumfiles_core::{GroupKey, GroupMode, Summary, TermSize};
//! use sumfiles_view::{Renderer, ViewOptions};
//!
//! let mut summary = Summary::new("/src", GroupMode::Extension);
//! summary.record_file(4096, std::time::SystemTime::now());
//! summary
//!     .add_or_update(&GroupKey::extension("rs"), 4096, std::time::SystemTime::now())
//!     .unwrap();
//!
//! let mut renderer = Renderer::new(ViewOptions::default());
//! let frame = renderer.render(&summary, TermSize::new(80, 10));
//! assert!(frame.rows[0].contains("rs:"));
//! ```

mod format;
mod layout;
mod render;
mod report;
pub mod terminal;

use serde::{Deserialize, Serialize};
use sumfiles_core::{GroupMode, SummaryConfig};

pub use format::{NO_DATE, fit_cell, format_date, format_entry, human_size, truncate_chars};
pub use layout::{
    MIN_DISPLAY_BYTES, NARROW_COLUMN, WIDE_COLUMN, column_count, column_width, elide_root,
    is_displayed, pack_columns, select_entries,
};
pub use render::{Frame, Renderer, SPINNER, status_line};
pub use report::{LOG_FILE_NAME, ReportEntry, SummaryReport, write_log, write_log_file};

/// Rendering switches, fixed for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewOptions {
    pub mode: GroupMode,
    /// Show and sort by line counts instead of bytes.
    pub count_lines: bool,
    /// Keep earlier frames on screen.
    pub debug: bool,
}

impl ViewOptions {
    pub fn new(mode: GroupMode, count_lines: bool) -> Self {
        Self {
            mode,
            count_lines,
            debug: false,
        }
    }
}

impl From<&SummaryConfig> for ViewOptions {
    fn from(config: &SummaryConfig) -> Self {
        Self {
            mode: config.mode,
            count_lines: config.count_lines,
            debug: config.debug,
        }
    }
}
