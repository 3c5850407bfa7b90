//! Walking and ingestion engine for sumfiles.
//!
//! This crate turns a directory tree into a [`Summary`]. Key pieces:
//!
//! - **Serial traversal** via jwalk, so every update happens on one thread
//! - **Ingestion** routing each file to its extension or age entry
//! - **Line counting** of files a [`TextOracle`] accepts as text
//! - **Refresh callbacks** fired between entries at a fixed cadence
//!
//! # Example
//!
//! ```rust,no_run
//! use sumfiles_scan::{Scanner, SummaryConfig};
//!
//! let scanner = Scanner::new(SummaryConfig::new("/path/to/scan")).unwrap();
//! let mut summary = scanner.new_summary();
//! let outcome = scanner.run(&mut summary, |live| {
//!     println!("{} bytes so far", live.total);
//! });
//!
//! println!("Total size: {} bytes", summary.total);
//! println!("Entries: {}", summary.entry_count());
//! if let Some(err) = outcome.error {
//!     eprintln!("walk stopped: {err}");
//! }
//! ```

mod ingest;
mod linecount;
mod oracle;
mod progress;
mod scanner;

pub use ingest::{FileEvent, IngestPipeline, Ingested};
pub use linecount::{count_file_lines, count_newlines, maybe_count_lines};
pub use oracle::{SNIFF_BYTES, SniffOracle, TextOracle, looks_like_text};
pub use progress::ScanProgress;
pub use scanner::{ScanOutcome, Scanner};

// Re-export core types for convenience
pub use sumfiles_core::{
    EntryMap, GroupKey, GroupMode, ScanError, StatEntry, Summary, SummaryConfig,
};
