//! Core types for sumfiles.
//!
//! This crate holds the incremental aggregation model: per-label
//! statistics, the run-wide summary in its flat or age-bucketed shape,
//! run configuration, and the shared error type. It performs no I/O.

mod config;
mod entry;
mod error;
mod summary;

pub use config::{GroupMode, SummaryConfig, SummaryConfigBuilder, TermSize};
pub use entry::{EntryMap, StatEntry};
pub use error::ScanError;
pub use summary::{GroupBucket, GroupKey, Grouping, Summary};
