//! Grouping-key derivation for sumfiles.
//!
//! Every scanned file is routed to exactly one entry. This crate decides
//! which one:
//!
//! - **Extension grouping** - the last `.`-separated piece of the file
//!   name; missing, empty, or over-long extensions are "Other"
//! - **Age grouping** - a coarse tier (recent, this year, older) plus a
//!   date label truncated to the tier's precision
//!
//! ```rust
//! use std::path::Path;
//! use std::time::{Duration, SystemTime};
//! use sumfiles_analyze::{AgeTier, Extension, TimeBucketer};
//!
//! assert_eq!(Extension::of(Path::new("lib.rs")).known().as_deref(), Some("rs"));
//!
//! let now = SystemTime::now();
//! let bucket = TimeBucketer::new().classify(now - Duration::from_secs(3600), now);
//! assert_eq!(bucket.tier, AgeTier::Recent);
//! ```

pub mod age;
pub mod extension;

pub use age::{AgeTier, BucketConfig, TimeBucket, TimeBucketer, age_in_days};
pub use extension::{Extension, MAX_EXTENSION_LEN, OtherReason};
