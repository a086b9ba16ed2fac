//! # mediasync - year-aware media folder synchronization
//!
//! Copies media folders named in the `Title (YYYY)` convention from a source
//! tree to a destination tree, optionally only those matching a year
//! condition, optionally only those the destination lacks, and optionally
//! deletes from the source what the destination already holds.
//!
//! ## Quick Start
//!
//! ```bash
//! # What would be copied?
//! mediasync -s /mnt/incoming -d /mnt/library --copy --difference --simulate
//!
//! # Copy everything from 2000 onwards that the library is missing
//! mediasync -s /mnt/incoming -d /mnt/library -c "Year >= 2000" --copy --difference
//!
//! # Total size of the pre-2000 folders
//! mediasync -s /mnt/incoming -d /mnt/library -c "Year < 2000" --full-size
//! ```
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use mediasync::media::{YearFilter, enumerate_media};
//! use std::path::Path;
//!
//! let filter = YearFilter::parse(Some("Year >= 2000"));
//! for item in enumerate_media(Path::new("/mnt/incoming"), &filter)? {
//!     println!("{}", item.relative_display());
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod media;
pub mod size;
pub mod sync;

pub use cli::{Cli, Output};
pub use config::MediaSyncConfig;

/// Result type alias for mediasync operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
