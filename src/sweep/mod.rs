//! Pruning of the NuGet global-packages cache.
//!
//! This module implements the sweep over the cache's two-level layout
//! (`<package>/<version>/`, plus the nested `.tools/<tool>/<version>/`
//! container):
//!
//! - Version directory names are parsed as semantic versions; anything
//!   unparsable is skipped and never deleted.
//! - With `--prune-superseded`, every version except the newest release
//!   (and a prerelease newer than it) is removed outright.
//! - Remaining versions are removed once idle past the configured
//!   threshold; versions with no files at all are removed unconditionally.
//! - Package directories left empty are removed as well.
//!
//! Deletion renames the directory out of the way before removing it
//! recursively, so a file held open by a concurrent build does not leave a
//! half-deleted version directory behind.
//!
//! # Example
//!
//! ```no_run
//! use nuget_sweep::sweep::Sweep;
//!
//! let config = Sweep::builder()
//!     .cache_root("/home/user/.nuget/packages")
//!     .min_idle_days(90)
//!     .prune_superseded(true)
//!     .dry_run(true)
//!     .build();
//!
//! let stats = config.perform_sweep(0)?;
//! println!("Would free {} bytes", stats.bytes_freed);
//! # Ok::<(), nuget_sweep::error::SweepError>(())
//! ```

pub mod config;
mod delete;
mod fileset;
mod prune;
mod size;
mod walker;
#[cfg(test)]
mod tests;

pub use config::{Sweep, SweepBuilder, SweepStats};

pub(crate) use size::format_size;
