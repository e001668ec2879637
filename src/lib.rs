//! # nuget-sweep
//!
//! A command-line tool that reclaims disk space by pruning the NuGet
//! global-packages cache (`~/.nuget/packages`).
//!
//! ## Overview
//!
//! The NuGet cache grows without bound: every restored package version
//! stays on disk forever. nuget-sweep walks the cache's
//! package/version directory layout and deletes version directories that
//! are stale (unused beyond a configurable number of days), empty, or -
//! optionally - superseded by a newer version of the same package.
//!
//! ## Key Features
//!
//! - **Dry run by default**: reports what would be reclaimed; nothing is
//!   deleted until `--force` is given
//! - **Retention rules**: always keeps the newest release of each package,
//!   plus the newest prerelease that is newer than it
//! - **Lock-aware deletion**: renames a directory aside before removing it,
//!   so files held open by a concurrent build do not leave half-deleted
//!   version directories behind
//! - **Tool packages**: descends into the reserved `.tools` container,
//!   which nests one level deeper than regular packages
//!
//! ## Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`]: Command-line interface definitions using clap
//! - [`commands`]: The sweep command runner and summary reporting
//! - [`error`]: Error types and handling with thiserror + miette
//! - [`sweep`]: The cache walker, retention policy, and deleter
//!
//! ## Usage
//!
//! ```bash
//! # Report what a 90-day sweep would reclaim
//! nuget-sweep
//!
//! # Delete versions unused for 30+ days, plus superseded ones
//! nuget-sweep --force --min-days 30 --prune-superseded
//! ```
//!
//! ## Library Usage
//!
//! The core is exposed as a library for integration into other tools:
//!
//! ```no_run
//! use nuget_sweep::sweep::Sweep;
//!
//! let config = Sweep::builder()
//!     .cache_root("/home/user/.nuget/packages")
//!     .min_idle_days(90)
//!     .dry_run(true)
//!     .build();
//!
//! let stats = config.perform_sweep(0)?;
//! println!("Would free {} bytes", stats.bytes_freed);
//! # Ok::<(), nuget_sweep::error::SweepError>(())
//! ```
//!
//! ## Error Handling
//!
//! The crate uses a combination of:
//! - `thiserror` for strongly-typed errors
//! - `miette` for rich diagnostic output in CLI
//!
//! Per-directory failures are logged and recovered from; a run always
//! finishes its scan and prints a summary.

// Re-export public modules for library usage
pub mod cli;
pub mod commands;
pub mod error;
pub mod sweep;

// Internal modules
mod logging;
