//! Error types for nuget-sweep.
//!
//! This module defines all error types used throughout nuget-sweep, using
//! a combination of `thiserror` for ergonomic error definitions and `miette`
//! for rich diagnostic output.
//!
//! # Error Handling Strategy
//!
//! - All errors derive from [`SweepError`]
//! - Each variant includes helpful error messages and diagnostic codes
//! - Per-directory failures during a sweep are logged and recovered from;
//!   only structural invariant violations abort the run
//! - Errors are automatically converted to `miette::Result` for CLI output

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Error types that can occur in nuget-sweep operations
#[derive(Error, Debug, Diagnostic)]
pub enum SweepError {
    /// File system I/O error during sweep operations.
    ///
    /// Common causes: permission denied, file not found, or a directory
    /// read failing mid-enumeration. Used throughout for directory
    /// traversal and metadata access.
    #[error("I/O error accessing '{path}'")]
    #[diagnostic(code(nuget_sweep::io_error))]
    IoError {
        /// The path that caused the I/O error
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Two version directories in one package parsed to the same version.
    ///
    /// NuGet constructs the cache with one directory per version, so this
    /// cannot happen under normal operation. If it does, the cache layout
    /// has diverged from what the pruning logic assumes and continuing
    /// could delete the wrong directory.
    #[error("Duplicate version '{version}' in package directory '{package}'")]
    #[diagnostic(
        code(nuget_sweep::duplicate_version),
        help("The cache layout is inconsistent. Inspect the package directory manually.")
    )]
    DuplicateVersion {
        /// The package directory containing the collision
        package: PathBuf,
        /// The version that appeared twice
        version: semver::Version,
    },

    /// A just-enumerated directory has no parent.
    ///
    /// Structurally impossible under normal enumeration: every version
    /// directory we discover sits inside a package directory. Raised only
    /// if the filesystem changed underneath the tool in an unexpected way,
    /// in which case the run aborts rather than guessing.
    #[error("Directory '{0}' has no parent; the cache changed during the sweep")]
    #[diagnostic(code(nuget_sweep::missing_parent))]
    MissingParent(
        /// The orphaned directory path
        PathBuf,
    ),

    /// Cannot determine the user's home directory.
    ///
    /// Raised when `home::home_dir()` returns None and no `--cache-dir`
    /// override was given. The home directory is needed to locate the
    /// default NuGet global-packages cache at `~/.nuget/packages`.
    #[error("Could not determine the home directory")]
    #[diagnostic(
        code(nuget_sweep::home_dir_not_found),
        help("Pass --cache-dir to point at the NuGet package cache explicitly.")
    )]
    HomeDirNotFound,
}

impl SweepError {
    /// Whether this error aborts the run.
    ///
    /// Only structural invariant violations are fatal; every other
    /// per-directory failure is logged at the point of occurrence and the
    /// scan continues to its final summary.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::DuplicateVersion { .. } | Self::MissingParent(_))
    }
}

/// Type alias for Results in this crate
pub type Result<T> = std::result::Result<T, SweepError>;
