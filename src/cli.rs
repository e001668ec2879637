//! Command-line interface definitions for nuget-sweep.
//!
//! This module defines the CLI structure using clap. nuget-sweep has a
//! single operation, so the interface is a flat set of flags rather than
//! subcommands. The main entry point is the [`Cli`] struct.
//!
//! # Example
//!
//! ```no_run
//! use nuget_sweep::cli::Cli;
//!
//! // Parse command-line arguments
//! let cli = Cli::parse_args();
//!
//! if !cli.force() {
//!     println!("Dry run against {:?}", cli.cache_dir());
//! }
//! ```

use std::path::{Path, PathBuf};

use clap::Parser;

/// Command-line interface for nuget-sweep.
///
/// The default run is a dry run: every decision is computed and reported,
/// but the filesystem is left untouched until `--force` is given.
#[derive(Debug, Parser)]
#[command(
    name = "nuget-sweep",
    bin_name = "nuget-sweep",
    version,
    about = "Reclaim disk space by pruning stale and superseded versions from the NuGet package cache",
    long_about = None
)]
pub struct Cli {
    /// Path to the package cache (defaults to ~/.nuget/packages)
    #[arg(long, env = "NUGET_SWEEP_CACHE_DIR")]
    cache_dir: Option<PathBuf>,

    /// Number of days a package version must go unused to be purged
    #[arg(
        short,
        long,
        default_value = "90",
        value_parser = clap::value_parser!(u64).range(1..),
        env = "NUGET_SWEEP_MIN_DAYS"
    )]
    min_days: u64,

    /// Perform the actual clean-up. Default is to do a dry run and report
    /// the clean-up that would be done
    #[arg(short, long, env = "NUGET_SWEEP_FORCE")]
    force: bool,

    /// Also delete versions superseded by a newer release or prerelease
    #[arg(short, long, env = "NUGET_SWEEP_PRUNE_SUPERSEDED")]
    prune_superseded: bool,

    /// Enable verbose output (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, env = "NUGET_SWEEP_VERBOSE")]
    verbose: u8,

    /// Silence all output except warnings and errors
    #[arg(short, long, conflicts_with = "verbose", env = "NUGET_SWEEP_QUIET")]
    quiet: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Create a builder for programmatic construction
    pub fn builder() -> CliBuilder {
        CliBuilder::default()
    }

    /// Get the cache directory override
    pub fn cache_dir(&self) -> Option<&Path> {
        self.cache_dir.as_deref()
    }

    /// Get the idle threshold in days
    pub fn min_days(&self) -> u64 {
        self.min_days
    }

    /// Check whether deletions are actually performed
    pub fn force(&self) -> bool {
        self.force
    }

    /// Check whether superseded-version pruning is enabled
    pub fn prune_superseded(&self) -> bool {
        self.prune_superseded
    }

    /// Get the verbose level
    pub fn verbose(&self) -> u8 {
        self.verbose
    }

    /// Check if quiet mode is enabled
    pub fn quiet(&self) -> bool {
        self.quiet
    }
}

/// Builder for [`Cli`]
///
/// Provides a fluent API for creating [`Cli`] instances without going
/// through command-line parsing. Useful for testing and programmatic
/// usage.
#[derive(Debug, Default)]
pub struct CliBuilder {
    cache_dir: Option<PathBuf>,
    min_days: Option<u64>,
    force: bool,
    prune_superseded: bool,
    verbose: u8,
    quiet: bool,
}

impl CliBuilder {
    /// Set the cache directory
    pub fn cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    /// Set the idle threshold in days
    pub fn min_days(mut self, days: u64) -> Self {
        self.min_days = Some(days);
        self
    }

    /// Enable forced (non-dry-run) mode
    pub fn force(mut self, enabled: bool) -> Self {
        self.force = enabled;
        self
    }

    /// Enable superseded-version pruning
    pub fn prune_superseded(mut self, enabled: bool) -> Self {
        self.prune_superseded = enabled;
        self
    }

    /// Set the verbosity level
    pub fn verbose(mut self, level: u8) -> Self {
        self.verbose = level;
        self
    }

    /// Enable quiet mode
    pub fn quiet(mut self, enabled: bool) -> Self {
        self.quiet = enabled;
        self
    }

    /// Build the [`Cli`] instance
    pub fn build(self) -> Cli {
        Cli {
            cache_dir: self.cache_dir,
            min_days: self.min_days.unwrap_or(90),
            force: self.force,
            prune_superseded: self.prune_superseded,
            verbose: self.verbose,
            quiet: self.quiet,
        }
    }
}
