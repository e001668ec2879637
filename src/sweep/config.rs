use std::path::{Path, PathBuf};
use std::time::Duration;

use super::walker::sweep_group;
use crate::error::Result;
use crate::logging::Logger;

/// A configured sweep over one NuGet package cache
#[derive(Debug)]
pub struct Sweep {
    /// Root of the global-packages cache
    cache_root: PathBuf,
    /// Minimum idle duration before a version is considered stale
    min_idle: Duration,
    /// Dry run mode - don't actually delete anything
    dry_run: bool,
    /// Also delete versions superseded by a newer one
    prune_superseded: bool,
    /// Suppress informational logging when true
    quiet: bool,
}

impl Sweep {
    /// Creates a new builder for [`Sweep`]
    pub fn builder() -> SweepBuilder {
        SweepBuilder::default()
    }

    /// Get the cache root directory
    pub fn cache_root(&self) -> &Path {
        &self.cache_root
    }

    /// Get the minimum idle duration
    pub fn min_idle(&self) -> Duration {
        self.min_idle
    }

    /// Check if dry run mode is enabled
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Check if superseded-version pruning is enabled
    pub fn prune_superseded(&self) -> bool {
        self.prune_superseded
    }

    /// Check if quiet mode is enabled
    pub fn quiet(&self) -> bool {
        self.quiet
    }

    /// Main entry point for the sweep.
    ///
    /// Walks the cache's two-level package/version layout (descending one
    /// extra level for the `.tools` container), applies the retention
    /// policy to every package, deletes losers when not in dry-run mode,
    /// and removes package directories left empty afterwards.
    ///
    /// A missing cache root is not an error: it is reported and treated
    /// as zero work. All state is read fresh from the filesystem; nothing
    /// persists between runs.
    ///
    /// # Returns
    ///
    /// Statistics about the sweep, including the total bytes freed (or
    /// that would be freed in dry-run mode).
    pub fn perform_sweep(&self, verbose: u8) -> Result<SweepStats> {
        let log = Logger::new(verbose, self.quiet());
        let mut stats = SweepStats::default();

        if !self.cache_root().exists() {
            log.warn(format!(
                "package cache '{}' does not exist; nothing to do",
                self.cache_root().display()
            ));
            return Ok(stats);
        }

        log.verbose(
            1,
            format!("Sweeping package cache at {}", self.cache_root().display()),
        );
        log.verbose(
            1,
            format!(
                "  Idle threshold: {} days, prune superseded: {}",
                self.min_idle().as_secs() / 86_400,
                self.prune_superseded()
            ),
        );

        sweep_group(self.cache_root(), true, self, &log, &mut stats)?;

        Ok(stats)
    }
}

/// Builder for [`Sweep`]
#[derive(Debug, Default)]
pub struct SweepBuilder {
    cache_root: Option<PathBuf>,
    min_idle: Option<Duration>,
    dry_run: bool,
    prune_superseded: bool,
    quiet: bool,
}

impl SweepBuilder {
    /// Set the cache root directory
    pub fn cache_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_root = Some(dir.into());
        self
    }

    /// Set the minimum idle duration
    pub fn min_idle(mut self, duration: Duration) -> Self {
        self.min_idle = Some(duration);
        self
    }

    /// Set the minimum idle duration in whole days
    pub fn min_idle_days(mut self, days: u64) -> Self {
        self.min_idle = Some(Duration::from_secs(days * 86_400));
        self
    }

    /// Enable dry run mode
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Enable superseded-version pruning
    pub fn prune_superseded(mut self, enabled: bool) -> Self {
        self.prune_superseded = enabled;
        self
    }

    /// Enable or disable quiet mode
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Build the [`Sweep`]
    ///
    /// The idle threshold carries no built-in default; callers decide
    /// policy (the CLI defaults `--min-days` to 90).
    ///
    /// # Panics
    ///
    /// Panics if the cache root or the idle threshold was not set.
    pub fn build(self) -> Sweep {
        Sweep {
            cache_root: self.cache_root.expect("cache root is required"),
            min_idle: self.min_idle.expect("idle threshold is required"),
            dry_run: self.dry_run,
            prune_superseded: self.prune_superseded,
            quiet: self.quiet,
        }
    }
}

/// Statistics about one sweep
#[derive(Debug, Default)]
pub struct SweepStats {
    /// Total bytes freed (or reclaimable in dry-run mode)
    pub bytes_freed: u64,
    /// Version directories removed
    pub versions_removed: usize,
    /// Empty package directories removed
    pub packages_removed: usize,
    /// Directories skipped because their name is not a semantic version
    pub unparsable_skipped: usize,
    /// Deletions or scans that failed and were skipped
    pub failures: usize,
}
