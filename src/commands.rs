//! The sweep command runner.
//!
//! Glue between the parsed CLI and the core sweep: resolves the cache
//! root, builds the [`Sweep`] configuration, runs it, and prints the
//! human-readable summary. Size formatting happens here; the core only
//! reports raw byte counts.

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::error::{Result, SweepError};
use crate::logging::Logger;
use crate::sweep::{Sweep, format_size};

/// Execute a sweep based on the parsed CLI arguments.
pub fn execute(cli: &Cli) -> Result<()> {
    let quiet = cli.quiet();
    let verbose = if quiet { 0 } else { cli.verbose() };
    let log = Logger::new(verbose, quiet);

    let cache_root = resolve_cache_root(cli.cache_dir())?;

    let config = Sweep::builder()
        .cache_root(cache_root)
        .min_idle_days(cli.min_days())
        .dry_run(!cli.force())
        .prune_superseded(cli.prune_superseded())
        .quiet(quiet)
        .build();

    let stats = config.perform_sweep(verbose)?;

    if cli.force() {
        log.info(format!("Done! Deleted {}.", format_size(stats.bytes_freed)));
    } else {
        log.info(format!(
            "{} worth of packages are unused beyond {} days.",
            format_size(stats.bytes_freed),
            cli.min_days()
        ));
        log.info("To delete, re-run with -f or --force.");
    }

    log.verbose(
        1,
        format!(
            "  Versions removed: {}, empty packages removed: {}, skipped: {}",
            stats.versions_removed, stats.packages_removed, stats.unparsable_skipped
        ),
    );

    if stats.failures > 0 {
        log.info(format!(
            "{} deletions failed; see warnings above.",
            stats.failures
        ));
    }

    Ok(())
}

/// Resolve the cache root: an explicit override wins, otherwise the
/// well-known NuGet global-packages location under the home directory.
pub(crate) fn resolve_cache_root(override_dir: Option<&Path>) -> Result<PathBuf> {
    match override_dir {
        Some(dir) => Ok(dir.to_path_buf()),
        None => home::home_dir()
            .map(|h| h.join(".nuget").join("packages"))
            .ok_or(SweepError::HomeDirNotFound),
    }
}
