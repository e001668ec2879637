use std::path::{Path, PathBuf};

use super::config::{Sweep, SweepStats};
use super::delete::{DeleteOutcome, remove_package_dir};
use super::prune::{prune_package, subdirectories, warn_failure};
use crate::error::Result;
use crate::logging::Logger;

/// Reserved top-level directory holding .NET tool packages, one nesting
/// level deeper than a normal package: `.tools/<tool>/<version>/`.
pub(crate) const TOOLS_DIR: &str = ".tools";

/// One child of a group directory: either a package directory to prune
/// directly, or a container whose children are themselves
/// package-directory-shaped.
enum CacheEntry {
    Package(PathBuf),
    Group(PathBuf),
}

/// The tools container is special only among the cache root's direct
/// children; inside it every child is a package directory, so nesting
/// stops at exactly one extra level.
fn classify(path: PathBuf, expand_tools: bool) -> CacheEntry {
    if expand_tools && path.file_name().is_some_and(|name| name == TOOLS_DIR) {
        CacheEntry::Group(path)
    } else {
        CacheEntry::Package(path)
    }
}

/// Walk one group directory (the cache root, or the tools container),
/// pruning each package directory and removing the ones left empty.
///
/// `expand_tools` is set only for the cache root itself.
pub(crate) fn sweep_group(
    dir: &Path,
    expand_tools: bool,
    config: &Sweep,
    log: &Logger,
    stats: &mut SweepStats,
) -> Result<()> {
    let subdirs = match subdirectories(dir) {
        Ok(subdirs) => subdirs,
        Err(err) => {
            log.warn(format!("could not read '{}': {err}", dir.display()));
            stats.failures += 1;
            return Ok(());
        }
    };

    for path in subdirs {
        match classify(path, expand_tools) {
            CacheEntry::Package(package_dir) => {
                log.verbose(2, format!("scanning package {}", package_dir.display()));
                recover(
                    prune_package(&package_dir, config, log, stats),
                    &package_dir,
                    log,
                    stats,
                )?;
                recover(
                    remove_if_empty(&package_dir, config, log, stats),
                    &package_dir,
                    log,
                    stats,
                )?;
            }
            CacheEntry::Group(group_dir) => {
                log.verbose(2, format!("descending into {}", group_dir.display()));
                sweep_group(&group_dir, false, config, log, stats)?;
                recover(
                    remove_if_empty(&group_dir, config, log, stats),
                    &group_dir,
                    log,
                    stats,
                )?;
            }
        }
    }

    Ok(())
}

/// Log a failure confined to one directory and keep scanning; the sweep
/// always reaches its final summary. Structural invariant violations stay
/// fatal.
pub(crate) fn recover(
    result: Result<()>,
    dir: &Path,
    log: &Logger,
    stats: &mut SweepStats,
) -> Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(err) if err.is_fatal() => Err(err),
        Err(err) => {
            log.warn(format!("skipping '{}': {err}", dir.display()));
            stats.failures += 1;
            Ok(())
        }
    }
}

/// Delete a package (or emptied group) directory once it has no
/// subdirectories left. No age gate: an empty package entry has no useful
/// content.
fn remove_if_empty(
    dir: &Path,
    config: &Sweep,
    log: &Logger,
    stats: &mut SweepStats,
) -> Result<()> {
    if !subdirectories(dir)?.is_empty() {
        return Ok(());
    }

    log.verbose(1, format!("removing empty directory {}", dir.display()));
    match remove_package_dir(dir, config.dry_run())? {
        DeleteOutcome::Removed => stats.packages_removed += 1,
        DeleteOutcome::AlreadyGone => {}
        DeleteOutcome::Failed(failure) => {
            warn_failure(log, dir, &failure);
            stats.failures += 1;
        }
    }

    Ok(())
}
