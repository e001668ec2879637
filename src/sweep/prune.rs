use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use semver::Version;

use super::config::{Sweep, SweepStats};
use super::delete::{DeleteFailure, DeleteOutcome, remove_version_dir};
use super::fileset::scan_version_dir;
use crate::error::{Result, SweepError};
use crate::logging::Logger;

/// Prune one package directory: parse its version subdirectories, apply
/// the retention policy, and delete the losers.
///
/// Runs the three passes in order: discovery, supersession (only when
/// enabled), then the age pass. Versions handled by the supersession pass
/// are dropped from the mapping before the age pass, so a directory is
/// never counted or operated on twice in the same run.
pub(crate) fn prune_package(
    package_dir: &Path,
    config: &Sweep,
    log: &Logger,
    stats: &mut SweepStats,
) -> Result<()> {
    let mut versions = discover_versions(package_dir, log, stats)?;

    if config.prune_superseded() {
        prune_superseded(&mut versions, config, log, stats)?;
    }

    // After the supersession pass only protected versions remain, and
    // protected versions are kept outright: the stale rule applies only
    // when supersession did not run. Empty-content cleanup applies
    // regardless.
    let stale_enabled = !config.prune_superseded();
    age_pass(&versions, stale_enabled, config, log, stats)?;

    Ok(())
}

/// Map every parseable version subdirectory to its path.
///
/// Directories whose name is not a semantic version are warned about and
/// left untouched; the pruning logic never deletes them. A duplicate
/// parsed version means the cache layout broke an invariant we rely on,
/// so that aborts the run.
fn discover_versions(
    package_dir: &Path,
    log: &Logger,
    stats: &mut SweepStats,
) -> Result<BTreeMap<Version, PathBuf>> {
    let mut versions = BTreeMap::new();

    for path in subdirectories(package_dir)? {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            log.warn(format!(
                "skipping '{}': not a semantic version",
                path.display()
            ));
            stats.unparsable_skipped += 1;
            continue;
        };

        match Version::parse(name) {
            Ok(version) => {
                if versions.insert(version.clone(), path.clone()).is_some() {
                    return Err(SweepError::DuplicateVersion {
                        package: package_dir.to_path_buf(),
                        version,
                    });
                }
            }
            Err(_) => {
                log.warn(format!(
                    "skipping '{}': not a semantic version",
                    path.display()
                ));
                stats.unparsable_skipped += 1;
            }
        }
    }

    Ok(versions)
}

/// Compute the protected versions of a package: the newest release, and
/// the newest prerelease strictly newer than that release (or the newest
/// prerelease overall when no release exists).
///
/// At most two versions come back, and exactly two only when a release
/// exists alongside a strictly newer prerelease.
pub(crate) fn protected_versions(
    versions: &BTreeMap<Version, PathBuf>,
) -> (Option<Version>, Option<Version>) {
    let newest_release = versions
        .keys()
        .rev()
        .find(|v| v.pre.is_empty())
        .cloned();

    let newest_prerelease = versions
        .keys()
        .rev()
        .find(|v| !v.pre.is_empty())
        .filter(|pre| match &newest_release {
            Some(release) => *pre > release,
            None => true,
        })
        .cloned();

    (newest_release, newest_prerelease)
}

/// Delete every version that a newer one supersedes.
///
/// The protected set is computed once, before any deletion, so removals
/// within the pass cannot perturb the candidate set. Every candidate is
/// dropped from the mapping afterwards whether or not its deletion
/// succeeded; a failed deletion is not retried by the age pass.
fn prune_superseded(
    versions: &mut BTreeMap<Version, PathBuf>,
    config: &Sweep,
    log: &Logger,
    stats: &mut SweepStats,
) -> Result<()> {
    let (newest_release, newest_prerelease) = protected_versions(versions);

    let superseded: Vec<Version> = versions
        .keys()
        .filter(|v| newest_release.as_ref() != Some(*v) && newest_prerelease.as_ref() != Some(*v))
        .cloned()
        .collect();

    for version in superseded {
        let Some(dir) = versions.remove(&version) else {
            continue;
        };

        let size = match scan_version_dir(&dir) {
            Ok(fileset) => fileset.total_size,
            Err(err) => {
                log.warn(format!("could not scan '{}': {err}", dir.display()));
                stats.failures += 1;
                continue;
            }
        };

        log.verbose(1, format!("{} superseded by a newer version", dir.display()));
        match remove_version_dir(&dir, config.dry_run())? {
            DeleteOutcome::Removed => {
                stats.bytes_freed += size;
                stats.versions_removed += 1;
            }
            DeleteOutcome::AlreadyGone => {}
            DeleteOutcome::Failed(failure) => {
                warn_failure(log, &dir, &failure);
                stats.failures += 1;
            }
        }
    }

    Ok(())
}

/// Delete the remaining versions that are empty, or - when the stale rule
/// is enabled - idle past the threshold.
fn age_pass(
    versions: &BTreeMap<Version, PathBuf>,
    stale_enabled: bool,
    config: &Sweep,
    log: &Logger,
    stats: &mut SweepStats,
) -> Result<()> {
    let now = SystemTime::now();

    for dir in versions.values() {
        let fileset = match scan_version_dir(dir) {
            Ok(fileset) => fileset,
            Err(err) => {
                log.warn(format!("could not scan '{}': {err}", dir.display()));
                stats.failures += 1;
                continue;
            }
        };

        if fileset.is_empty() {
            // Empty-content cleanup: not age-gated, and deliberately
            // without a per-directory report line.
            match remove_version_dir(dir, config.dry_run())? {
                DeleteOutcome::Removed => stats.versions_removed += 1,
                DeleteOutcome::AlreadyGone => {}
                DeleteOutcome::Failed(failure) => {
                    warn_failure(log, dir, &failure);
                    stats.failures += 1;
                }
            }
            continue;
        }

        if !stale_enabled {
            continue;
        }

        let Some(last_used) = fileset.last_used else {
            continue;
        };

        // A last-used instant in the future means the package is in use
        // right now; idle time clamps to zero.
        let idle = now.duration_since(last_used).unwrap_or(Duration::ZERO);
        if idle <= config.min_idle() {
            continue;
        }

        let idle_days = idle.as_secs() / 86_400;
        log.info(format!(
            "{} last used {idle_days} days ago",
            dir.display()
        ));

        match remove_version_dir(dir, config.dry_run())? {
            DeleteOutcome::Removed => {
                stats.bytes_freed += fileset.total_size;
                stats.versions_removed += 1;
            }
            DeleteOutcome::AlreadyGone => {}
            DeleteOutcome::Failed(failure) => {
                warn_failure(log, dir, &failure);
                stats.failures += 1;
            }
        }
    }

    Ok(())
}

pub(crate) fn warn_failure(log: &Logger, path: &Path, failure: &DeleteFailure) {
    match failure {
        DeleteFailure::PermissionDenied => {
            log.warn(format!("permission denied deleting '{}'", path.display()));
        }
        DeleteFailure::Other(err) => {
            log.warn(format!("could not delete '{}': {err}", path.display()));
        }
    }
}

/// Enumerate the immediate subdirectories of a directory in filesystem
/// order.
pub(crate) fn subdirectories(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|source| SweepError::IoError {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| SweepError::IoError {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }

    Ok(dirs)
}
