use std::io::ErrorKind;
use std::path::Path;
use std::{fs, io};

use crate::error::{Result, SweepError};

/// Result of one deletion attempt.
///
/// Callers need to distinguish "the directory is gone because we removed
/// it" (size is credited) from "it was already gone" (the goal is achieved
/// but nothing is credited) from recoverable failures worth surfacing.
#[derive(Debug)]
pub(crate) enum DeleteOutcome {
    /// The directory was removed by this call
    Removed,
    /// Another process removed it between discovery and deletion
    AlreadyGone,
    /// The attempt failed; the directory may still be present
    Failed(DeleteFailure),
}

#[derive(Debug)]
pub(crate) enum DeleteFailure {
    /// Insufficient rights on the directory or a file inside it
    PermissionDenied,
    /// Anything else: a genuine lock held on the rename target, an I/O
    /// error mid-removal, and so on
    Other(io::Error),
}

/// Remove a version directory, tolerating files held open by other
/// processes.
///
/// The directory is first renamed in place to a sibling prefixed with an
/// underscore, then removed recursively. On platforms where an open file
/// keeps its path locked, the rename is the step that fails, leaving the
/// directory untouched; once renamed out of its canonical location, a
/// concurrent reader retains access through its open handle while the
/// recursive removal proceeds.
pub(crate) fn remove_version_dir(dir: &Path, dry_run: bool) -> Result<DeleteOutcome> {
    if dry_run {
        return Ok(DeleteOutcome::Removed);
    }

    let parent = dir
        .parent()
        .ok_or_else(|| SweepError::MissingParent(dir.to_path_buf()))?;
    let name = dir
        .file_name()
        .ok_or_else(|| SweepError::MissingParent(dir.to_path_buf()))?;

    let mut staged_name = std::ffi::OsString::from("_");
    staged_name.push(name);
    let staged = parent.join(staged_name);

    if let Err(err) = fs::rename(dir, &staged) {
        return Ok(outcome_from_io_error(err));
    }

    match fs::remove_dir_all(&staged) {
        Ok(()) => Ok(DeleteOutcome::Removed),
        Err(err) => Ok(outcome_from_io_error(err)),
    }
}

/// Remove an empty package directory.
///
/// No rename step: an empty directory has no files another process could
/// hold open, so lock contention is not expected here.
pub(crate) fn remove_package_dir(dir: &Path, dry_run: bool) -> Result<DeleteOutcome> {
    if dry_run {
        return Ok(DeleteOutcome::Removed);
    }

    match fs::remove_dir_all(dir) {
        Ok(()) => Ok(DeleteOutcome::Removed),
        Err(err) => Ok(outcome_from_io_error(err)),
    }
}

fn outcome_from_io_error(err: io::Error) -> DeleteOutcome {
    match err.kind() {
        ErrorKind::NotFound => DeleteOutcome::AlreadyGone,
        ErrorKind::PermissionDenied => DeleteOutcome::Failed(DeleteFailure::PermissionDenied),
        _ => DeleteOutcome::Failed(DeleteFailure::Other(err)),
    }
}
