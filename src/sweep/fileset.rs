use std::path::Path;
use std::time::SystemTime;

use crate::error::{Result, SweepError};

/// Aggregate view of the regular files beneath a version directory.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FileSet {
    /// Sum of file lengths in bytes
    pub total_size: u64,
    /// Number of regular files found
    pub file_count: usize,
    /// Newest of max(access time, write time) across all files, or None
    /// if the directory holds no files at all
    pub last_used: Option<SystemTime>,
}

impl FileSet {
    pub fn is_empty(&self) -> bool {
        self.file_count == 0
    }
}

/// Walk a version directory and collect its [`FileSet`].
///
/// "Last used" is the maximum over all files of max(access time, write
/// time). Access times are unreliable on filesystems mounted with noatime,
/// so the write time serves as the floor for every file.
pub(crate) fn scan_version_dir(dir: &Path) -> Result<FileSet> {
    let mut total_size = 0u64;
    let mut file_count = 0usize;
    let mut last_used: Option<SystemTime> = None;

    for entry in walkdir::WalkDir::new(dir) {
        let entry = entry.map_err(|err| {
            let path = err
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| dir.to_path_buf());
            match err.into_io_error() {
                Some(source) => SweepError::IoError { path, source },
                None => SweepError::IoError {
                    path,
                    source: std::io::Error::other("filesystem loop detected"),
                },
            }
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let metadata = entry
            .metadata()
            .map_err(|err| SweepError::IoError {
                path: entry.path().to_path_buf(),
                source: err
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("metadata unavailable")),
            })?;

        total_size += metadata.len();
        file_count += 1;

        let used = file_last_used(&metadata);
        if last_used.is_none_or(|current| used > current) {
            last_used = Some(used);
        }
    }

    Ok(FileSet {
        total_size,
        file_count,
        last_used,
    })
}

fn file_last_used(metadata: &std::fs::Metadata) -> SystemTime {
    let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
    match metadata.accessed() {
        Ok(accessed) => accessed.max(modified),
        Err(_) => modified,
    }
}
