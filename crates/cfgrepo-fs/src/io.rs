//! Atomic and retrying I/O operations

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use backoff::ExponentialBackoff;
use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// Metadata for one file found by [`list_files`].
#[derive(Debug, Clone)]
pub struct FileInfo {
    /// Root-relative path, `/`-separated
    pub path: NormalizedPath,

    /// Size in bytes
    pub size: u64,

    /// Last modification time
    pub modified: SystemTime,
}

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename so readers never observe a partial
/// write. Acquires an advisory lock on the temp file while it is dirty.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    // Temp file in the same directory, so the rename stays on one filesystem
    let temp_name = format!(
        ".{}.{}.tmp",
        path.file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = path.with_file_name(&temp_name);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: path.to_path_buf(),
    })?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file
        .sync_all()
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file.unlock().map_err(|_| Error::LockFailed {
        path: path.to_path_buf(),
    })?;

    fs::rename(&temp_path, path).map_err(|e| Error::io(path, e))?;

    Ok(())
}

/// Read a file's content, or `None` if it does not exist.
pub fn read_bytes(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Remove a file if it exists. Returns whether anything was removed.
pub fn remove_file_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Remove a directory tree, retrying transient failures.
///
/// A missing directory is not an error.
pub fn remove_dir_all(path: &Path) -> Result<()> {
    retry_io(path, || match fs::remove_dir_all(path) {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        other => other,
    })
}

/// Recursively copy a directory tree.
///
/// The destination is created; existing files in it are overwritten.
pub fn copy_dir_all(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst).map_err(|e| Error::io(dst, e))?;

    let entries = fs::read_dir(src).map_err(|e| Error::io(src, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(src, e))?;
        let file_type = entry.file_type().map_err(|e| Error::io(entry.path(), e))?;
        let target = dst.join(entry.file_name());

        if file_type.is_dir() {
            copy_dir_all(&entry.path(), &target)?;
        } else if file_type.is_file() {
            retry_io(&entry.path(), || {
                fs::copy(entry.path(), &target).map(|_| ())
            })?;
        }
        // Symlinks and special files are not configuration resources.
    }

    Ok(())
}

/// Enumerate all regular files under `root`, recursively, with metadata.
///
/// Paths in the result are root-relative and `/`-separated. A missing
/// root yields an empty listing.
pub fn list_files(root: &Path) -> Result<Vec<FileInfo>> {
    let mut files = Vec::new();
    if root.is_dir() {
        collect_files(root, root, &mut files)?;
    }
    Ok(files)
}

fn collect_files(root: &Path, dir: &Path, out: &mut Vec<FileInfo>) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| Error::io(&path, e))?;

        if file_type.is_dir() {
            collect_files(root, &path, out)?;
        } else if file_type.is_file() {
            let metadata = entry.metadata().map_err(|e| Error::io(&path, e))?;
            let relative = path
                .strip_prefix(root)
                .map(NormalizedPath::new)
                .unwrap_or_else(|_| NormalizedPath::new(&path));
            out.push(FileInfo {
                path: relative,
                size: metadata.len(),
                modified: metadata
                    .modified()
                    .map_err(|e| Error::io(&path, e))?,
            });
        }
    }
    Ok(())
}

fn transient(kind: std::io::ErrorKind) -> bool {
    matches!(
        kind,
        std::io::ErrorKind::Interrupted
            | std::io::ErrorKind::WouldBlock
            | std::io::ErrorKind::PermissionDenied
    )
}

/// Run an I/O operation under a short exponential-backoff policy.
///
/// Only error kinds known to be transient (interrupted syscalls, files
/// still held open by a scanner on Windows) are retried; everything else
/// fails on the first attempt.
fn retry_io<T>(path: &Path, mut op: impl FnMut() -> std::io::Result<T>) -> Result<T> {
    let path: PathBuf = path.to_path_buf();
    let policy = ExponentialBackoff {
        max_elapsed_time: Some(Duration::from_secs(2)),
        ..ExponentialBackoff::default()
    };

    backoff::retry(policy, || {
        op().map_err(|e| {
            if transient(e.kind()) {
                tracing::warn!(path = %path.display(), error = %e, "retrying transient I/O failure");
                backoff::Error::transient(e)
            } else {
                backoff::Error::permanent(e)
            }
        })
    })
    .map_err(|e| match e {
        backoff::Error::Permanent(source) | backoff::Error::Transient { err: source, .. } => {
            Error::io(path, source)
        }
    })
}
