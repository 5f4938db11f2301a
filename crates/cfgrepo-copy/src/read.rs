//! Read-only view over a snapshot directory

use std::fs;
use std::path::{Path, PathBuf};

use cfgrepo_core::{PathEntry, ReadView, Resource, Result, resolve_resource};
use chrono::{DateTime, Utc};

/// Immutable projection over one version's snapshot directory.
///
/// Version directories are never rewritten after tagging, so concurrent
/// reads need no coordination.
pub struct CopyReadView {
    dir: PathBuf,
}

impl CopyReadView {
    pub(crate) fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

impl ReadView for CopyReadView {
    fn resource(&self, path: &str) -> Result<Option<Resource>> {
        resource_in(&self.dir, path)
    }

    fn paths(&self) -> Result<Vec<PathEntry>> {
        entries_in(&self.dir)
    }
}

/// Read one resource out of a directory-backed view.
pub(crate) fn resource_in(root: &Path, path: &str) -> Result<Option<Resource>> {
    let resolved = resolve_resource(root, path)?;

    match cfgrepo_fs::io::read_bytes(resolved.absolute())? {
        Some(content) => {
            let metadata = fs::metadata(resolved.absolute())
                .map_err(|e| cfgrepo_fs::Error::io(resolved.absolute(), e))?;
            let modified = metadata
                .modified()
                .map_err(|e| cfgrepo_fs::Error::io(resolved.absolute(), e))?;
            Ok(Some(Resource::with_modified(
                content,
                DateTime::<Utc>::from(modified),
            )))
        }
        None => Ok(None),
    }
}

/// Enumerate a directory-backed view recursively.
pub(crate) fn entries_in(root: &Path) -> Result<Vec<PathEntry>> {
    Ok(cfgrepo_fs::io::list_files(root)?
        .into_iter()
        .map(|file| PathEntry {
            path: file.path.as_str().to_string(),
            size: file.size,
            last_modified: DateTime::<Utc>::from(file.modified),
        })
        .collect())
}
