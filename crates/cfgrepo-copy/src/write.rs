//! Write session over the working directory

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use cfgrepo_core::{
    Error, PathEntry, ReadView, Resource, Result, Version, WriteSession, resolve_resource,
};
use cfgrepo_fs::checksum;
use tracing::{debug, info};

use crate::read::{entries_in, resource_in};

/// A mutable working view without revision history.
///
/// Mutations edit the working directory in place. The session counts
/// effective mutations so an untouched session cannot be tagged; the
/// undo/redo/reset family is unavailable on this backend and fails with
/// `HistoryUnsupported`. Mutating calls are serialized through the
/// session's own mutex.
pub struct CopyWriteSession {
    versions_dir: PathBuf,
    work_dir: PathBuf,
    mutations: Mutex<usize>,
}

impl CopyWriteSession {
    pub(crate) fn new(versions_dir: PathBuf, work_dir: PathBuf) -> Self {
        Self {
            versions_dir,
            work_dir,
            mutations: Mutex::new(0),
        }
    }

    fn lock_mutations(&self) -> MutexGuard<'_, usize> {
        self.mutations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

fn unsupported(operation: &'static str) -> Error {
    Error::HistoryUnsupported { operation }
}

impl ReadView for CopyWriteSession {
    fn resource(&self, path: &str) -> Result<Option<Resource>> {
        resource_in(&self.work_dir, path)
    }

    fn paths(&self) -> Result<Vec<PathEntry>> {
        entries_in(&self.work_dir)
    }
}

impl WriteSession for CopyWriteSession {
    fn push_resource(&self, path: &str, resource: &Resource) -> Result<()> {
        let resolved = resolve_resource(&self.work_dir, path)?;
        let mut mutations = self.lock_mutations();

        // Identical content leaves nothing to commit
        let incoming = checksum::digest_bytes(resource.content());
        if let Some(existing) = checksum::digest_file(resolved.absolute())?
            && existing == incoming
        {
            debug!(path = %resolved, "content unchanged; nothing to commit");
            return Ok(());
        }

        cfgrepo_fs::io::write_atomic(resolved.absolute(), resource.content())?;
        *mutations += 1;
        debug!(path = %resolved, "stored resource");
        Ok(())
    }

    fn remove_resource(&self, path: &str) -> Result<()> {
        let resolved = resolve_resource(&self.work_dir, path)?;
        let mut mutations = self.lock_mutations();

        if cfgrepo_fs::io::remove_file_if_exists(resolved.absolute())? {
            *mutations += 1;
            debug!(path = %resolved, "removed resource");
        }
        Ok(())
    }

    fn tag(&self, version: &Version) -> Result<()> {
        version.validate()?;

        let mutations = self.lock_mutations();
        if *mutations == 0 {
            return Err(Error::EmptySession);
        }

        let target = self.versions_dir.join(version.name());
        if target.exists() {
            return Err(Error::DuplicateVersion {
                name: version.name().to_string(),
            });
        }

        cfgrepo_fs::io::copy_dir_all(&self.work_dir, &target)?;
        info!(version = %version, "tagged working state");
        Ok(())
    }

    fn reset_path(&self, _path: &str) -> Result<()> {
        Err(unsupported("reset_path"))
    }

    fn reset_all(&self) -> Result<()> {
        Err(unsupported("reset_all"))
    }

    fn is_undoable(&self) -> Result<bool> {
        Err(unsupported("is_undoable"))
    }

    fn undo(&self) -> Result<bool> {
        Err(unsupported("undo"))
    }

    fn is_redoable(&self) -> Result<bool> {
        Err(unsupported("is_redoable"))
    }

    fn redo(&self) -> Result<bool> {
        Err(unsupported("redo"))
    }
}
