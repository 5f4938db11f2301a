//! Write session over the git object database

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use cfgrepo_core::{
    Error, PathEntry, ReadView, Resource, Result, Version, WriteLog, WriteSession,
    resolve_resource,
};
use git2::Oid;
use tracing::{debug, info};

use crate::store::{GitStore, TreeEdit};

/// A mutable working view backed by dangling commits.
///
/// Each effective mutation commits a new tree against the cursor's
/// commit and records the id in the session's write-ahead log. Undo and
/// redo move the cursor; reads resolve whatever commit the cursor
/// designates. Mutating calls are serialized through the session's own
/// mutex, so a session handle can be shared across threads.
pub struct GitWriteSession {
    store: Arc<Mutex<GitStore>>,
    root: PathBuf,
    base: Oid,
    log: Mutex<WriteLog<Oid>>,
}

impl GitWriteSession {
    pub(crate) fn new(store: Arc<Mutex<GitStore>>, root: PathBuf, base: Oid) -> Self {
        Self {
            store,
            root,
            base,
            log: Mutex::new(WriteLog::new()),
        }
    }

    fn store(&self) -> MutexGuard<'_, GitStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_log(&self) -> MutexGuard<'_, WriteLog<Oid>> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn current_rev(&self) -> Oid {
        self.lock_log().current().copied().unwrap_or(self.base)
    }

    /// Commit one tree edit at the cursor and record the result.
    ///
    /// An edit that leaves the tree unchanged records nothing and leaves
    /// the cursor (and any redo tail) untouched.
    fn apply(&self, edit: TreeEdit<'_>, message: &str) -> Result<()> {
        let mut log = self.lock_log();
        let store = self.store();
        let parent = log.current().copied().unwrap_or(self.base);

        match store.commit_change(parent, &edit, message)? {
            Some(rev) => {
                log.record(rev);
                debug!(commit = %rev, "recorded session revision");
            }
            None => {
                debug!("mutation left the tree unchanged; nothing recorded");
            }
        }
        Ok(())
    }
}

impl ReadView for GitWriteSession {
    fn resource(&self, path: &str) -> Result<Option<Resource>> {
        let resolved = resolve_resource(&self.root, path)?;
        let rev = self.current_rev();
        self.store().resource_at(rev, resolved.as_str())
    }

    fn paths(&self) -> Result<Vec<PathEntry>> {
        let rev = self.current_rev();
        self.store().entries_at(rev)
    }
}

impl WriteSession for GitWriteSession {
    fn push_resource(&self, path: &str, resource: &Resource) -> Result<()> {
        let resolved = resolve_resource(&self.root, path)?;
        self.apply(
            TreeEdit::Put {
                path: resolved.as_str(),
                content: resource.content(),
            },
            &format!("update '{resolved}'"),
        )
    }

    fn remove_resource(&self, path: &str) -> Result<()> {
        let resolved = resolve_resource(&self.root, path)?;
        self.apply(
            TreeEdit::Delete {
                path: resolved.as_str(),
            },
            &format!("remove '{resolved}'"),
        )
    }

    fn tag(&self, version: &Version) -> Result<()> {
        version.validate()?;

        let log = self.lock_log();
        if log.is_empty() {
            return Err(Error::EmptySession);
        }

        let store = self.store();
        if store.tag_exists(version.name())? {
            return Err(Error::DuplicateVersion {
                name: version.name().to_string(),
            });
        }

        let rev = log.current().copied().unwrap_or(self.base);
        store.create_tag(version.name(), rev)?;
        info!(version = %version, commit = %rev, "tagged session state");
        Ok(())
    }

    fn reset_path(&self, path: &str) -> Result<()> {
        let resolved = resolve_resource(&self.root, path)?;
        self.apply(
            TreeEdit::RestoreFromBase {
                path: resolved.as_str(),
                base: self.base,
            },
            &format!("reset '{resolved}' to the session base"),
        )
    }

    fn reset_all(&self) -> Result<()> {
        let mut log = self.lock_log();
        log.clear();
        debug!(base = %self.base, "session reset to base");
        Ok(())
    }

    fn is_undoable(&self) -> Result<bool> {
        Ok(self.lock_log().can_undo())
    }

    fn undo(&self) -> Result<bool> {
        let mut log = self.lock_log();
        Ok(log.undo().is_some())
    }

    fn is_redoable(&self) -> Result<bool> {
        Ok(self.lock_log().can_redo())
    }

    fn redo(&self) -> Result<bool> {
        let mut log = self.lock_log();
        Ok(log.redo().is_some())
    }
}
