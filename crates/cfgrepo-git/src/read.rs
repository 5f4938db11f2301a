//! Read-only view at a resolved revision

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use cfgrepo_core::{PathEntry, ReadView, Resource, Result, Version, resolve_resource};
use git2::Oid;

use crate::store::GitStore;

/// Immutable projection of a repository at one commit.
///
/// Reads come straight from the commit tree; the view never observes
/// later session activity.
pub struct GitReadView {
    store: Arc<Mutex<GitStore>>,
    root: PathBuf,
    rev: Oid,
    version: Option<Version>,
}

impl GitReadView {
    pub(crate) fn new(
        store: Arc<Mutex<GitStore>>,
        root: PathBuf,
        rev: Oid,
        version: Option<Version>,
    ) -> Self {
        Self {
            store,
            root,
            rev,
            version,
        }
    }

    /// The version this view was resolved from, when it came from one.
    pub fn version(&self) -> Option<&Version> {
        self.version.as_ref()
    }

    fn store(&self) -> MutexGuard<'_, GitStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ReadView for GitReadView {
    fn resource(&self, path: &str) -> Result<Option<Resource>> {
        let resolved = resolve_resource(&self.root, path)?;
        self.store().resource_at(self.rev, resolved.as_str())
    }

    fn paths(&self) -> Result<Vec<PathEntry>> {
        self.store().entries_at(self.rev)
    }
}
