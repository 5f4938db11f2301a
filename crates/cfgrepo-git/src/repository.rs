//! Git-backed configuration repository

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use cfgrepo_core::{ConfigRepository, Error, Result, Version};
use git2::Oid;
use tracing::info;

use crate::read::GitReadView;
use crate::store::GitStore;
use crate::write::GitWriteSession;

/// A named repository whose versions are git tags and whose production
/// pointer is a symbolic ref.
///
/// All object-database access is serialized through one mutex, so tag
/// creation and production-pointer moves are atomic with respect to
/// concurrent readers.
pub struct GitRepository {
    name: String,
    root: PathBuf,
    store: Arc<Mutex<GitStore>>,
}

impl GitRepository {
    pub(crate) fn new(name: &str, root: PathBuf, store: GitStore) -> Self {
        Self {
            name: name.to_string(),
            root,
            store: Arc::new(Mutex::new(store)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn store(&self) -> MutexGuard<'_, GitStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn required_rev(&self, store: &GitStore, version: &Version) -> Result<Oid> {
        version.validate()?;
        store
            .commit_for_tag(version.name())?
            .ok_or_else(|| Error::UnknownVersion {
                name: version.name().to_string(),
            })
    }
}

impl ConfigRepository for GitRepository {
    type Read = GitReadView;
    type Write = GitWriteSession;

    fn versions(&self) -> Result<Vec<Version>> {
        Ok(self
            .store()
            .tag_names()?
            .into_iter()
            .map(Version::new)
            .collect())
    }

    fn production_version(&self) -> Result<Option<Version>> {
        Ok(self.store().production()?.map(Version::new))
    }

    fn set_production_version(&self, version: &Version) -> Result<()> {
        version.validate()?;
        let store = self.store();
        if !store.tag_exists(version.name())? {
            return Err(Error::UnknownVersion {
                name: version.name().to_string(),
            });
        }
        store.set_production(version.name())?;
        info!(repository = %self.name, version = %version, "production version moved");
        Ok(())
    }

    fn read(&self, version: Option<&Version>) -> Result<Option<GitReadView>> {
        let store = self.store();
        let resolved = match version {
            Some(v) => Some((self.required_rev(&store, v)?, v.clone())),
            None => match store.production()? {
                Some(name) => {
                    let v = Version::new(name);
                    Some((self.required_rev(&store, &v)?, v))
                }
                // No production version: there is nothing to view
                None => None,
            },
        };
        drop(store);

        Ok(resolved.map(|(rev, version)| {
            GitReadView::new(
                Arc::clone(&self.store),
                self.root.clone(),
                rev,
                Some(version),
            )
        }))
    }

    fn init(&self, version: Option<&Version>) -> Result<GitWriteSession> {
        let store = self.store();
        let base = match version {
            Some(v) => self.required_rev(&store, v)?,
            None => match store.production()? {
                Some(name) => self.required_rev(&store, &Version::new(name))?,
                // Empty repository: base the session on the bootstrap commit
                None => store.head_commit()?,
            },
        };
        drop(store);

        Ok(GitWriteSession::new(
            Arc::clone(&self.store),
            self.root.clone(),
            base,
        ))
    }

    fn supports_history(&self) -> bool {
        true
    }
}
