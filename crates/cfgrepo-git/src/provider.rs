//! Provider over a root directory of git-backed repositories

use std::path::{Path, PathBuf};

use cfgrepo_core::{Provider, Result};
use git2::Repository;
use tracing::info;

use crate::repository::GitRepository;
use crate::store::GitStore;

/// Factory for git-backed configuration repositories.
///
/// Each repository lives at `<root>/<name>` with its own object
/// database. The root is fixed and canonicalized at construction.
#[derive(Debug, Clone)]
pub struct GitProvider {
    root: PathBuf,
}

impl GitProvider {
    /// Build a provider over `root`, creating the directory if needed.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        std::fs::create_dir_all(root).map_err(|e| cfgrepo_fs::Error::io(root, e))?;
        let root = dunce::canonicalize(root).map_err(|e| cfgrepo_fs::Error::io(root, e))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Provider for GitProvider {
    type Repository = GitRepository;

    fn repository(&self, name: &str) -> Result<GitRepository> {
        cfgrepo_fs::validate_identifier(name)?;

        let dir = self.root.join(name);
        let repo = if dir.join(".git").is_dir() {
            Repository::open(&dir).map_err(cfgrepo_core::Error::storage)?
        } else {
            Repository::init(&dir).map_err(cfgrepo_core::Error::storage)?
        };

        let store = GitStore::new(repo);
        if store.ensure_bootstrap(name)? {
            info!(repository = %name, root = %self.root.display(), "initialized configuration repository");
        }

        Ok(GitRepository::new(name, dir, store))
    }
}
