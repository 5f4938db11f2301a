//! Provider over a root directory of copy-backed repositories

use std::path::{Path, PathBuf};

use cfgrepo_core::{Provider, Result};

use crate::repository::CopyRepository;

/// Factory for copy-backed configuration repositories.
///
/// Each repository lives at `<root>/<name>`. The root is fixed and
/// canonicalized at construction.
#[derive(Debug, Clone)]
pub struct CopyProvider {
    root: PathBuf,
}

impl CopyProvider {
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

impl Provider for CopyProvider {
    type Repository = CopyRepository;

    fn repository(&self, name: &str) -> Result<CopyRepository> {
        cfgrepo_fs::validate_identifier(name)?;
        CopyRepository::open(name, self.root.join(name))
    }
}
