//! Per-repository manifest

use std::path::Path;

use cfgrepo_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Persistent repository state: currently just the production pointer.
///
/// Stored as `repository.toml` next to the version directories and
/// rewritten atomically on every change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct Manifest {
    pub production: Option<String>,
}

impl Manifest {
    /// Load the manifest, or the default for a repository that has none yet.
    pub fn load(path: &Path) -> Result<Self> {
        match cfgrepo_fs::io::read_bytes(path)? {
            Some(bytes) => {
                let text = String::from_utf8(bytes).map_err(Error::storage)?;
                toml::from_str(&text).map_err(Error::storage)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let text = toml::to_string_pretty(self).map_err(Error::storage)?;
        cfgrepo_fs::io::write_atomic(path, text.as_bytes())?;
        Ok(())
    }
}
