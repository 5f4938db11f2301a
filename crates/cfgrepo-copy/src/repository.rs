//! Copy-backed configuration repository

use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use cfgrepo_core::{ConfigRepository, Error, Result, Version};
use tracing::{info, warn};

use crate::manifest::Manifest;
use crate::read::CopyReadView;
use crate::write::CopyWriteSession;

const MANIFEST_FILE: &str = "repository.toml";
const VERSIONS_DIR: &str = "versions";
const WORK_DIR: &str = "work";

/// A repository whose versions are immutable snapshot directories.
pub struct CopyRepository {
    name: String,
    versions_dir: PathBuf,
    work_dir: PathBuf,
    manifest_path: PathBuf,
    manifest: Mutex<Manifest>,
}

impl CopyRepository {
    pub(crate) fn open(name: &str, dir: PathBuf) -> Result<Self> {
        let versions_dir = dir.join(VERSIONS_DIR);
        fs::create_dir_all(&versions_dir).map_err(|e| cfgrepo_fs::Error::io(&versions_dir, e))?;

        let manifest_path = dir.join(MANIFEST_FILE);
        let mut manifest = Manifest::load(&manifest_path)?;

        // I8: never keep a pointer to a version that is gone
        if let Some(production) = &manifest.production
            && !versions_dir.join(production).is_dir()
        {
            warn!(
                repository = %name,
                version = %production,
                "dropping production pointer to a missing version"
            );
            manifest.production = None;
            manifest.save(&manifest_path)?;
        }

        Ok(Self {
            name: name.to_string(),
            versions_dir,
            work_dir: dir.join(WORK_DIR),
            manifest_path,
            manifest: Mutex::new(manifest),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn manifest(&self) -> MutexGuard<'_, Manifest> {
        self.manifest.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The snapshot directory of an existing version.
    fn required_dir(&self, version: &Version) -> Result<PathBuf> {
        version.validate()?;
        let dir = self.versions_dir.join(version.name());
        if dir.is_dir() {
            Ok(dir)
        } else {
            Err(Error::UnknownVersion {
                name: version.name().to_string(),
            })
        }
    }
}

impl ConfigRepository for CopyRepository {
    type Read = CopyReadView;
    type Write = CopyWriteSession;

    fn versions(&self) -> Result<Vec<Version>> {
        let entries =
            fs::read_dir(&self.versions_dir).map_err(|e| cfgrepo_fs::Error::io(&self.versions_dir, e))?;

        let mut versions = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| cfgrepo_fs::Error::io(&self.versions_dir, e))?;
            let file_type = entry
                .file_type()
                .map_err(|e| cfgrepo_fs::Error::io(entry.path(), e))?;
            if file_type.is_dir() {
                versions.push(Version::new(entry.file_name().to_string_lossy()));
            }
        }
        Ok(versions)
    }

    fn production_version(&self) -> Result<Option<Version>> {
        Ok(self.manifest().production.clone().map(Version::new))
    }

    fn set_production_version(&self, version: &Version) -> Result<()> {
        self.required_dir(version)?;

        let mut manifest = self.manifest();
        manifest.production = Some(version.name().to_string());
        manifest.save(&self.manifest_path)?;
        info!(repository = %self.name, version = %version, "production version moved");
        Ok(())
    }

    fn read(&self, version: Option<&Version>) -> Result<Option<CopyReadView>> {
        let dir = match version {
            Some(v) => Some(self.required_dir(v)?),
            None => match self.production_version()? {
                Some(v) => Some(self.required_dir(&v)?),
                // No production version: there is nothing to view
                None => None,
            },
        };
        Ok(dir.map(CopyReadView::new))
    }

    fn init(&self, version: Option<&Version>) -> Result<CopyWriteSession> {
        let from = match version {
            Some(v) => Some(self.required_dir(v)?),
            None => match self.production_version()? {
                Some(v) => Some(self.required_dir(&v)?),
                None => None,
            },
        };

        // The working directory always starts over from the resolved base
        cfgrepo_fs::io::remove_dir_all(&self.work_dir)?;
        match &from {
            Some(src) => cfgrepo_fs::io::copy_dir_all(src, &self.work_dir)?,
            None => {
                fs::create_dir_all(&self.work_dir)
                    .map_err(|e| cfgrepo_fs::Error::io(&self.work_dir, e))?;
            }
        }

        Ok(CopyWriteSession::new(
            self.versions_dir.clone(),
            self.work_dir.clone(),
        ))
    }

    fn supports_history(&self) -> bool {
        false
    }
}
