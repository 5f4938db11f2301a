//! Low-level git object-database operations
//!
//! Everything here works on trees and refs; no working-tree checkout is
//! ever performed. Session commits are created without updating any ref,
//! so they stay private to the session until a tag makes them durable.

use std::path::Path;

use cfgrepo_core::{Error, PathEntry, Resource, Result};
use chrono::DateTime;
use git2::{ErrorCode, ObjectType, Oid, Repository, Signature, TreeWalkMode, TreeWalkResult};

const TAG_PREFIX: &str = "refs/tags/";

/// The production pointer lives outside `refs/tags/` so it never shows
/// up in the version list.
const PRODUCTION_REF: &str = "refs/meta/production";

const COMMITTER_NAME: &str = "config-repository";
const COMMITTER_EMAIL: &str = "config-repository@localhost";

/// One tree mutation to commit against a parent revision.
pub(crate) enum TreeEdit<'a> {
    /// Store `content` at `path`, replacing any previous entry
    Put { path: &'a str, content: &'a [u8] },

    /// Drop the entry at `path`
    Delete { path: &'a str },

    /// Replace the entry at `path` with whatever the base revision has
    /// there (including nothing)
    RestoreFromBase { path: &'a str, base: Oid },
}

pub(crate) struct GitStore {
    repo: Repository,
}

impl GitStore {
    pub(crate) fn new(repo: Repository) -> Self {
        Self { repo }
    }

    fn signature() -> Result<Signature<'static>> {
        Signature::now(COMMITTER_NAME, COMMITTER_EMAIL).map_err(Error::storage)
    }

    /// Create the initial empty-tree commit if the repository is unborn.
    ///
    /// Returns whether a bootstrap commit was created.
    pub(crate) fn ensure_bootstrap(&self, name: &str) -> Result<bool> {
        if self.repo.head().is_ok() {
            return Ok(false);
        }

        let tree_id = self
            .repo
            .treebuilder(None)
            .and_then(|b| b.write())
            .map_err(Error::storage)?;
        let tree = self.repo.find_tree(tree_id).map_err(Error::storage)?;
        let sig = Self::signature()?;
        self.repo
            .commit(
                Some("HEAD"),
                &sig,
                &sig,
                &format!("bootstrap configuration repository '{name}'"),
                &tree,
                &[],
            )
            .map_err(Error::storage)?;
        Ok(true)
    }

    /// The bootstrap commit every empty-base session starts from.
    pub(crate) fn head_commit(&self) -> Result<Oid> {
        self.repo
            .head()
            .and_then(|head| head.peel_to_commit())
            .map(|commit| commit.id())
            .map_err(Error::storage)
    }

    pub(crate) fn tag_names(&self) -> Result<Vec<String>> {
        let names = self.repo.tag_names(None).map_err(Error::storage)?;
        Ok(names.iter().flatten().map(str::to_string).collect())
    }

    pub(crate) fn tag_exists(&self, name: &str) -> Result<bool> {
        match self.repo.find_reference(&format!("{TAG_PREFIX}{name}")) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(false),
            Err(e) => Err(Error::storage(e)),
        }
    }

    /// The commit a tag points at, or `None` for an unknown tag.
    pub(crate) fn commit_for_tag(&self, name: &str) -> Result<Option<Oid>> {
        match self.repo.revparse_single(&format!("{TAG_PREFIX}{name}")) {
            Ok(object) => {
                let commit = object.peel(ObjectType::Commit).map_err(Error::storage)?;
                Ok(Some(commit.id()))
            }
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(Error::storage(e)),
        }
    }

    /// Bind `name` to `commit` as an annotated tag.
    ///
    /// The caller has already ruled out a duplicate name.
    pub(crate) fn create_tag(&self, name: &str, commit: Oid) -> Result<()> {
        let object = self
            .repo
            .find_object(commit, Some(ObjectType::Commit))
            .map_err(Error::storage)?;
        let sig = Self::signature()?;
        self.repo
            .tag(name, &object, &sig, &format!("version '{name}'"), false)
            .map_err(Error::storage)?;
        Ok(())
    }

    /// The version name the production pointer designates, if set.
    pub(crate) fn production(&self) -> Result<Option<String>> {
        match self.repo.find_reference(PRODUCTION_REF) {
            Ok(reference) => Ok(reference
                .symbolic_target()
                .and_then(|target| target.strip_prefix(TAG_PREFIX))
                .map(str::to_string)),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(Error::storage(e)),
        }
    }

    /// Atomically repoint production at an existing tag.
    pub(crate) fn set_production(&self, name: &str) -> Result<()> {
        self.repo
            .reference_symbolic(
                PRODUCTION_REF,
                &format!("{TAG_PREFIX}{name}"),
                true,
                &format!("set production version to '{name}'"),
            )
            .map_err(Error::storage)?;
        Ok(())
    }

    /// The resource at `path` in the tree of `rev`, or `None`.
    pub(crate) fn resource_at(&self, rev: Oid, path: &str) -> Result<Option<Resource>> {
        let commit = self.repo.find_commit(rev).map_err(Error::storage)?;
        let tree = commit.tree().map_err(Error::storage)?;

        match tree.get_path(Path::new(path)) {
            Ok(entry) if entry.kind() == Some(ObjectType::Blob) => {
                let blob = self.repo.find_blob(entry.id()).map_err(Error::storage)?;
                Ok(Some(Resource::with_modified(
                    blob.content().to_vec(),
                    commit_time(&commit),
                )))
            }
            // A directory is not a resource
            Ok(_) => Ok(None),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(Error::storage(e)),
        }
    }

    /// Every blob in the tree of `rev`, recursively.
    pub(crate) fn entries_at(&self, rev: Oid) -> Result<Vec<PathEntry>> {
        let commit = self.repo.find_commit(rev).map_err(Error::storage)?;
        let tree = commit.tree().map_err(Error::storage)?;
        let last_modified = commit_time(&commit);

        let mut blobs: Vec<(String, Oid)> = Vec::new();
        tree.walk(TreeWalkMode::PreOrder, |dir, entry| {
            if entry.kind() == Some(ObjectType::Blob)
                && let Some(name) = entry.name()
            {
                blobs.push((format!("{dir}{name}"), entry.id()));
            }
            TreeWalkResult::Ok
        })
        .map_err(Error::storage)?;

        let mut entries = Vec::with_capacity(blobs.len());
        for (path, id) in blobs {
            let blob = self.repo.find_blob(id).map_err(Error::storage)?;
            entries.push(PathEntry {
                path,
                size: blob.size() as u64,
                last_modified,
            });
        }
        Ok(entries)
    }

    /// Apply one tree edit against `parent` and commit the result.
    ///
    /// Returns `None` when the edit leaves the tree unchanged, the
    /// effective no-op case that must not produce a log entry. The commit
    /// updates no ref; it stays reachable only through the session log
    /// until tagged.
    pub(crate) fn commit_change(
        &self,
        parent: Oid,
        edit: &TreeEdit<'_>,
        message: &str,
    ) -> Result<Option<Oid>> {
        let parent_commit = self.repo.find_commit(parent).map_err(Error::storage)?;
        let parent_tree = parent_commit.tree().map_err(Error::storage)?;

        let mut index = git2::Index::new().map_err(Error::storage)?;
        index.read_tree(&parent_tree).map_err(Error::storage)?;

        match edit {
            TreeEdit::Put { path, content } => {
                let blob = self.repo.blob(content).map_err(Error::storage)?;
                index
                    .add(&index_entry(path, blob, 0o100_644, content.len() as u64))
                    .map_err(Error::storage)?;
            }
            TreeEdit::Delete { path } => {
                remove_if_present(&mut index, path)?;
            }
            TreeEdit::RestoreFromBase { path, base } => {
                let base_tree = self
                    .repo
                    .find_commit(*base)
                    .and_then(|c| c.tree())
                    .map_err(Error::storage)?;
                match base_tree.get_path(Path::new(path)) {
                    Ok(entry) if entry.kind() == Some(ObjectType::Blob) => {
                        let blob = self.repo.find_blob(entry.id()).map_err(Error::storage)?;
                        index
                            .add(&index_entry(
                                path,
                                entry.id(),
                                entry.filemode() as u32,
                                blob.size() as u64,
                            ))
                            .map_err(Error::storage)?;
                    }
                    Ok(_) => remove_if_present(&mut index, path)?,
                    Err(e) if e.code() == ErrorCode::NotFound => {
                        remove_if_present(&mut index, path)?;
                    }
                    Err(e) => return Err(Error::storage(e)),
                }
            }
        }

        let new_tree_id = index.write_tree_to(&self.repo).map_err(Error::storage)?;
        if new_tree_id == parent_tree.id() {
            return Ok(None);
        }

        let new_tree = self.repo.find_tree(new_tree_id).map_err(Error::storage)?;
        let sig = Self::signature()?;
        let oid = self
            .repo
            .commit(None, &sig, &sig, message, &new_tree, &[&parent_commit])
            .map_err(Error::storage)?;
        Ok(Some(oid))
    }
}

fn remove_if_present(index: &mut git2::Index, path: &str) -> Result<()> {
    if index.get_path(Path::new(path), 0).is_some() {
        index.remove_path(Path::new(path)).map_err(Error::storage)?;
    }
    Ok(())
}

fn index_entry(path: &str, id: Oid, mode: u32, size: u64) -> git2::IndexEntry {
    git2::IndexEntry {
        ctime: git2::IndexTime::new(0, 0),
        mtime: git2::IndexTime::new(0, 0),
        dev: 0,
        ino: 0,
        mode,
        uid: 0,
        gid: 0,
        file_size: size as u32,
        id,
        flags: 0,
        flags_extended: 0,
        path: path.as_bytes().to_vec(),
    }
}

fn commit_time(commit: &git2::Commit<'_>) -> chrono::DateTime<chrono::Utc> {
    DateTime::from_timestamp(commit.time().seconds(), 0).unwrap_or(DateTime::UNIX_EPOCH)
}
