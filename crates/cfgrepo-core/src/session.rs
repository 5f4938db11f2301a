//! Read views, write sessions, and the write-ahead revision log

use crate::{PathEntry, Resource, Result, Version};

/// Read-only projection of a repository at a resolved version.
///
/// Stateless after construction; safe to share across threads.
pub trait ReadView {
    /// The resource at `path`, or `None` if absent at this version.
    ///
    /// The path is validated against the repository root first.
    fn resource(&self, path: &str) -> Result<Option<Resource>>;

    /// All resource paths at this version, recursively, with metadata.
    fn paths(&self) -> Result<Vec<PathEntry>>;
}

/// A mutable working view with its own linear commit history.
///
/// Every effective mutation appends a revision to the session's
/// write-ahead log and advances the cursor; a mutation made while the
/// cursor sits before the end of the log discards the abandoned tail
/// first. Reads observe the cursor position.
pub trait WriteSession: ReadView {
    /// Store `resource` at `path`, replacing any previous content.
    ///
    /// A push that leaves the working state unchanged records nothing.
    fn push_resource(&self, path: &str, resource: &Resource) -> Result<()>;

    /// Remove the resource at `path`. Removing an absent path is a no-op
    /// and records nothing.
    fn remove_resource(&self, path: &str) -> Result<()>;

    /// Freeze the state at the cursor into a durable named version.
    ///
    /// Fails with `EmptySession` when the session has no commits and
    /// with `DuplicateVersion` when the name is taken. Tagging after an
    /// undo captures the intermediate state; the redo tail survives.
    fn tag(&self, version: &Version) -> Result<()>;

    /// Revert a single path to its content in the session's base
    /// revision, committed through the normal truncate-and-append rule.
    fn reset_path(&self, path: &str) -> Result<()>;

    /// Discard everything: restore the base revision, clear the log and
    /// cursor. Records no commit.
    fn reset_all(&self) -> Result<()>;

    /// Whether there is an earlier log entry to move to.
    fn is_undoable(&self) -> Result<bool>;

    /// Move the cursor one entry back. Returns `Ok(false)` when there is
    /// nothing to undo, which is a normal outcome, not an error.
    fn undo(&self) -> Result<bool>;

    /// Whether the cursor sits before the last log entry.
    fn is_redoable(&self) -> Result<bool>;

    /// Move the cursor one entry forward. Returns `Ok(false)` when there
    /// is nothing to redo.
    fn redo(&self) -> Result<bool>;
}

/// Append-only arena of revision references plus a cursor.
///
/// Cursor position 0 denotes the session base; position `k` denotes the
/// k-th log entry. Recording while the cursor is mid-log truncates the
/// abandoned tail before appending, so entry `k` is always the direct
/// descendant of entry `k-1`.
#[derive(Debug, Clone)]
pub struct WriteLog<R> {
    entries: Vec<R>,
    cursor: usize,
}

impl<R> WriteLog<R> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
        }
    }

    /// Record a freshly committed revision at the cursor.
    pub fn record(&mut self, revision: R) {
        self.entries.truncate(self.cursor);
        self.entries.push(revision);
        self.cursor = self.entries.len();
    }

    /// The revision at the cursor, or `None` when the cursor is at the base.
    pub fn current(&self) -> Option<&R> {
        if self.cursor == 0 {
            None
        } else {
            self.entries.get(self.cursor - 1)
        }
    }

    /// An undo target exists: the cursor is past the first log entry.
    ///
    /// Moving back to the base is not an undo; that is what
    /// [`clear`](Self::clear) (a full reset) is for.
    pub fn can_undo(&self) -> bool {
        self.cursor > 1
    }

    /// Move the cursor one entry back and return the new current revision.
    pub fn undo(&mut self) -> Option<&R> {
        if self.can_undo() {
            self.cursor -= 1;
            self.current()
        } else {
            None
        }
    }

    /// A redo target exists: the cursor sits before the last entry.
    pub fn can_redo(&self) -> bool {
        self.cursor < self.entries.len()
    }

    /// Move the cursor one entry forward and return the new current revision.
    pub fn redo(&mut self) -> Option<&R> {
        if self.can_redo() {
            self.cursor += 1;
            self.current()
        } else {
            None
        }
    }

    /// Drop the whole log and return the cursor to the base.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<R> Default for WriteLog<R> {
    fn default() -> Self {
        Self::new()
    }
}
