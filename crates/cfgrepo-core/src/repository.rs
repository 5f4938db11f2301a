//! Repository-level traits
//!
//! A [`Provider`] turns a root directory into named repositories; a
//! [`ConfigRepository`] owns the version set and the production pointer
//! and hands out read and write views.

use crate::session::{ReadView, WriteSession};
use crate::{Result, Version};

/// Factory over a root directory, creating repositories on first access.
///
/// The root is fixed at construction time and canonicalized once;
/// repositories created through one provider are visible to any later
/// provider built over the same root.
pub trait Provider {
    type Repository: ConfigRepository;

    /// Open the named repository, creating it on first access.
    ///
    /// The name must be a plain path segment; anything else fails with
    /// `InvalidArgument`.
    fn repository(&self, name: &str) -> Result<Self::Repository>;
}

/// A named, versioned collection of configuration resources.
pub trait ConfigRepository {
    type Read: ReadView;
    type Write: WriteSession;

    /// All tagged versions, order not significant. Empty initially.
    fn versions(&self) -> Result<Vec<Version>>;

    /// The version currently designated as production, if any.
    fn production_version(&self) -> Result<Option<Version>>;

    /// Move the production pointer to an existing version.
    ///
    /// Fails with `UnknownVersion` if the version has not been tagged;
    /// the replacement is atomic with respect to concurrent readers.
    fn set_production_version(&self, version: &Version) -> Result<()>;

    /// Read access at a resolved version.
    ///
    /// Resolution order: the explicit version if given, else the
    /// production pointer. If neither resolves there is no view:
    /// `Ok(None)`, not an error. An explicit name that does not exist
    /// fails with `UnknownVersion`.
    fn read(&self, version: Option<&Version>) -> Result<Option<Self::Read>>;

    /// Create a write session based on a resolved version.
    ///
    /// Resolution works like [`read`](Self::read), except that an empty
    /// repository yields a session over an empty base rather than no
    /// session; bootstrap always succeeds.
    fn init(&self, version: Option<&Version>) -> Result<Self::Write>;

    /// Whether this backend keeps per-commit history.
    ///
    /// Fixed per backend. When `false`, the undo/redo/reset family of
    /// session operations fails with `HistoryUnsupported`.
    fn supports_history(&self) -> bool;
}
