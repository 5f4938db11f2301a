//! Full-history backend for configuration repositories
//!
//! Revisions are git commits in a per-repository object database. Reads
//! come straight from commit trees; mutations build a new tree from the
//! session cursor's tree and commit it, so undo/redo are pure cursor
//! moves and `supports_history()` is true.

mod store;

pub mod provider;
pub mod read;
pub mod repository;
pub mod write;

pub use provider::GitProvider;
pub use read::GitReadView;
pub use repository::GitRepository;
pub use write::GitWriteSession;
