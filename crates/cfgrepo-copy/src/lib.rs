//! Directory-copy backend for configuration repositories
//!
//! Versions are plain directory snapshots under `versions/`, the working
//! state is a single `work/` directory, and the production pointer lives
//! in a `repository.toml` manifest. There is no revision history:
//! `supports_history()` is false and the undo/redo/reset family fails
//! with `HistoryUnsupported`.

mod manifest;

pub mod provider;
pub mod read;
pub mod repository;
pub mod write;

pub use provider::CopyProvider;
pub use read::CopyReadView;
pub use repository::CopyRepository;
pub use write::CopyWriteSession;
