//! Core API for versioned configuration repositories
//!
//! A repository is a named collection of configuration resources with a
//! set of immutable tagged versions, a movable production pointer, and
//! mutable write sessions carrying a linear undo/redo history. This crate
//! defines the data model, the traits every backend implements, and the
//! write-ahead log that drives session history.
//!
//! # Architecture
//!
//! ```text
//!        consumers (deployment / admin tooling)
//!                        |
//!                  cfgrepo-core
//!                   /        \
//!           cfgrepo-git   cfgrepo-copy
//!                   \        /
//!                  cfgrepo-fs
//! ```
//!
//! Backends differ in one capability: `cfgrepo-git` keeps full history
//! (undo/redo/reset are live), `cfgrepo-copy` only snapshots whole
//! directories (the history operations fail with `HistoryUnsupported`).

pub mod error;
pub mod paths;
pub mod repository;
pub mod resource;
pub mod session;
pub mod version;

pub use error::{Error, Result};
pub use paths::resolve_resource;
pub use repository::{ConfigRepository, Provider};
pub use resource::{PathEntry, Resource};
pub use session::{ReadView, WriteLog, WriteSession};
pub use version::Version;
