//! Filesystem layer for the configuration repository workspace
//!
//! Provides normalized path handling with root-escape validation,
//! atomic file I/O, and content checksums. Backends never touch the
//! filesystem except through this crate.

pub mod checksum;
pub mod error;
pub mod io;
pub mod path;

pub use error::{Error, Result};
pub use io::FileInfo;
pub use path::{NormalizedPath, ResourcePath, resolve_under, validate_identifier};
