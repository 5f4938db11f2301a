//! Resource path validation shared by every view

use std::path::Path;

use cfgrepo_fs::ResourcePath;

use crate::{Error, Result};

/// Validate and resolve a caller-supplied resource path against a root.
///
/// Empty input is an [`Error::InvalidArgument`]; anything resolving
/// outside the root is an [`Error::PathViolation`]. Every read and every
/// mutation goes through this guard before touching storage.
pub fn resolve_resource(root: &Path, path: &str) -> Result<ResourcePath> {
    if path.trim().is_empty() {
        return Err(Error::invalid_argument("resource path must not be empty"));
    }
    Ok(cfgrepo_fs::resolve_under(root, path)?)
}
