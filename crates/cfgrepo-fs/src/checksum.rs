//! SHA-256 content digests
//!
//! One canonical digest format (`sha256:<hex>`) used for effective-change
//! detection in backends that have no content-addressed store of their own.

use std::path::Path;

use sha2::{Digest, Sha256};

use crate::{Error, Result};

/// Prefix for all digests produced by this module
const PREFIX: &str = "sha256:";

/// Compute the digest of in-memory content in `sha256:<hex>` form.
pub fn digest_bytes(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{}{:x}", PREFIX, hasher.finalize())
}

/// Compute the digest of a file's content, or `None` if the file is absent.
pub fn digest_file(path: &Path) -> Result<Option<String>> {
    match std::fs::read(path) {
        Ok(content) => Ok(Some(digest_bytes(&content))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(path, e)),
    }
}
