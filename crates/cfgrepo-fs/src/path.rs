//! Normalized path handling and root-escape validation
//!
//! Resource paths arrive from callers in either `/`- or `\`-separated form.
//! Both are normalized to forward slashes internally and resolved lexically
//! against a repository root; any resolution that would leave the root is
//! rejected before it reaches the filesystem.

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// A path normalized to use forward slashes internally.
///
/// Converting to platform-native form happens only at I/O boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    ///
    /// Converts backslashes to forward slashes for internal storage.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        let normalized = path_str.replace('\\', "/");
        Self { inner: normalized }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a segment.
    pub fn join(&self, segment: &str) -> Self {
        let segment_normalized = segment.replace('\\', "/");
        let joined = if self.inner.is_empty() || self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment_normalized)
        } else {
            format!("{}/{}", self.inner, segment_normalized)
        };
        Self { inner: joined }
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// A resource path resolved and validated against a repository root.
///
/// Carries both the normalized root-relative form (used as a storage key)
/// and the absolute on-disk location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePath {
    relative: NormalizedPath,
    absolute: PathBuf,
}

impl ResourcePath {
    /// The normalized, `/`-separated root-relative path.
    pub fn relative(&self) -> &NormalizedPath {
        &self.relative
    }

    /// The root-relative path as a string slice.
    pub fn as_str(&self) -> &str {
        self.relative.as_str()
    }

    /// The absolute filesystem location under the root.
    pub fn absolute(&self) -> &Path {
        &self.absolute
    }
}

impl std::fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.relative)
    }
}

/// Resolve a caller-supplied path against a repository root.
///
/// Normalization is purely lexical so it works for paths that do not exist
/// yet: empty and `.` segments are dropped, `..` folds into its parent.
/// Absolute input, a `..` that would climb above the root, or a path that
/// resolves to the root itself are all rejected with [`Error::PathEscape`].
pub fn resolve_under(root: &Path, path: &str) -> Result<ResourcePath> {
    let normalized = path.replace('\\', "/");

    if normalized.starts_with('/') {
        return Err(Error::PathEscape {
            path: path.to_string(),
        });
    }

    let mut segments: Vec<&str> = Vec::new();
    for segment in normalized.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                if segments.pop().is_none() {
                    return Err(Error::PathEscape {
                        path: path.to_string(),
                    });
                }
            }
            other => {
                // A drive-qualified segment re-roots the path on Windows.
                if other.contains(':') {
                    return Err(Error::PathEscape {
                        path: path.to_string(),
                    });
                }
                segments.push(other);
            }
        }
    }

    if segments.is_empty() {
        return Err(Error::PathEscape {
            path: path.to_string(),
        });
    }

    let relative = NormalizedPath::new(segments.join("/"));
    let mut absolute = root.to_path_buf();
    for segment in &segments {
        absolute.push(segment);
    }

    Ok(ResourcePath { relative, absolute })
}

/// Validate a repository or version name as a single path segment.
///
/// Names become directory names and git refs, so separators, relative
/// markers, and other reserved characters are rejected.
pub fn validate_identifier(name: &str) -> Result<()> {
    let reject = |reason: &str| {
        Err(Error::InvalidIdentifier {
            name: name.to_string(),
            reason: reason.to_string(),
        })
    };

    if name.trim().is_empty() {
        return reject("must not be empty");
    }
    if name == "." || name == ".." {
        return reject("must not be a relative path marker");
    }
    if name.contains('/') || name.contains('\\') {
        return reject("must not contain path separators");
    }
    if name.contains(':') || name.contains('\0') {
        return reject("must not contain reserved characters");
    }
    Ok(())
}
