//! Resources and path listings

use chrono::{DateTime, Utc};

/// A configuration resource: owned content plus modification metadata.
///
/// Resources are replaced wholesale; there are no partial updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    content: Vec<u8>,
    last_modified: DateTime<Utc>,
}

impl Resource {
    /// Create a resource from content to be pushed, stamped with the
    /// current time.
    pub fn new(content: impl Into<Vec<u8>>) -> Self {
        Self {
            content: content.into(),
            last_modified: Utc::now(),
        }
    }

    /// Create a resource carrying an explicit modification time.
    ///
    /// Used by backends when materializing a resource out of storage.
    pub fn with_modified(content: impl Into<Vec<u8>>, last_modified: DateTime<Utc>) -> Self {
        Self {
            content: content.into(),
            last_modified,
        }
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Size of the content in bytes.
    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    pub fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }
}

/// One entry in a recursive path listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathEntry {
    /// Root-relative path, `/`-separated
    pub path: String,

    /// Size in bytes
    pub size: u64,

    /// Last modification time
    pub last_modified: DateTime<Utc>,
}
