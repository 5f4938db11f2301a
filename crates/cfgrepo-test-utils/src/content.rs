//! Unique payloads and version names for tests.

use cfgrepo_core::{Resource, Version};
use uuid::Uuid;

/// A resource whose content is unique per call.
///
/// Two calls with the same label still produce different bytes, so
/// pushes are never accidental no-ops.
pub fn unique_resource(label: &str) -> Resource {
    let id = Uuid::new_v4();
    Resource::new(format!("entry-{label}-{id}\nline-{id}"))
}

/// A version name unique per call.
pub fn unique_version(prefix: &str) -> Version {
    Version::new(format!("{prefix}-{}", Uuid::new_v4()))
}
