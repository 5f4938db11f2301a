//! Temp-rooted provider fixtures.
//!
//! Each fixture owns its [`TempDir`]; keep the returned pair alive for
//! the duration of the test or the root disappears under the provider.

use cfgrepo_copy::CopyProvider;
use cfgrepo_git::GitProvider;
use tempfile::TempDir;

/// A git-backed provider over a fresh temporary root.
///
/// # Panics
/// Panics if the temp directory or the provider cannot be created.
pub fn git_provider() -> (TempDir, GitProvider) {
    let temp = TempDir::new().expect("git_provider: failed to create temp dir");
    let provider =
        GitProvider::new(temp.path()).expect("git_provider: failed to build provider");
    (temp, provider)
}

/// A copy-backed provider over a fresh temporary root.
///
/// # Panics
/// Panics if the temp directory or the provider cannot be created.
pub fn copy_provider() -> (TempDir, CopyProvider) {
    let temp = TempDir::new().expect("copy_provider: failed to create temp dir");
    let provider =
        CopyProvider::new(temp.path()).expect("copy_provider: failed to build provider");
    (temp, provider)
}

/// Rebuild a git provider over an existing root, for reuse scenarios.
pub fn reopen_git_provider(temp: &TempDir) -> GitProvider {
    GitProvider::new(temp.path()).expect("reopen_git_provider: failed to build provider")
}

/// Rebuild a copy provider over an existing root, for reuse scenarios.
pub fn reopen_copy_provider(temp: &TempDir) -> CopyProvider {
    CopyProvider::new(temp.path()).expect("reopen_copy_provider: failed to build provider")
}
