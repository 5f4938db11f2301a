//! Shared test utilities for the cfgrepo workspace.
//!
//! This crate provides standardised fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`content`]: unique payloads and version names
//! - [`store`]: temp-rooted provider fixtures for both backends

pub mod content;
pub mod store;

use std::sync::Once;

static TRACING: Once = Once::new();

/// Install an env-filtered tracing subscriber once per test binary.
///
/// Controlled through `RUST_LOG`; calling it repeatedly is harmless.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
