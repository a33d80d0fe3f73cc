//! Tracing setup shared by linklet consumers.
//!
//! The services emit structured `tracing` events at their lifecycle
//! points (link created, code generated, redirect attempted, click
//! recorded, storage degradation). Without a subscriber installed every
//! emission is a no-op, so the core tolerates the sink being absent;
//! consumers that want the events call [`init`] once at startup.

use tracing_subscriber::EnvFilter;

/// Installs the global fmt subscriber, filtered by `RUST_LOG` with an
/// `info` default.
///
/// # Panics
///
/// Panics if a global subscriber is already installed. Use [`try_init`]
/// where that is not a programming error (e.g. tests).
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(default_filter())
        .init();
}

/// Like [`init`], but quietly keeps the existing subscriber when one is
/// already installed. Suited to test binaries where several cases race
/// to initialize.
pub fn try_init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(default_filter())
        .try_init();
}

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}
