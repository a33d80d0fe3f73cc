//! Link collection storage for linklet.
//!
//! Provides [`LocalStore`], the canonical in-memory link collection
//! mirrored to a single JSON file, the client-side storage analog.

pub mod local;

pub use local::{LoadReport, LocalStore, DEFAULT_STORE_FILE};
