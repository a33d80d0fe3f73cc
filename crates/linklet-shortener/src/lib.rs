//! Link creation service for linklet.
//!
//! This crate provides the creation path: the random short code
//! generator and the [`ShortenerService`] that validates input, resolves
//! a unique code with bounded retry, and commits links to the store.

pub mod error;
pub mod generator;
pub mod service;

pub use error::ShortenError;
pub use generator::{Generator, RandomGenerator};
pub use service::{
    BatchRejection, RowError, RowOutcome, ShortenRequest, ShortenerService,
    DEFAULT_VALIDITY_MINUTES, MAX_BATCH_ROWS, MAX_GENERATE_ATTEMPTS,
};
