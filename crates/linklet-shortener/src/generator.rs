pub mod random;

pub use random::{RandomGenerator, ALPHABET, DEFAULT_CODE_LENGTH};

use linklet_core::ShortCode;

/// Trait for generating short codes.
///
/// Implementations are pure generators that don't interact with storage
/// and don't guarantee uniqueness on their own; the shortener service
/// runs the generate-check-retry loop against its store.
pub trait Generator: Send + Sync + 'static {
    /// Produces one candidate short code.
    fn generate(&self) -> ShortCode;
}
