use crate::generator::Generator;
use linklet_core::ShortCode;
use rand::Rng;

/// The 62-character alphanumeric alphabet codes are drawn from.
pub const ALPHABET: &[u8; 62] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Default length of a generated code.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// A random short code generator.
///
/// Draws each character independently and uniformly from [`ALPHABET`]
/// using the thread-local (non-cryptographic) random source. Collisions
/// are possible; callers retry against their store.
#[derive(Debug, Clone)]
pub struct RandomGenerator {
    length: usize,
}

impl RandomGenerator {
    /// Creates a generator producing codes of [`DEFAULT_CODE_LENGTH`].
    pub fn new() -> Self {
        Self::with_length(DEFAULT_CODE_LENGTH)
    }

    /// Creates a generator producing codes of the given length.
    pub fn with_length(length: usize) -> Self {
        Self { length }
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for RandomGenerator {
    fn generate(&self) -> ShortCode {
        let mut rng = rand::rng();
        let code: String = (0..self.length)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect();
        ShortCode::generated(code)
    }
}
