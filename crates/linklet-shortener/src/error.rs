use linklet_core::{CoreError, StorageError};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ShortenError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid validity: {0}")]
    InvalidValidity(String),
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
    #[error("custom code already in use: {0}")]
    CodeTaken(String),
    #[error("could not find a unique code after {attempts} attempts")]
    GenerationExhausted { attempts: usize },
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<CoreError> for ShortenError {
    fn from(value: CoreError) -> Self {
        match value {
            CoreError::InvalidShortCode(message) => Self::InvalidShortCode(message),
        }
    }
}

impl From<StorageError> for ShortenError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value.to_string())
    }
}
