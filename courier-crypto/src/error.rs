//! Crypto error types.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur while sealing or opening record fields.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("cipher failure: {0}")]
    Cipher(String),

    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("ciphertext encoding invalid: {0}")]
    Encoding(String),

    #[error("cipher not available — account key has not been derived")]
    Unavailable,
}
