//! Storage error types.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in the storage layer.
///
/// Note that individual migration steps do not produce errors here — they
/// are tolerated per-step inside the migration engine. A `Database` error
/// from `MessageStore::open` means the store itself could not be opened,
/// which is fatal to onboarding.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("record encryption error: {0}")]
    Encryption(String),
}
