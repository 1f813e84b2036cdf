//! Session storage error types.

use thiserror::Error;

/// Session storage error variants.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("session storage location unavailable: {0}")]
    NotAvailable(String),

    #[error("failed to read session: {0}")]
    ReadFailed(String),

    #[error("failed to write session: {0}")]
    WriteFailed(String),

    #[error("failed to clear session: {0}")]
    ClearFailed(String),

    #[error("corrupt session data: {0}")]
    Corrupt(String),
}
