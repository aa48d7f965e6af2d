//! Secure token storage error types.

use thiserror::Error;

/// Keyring access failures.
#[derive(Debug, Error)]
pub enum SecretError {
    #[error("failed to access secure storage: {0}")]
    AccessFailed(String),

    #[error("failed to read token from secure storage: {0}")]
    RetrievalFailed(String),

    #[error("failed to write token to secure storage: {0}")]
    StorageFailed(String),

    #[error("failed to delete token from secure storage: {0}")]
    DeletionFailed(String),

    #[error("secure storage not available: {0}")]
    NotAvailable(String),
}
