//! Stub token storage for builds without keyring support.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::entities::AuthToken;
use crate::domain::errors::ApiError;
use crate::domain::ports::TokenStoragePort;

/// Token storage that keeps nothing between runs.
/// Used when the keyring feature is disabled.
pub struct KeyringTokenStorage;

impl KeyringTokenStorage {
    /// Creates the storage.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Creates storage with custom names (no-op in stub).
    #[must_use]
    pub fn with_names(_service: impl Into<String>, _user: impl Into<String>) -> Self {
        Self
    }
}

impl Default for KeyringTokenStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenStoragePort for KeyringTokenStorage {
    async fn get_token(&self) -> Result<Option<AuthToken>, ApiError> {
        debug!("Keyring feature disabled, no stored session");
        Ok(None)
    }

    async fn store_token(&self, _token: &AuthToken) -> Result<(), ApiError> {
        debug!("Keyring feature disabled, session will not persist");
        Ok(())
    }

    async fn delete_token(&self) -> Result<(), ApiError> {
        Ok(())
    }
}
