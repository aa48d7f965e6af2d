//! Keyring-based token storage.

use async_trait::async_trait;
use keyring::Entry;
use tracing::{debug, warn};

use crate::domain::entities::AuthToken;
use crate::domain::errors::{ApiError, SecretError};
use crate::domain::ports::TokenStoragePort;

const KEYRING_SERVICE: &str = "autosphere";
const KEYRING_USER: &str = "token";

/// System keyring token storage adapter.
pub struct KeyringTokenStorage {
    service: String,
    user: String,
}

impl KeyringTokenStorage {
    /// Creates new storage with default names.
    #[must_use]
    pub fn new() -> Self {
        Self::with_names(KEYRING_SERVICE, KEYRING_USER)
    }

    /// Creates storage with custom names.
    #[must_use]
    pub fn with_names(service: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            user: user.into(),
        }
    }

    fn entry(&self) -> Result<Entry, SecretError> {
        Entry::new(&self.service, &self.user).map_err(|e| match e {
            keyring::Error::NoStorageAccess(_) | keyring::Error::PlatformFailure(_) => {
                SecretError::NotAvailable(e.to_string())
            }
            _ => SecretError::AccessFailed(e.to_string()),
        })
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
        debug!(service = %self.service, "Retrieving token from keyring");

        match self.entry()?.get_password() {
            Ok(password) => {
                debug!("Token found in keyring");
                Ok(AuthToken::new(password))
            }
            Err(keyring::Error::NoEntry) => {
                debug!("No token stored in keyring");
                Ok(None)
            }
            Err(e) => {
                warn!(error = %e, "Failed to retrieve token from keyring");
                Err(SecretError::RetrievalFailed(e.to_string()).into())
            }
        }
    }

    async fn store_token(&self, token: &AuthToken) -> Result<(), ApiError> {
        debug!(service = %self.service, token = %token, "Storing token in keyring");

        self.entry()?.set_password(token.as_str()).map_err(|e| {
            warn!(error = %e, "Failed to store token in keyring");
            SecretError::StorageFailed(e.to_string())
        })?;

        debug!("Token stored successfully");
        Ok(())
    }

    async fn delete_token(&self) -> Result<(), ApiError> {
        debug!(service = %self.service, "Deleting token from keyring");

        match self.entry()?.delete_credential() {
            Ok(()) => {
                debug!("Token deleted from keyring");
                Ok(())
            }
            Err(keyring::Error::NoEntry) => {
                debug!("No token to delete");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to delete token from keyring");
                Err(SecretError::DeletionFailed(e.to_string()).into())
            }
        }
    }
}
