//! Token storage port definition.

use async_trait::async_trait;

use crate::domain::entities::AuthToken;
use crate::domain::errors::ApiError;

/// Port for persisting the bearer token between runs.
#[async_trait]
pub trait TokenStoragePort: Send + Sync {
    /// Retrieves stored token.
    async fn get_token(&self) -> Result<Option<AuthToken>, ApiError>;

    /// Stores token, replacing any previous one.
    async fn store_token(&self, token: &AuthToken) -> Result<(), ApiError>;

    /// Deletes stored token.
    async fn delete_token(&self) -> Result<(), ApiError>;

    /// Checks if token exists.
    async fn has_token(&self) -> Result<bool, ApiError> {
        Ok(self.get_token().await?.is_some())
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::domain::errors::SecretError;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// Mock token storage for testing.
    pub struct MockTokenStorage {
        token: Arc<RwLock<Option<AuthToken>>>,
        fail_reads: bool,
    }

    impl MockTokenStorage {
        /// Creates empty mock storage.
        pub fn new() -> Self {
            Self {
                token: Arc::new(RwLock::new(None)),
                fail_reads: false,
            }
        }

        /// Creates mock storage with token.
        pub fn with_token(token: AuthToken) -> Self {
            Self {
                token: Arc::new(RwLock::new(Some(token))),
                fail_reads: false,
            }
        }

        /// Creates storage whose reads always fail.
        pub fn unreadable() -> Self {
            Self {
                token: Arc::new(RwLock::new(None)),
                fail_reads: true,
            }
        }
    }

    impl Default for MockTokenStorage {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl TokenStoragePort for MockTokenStorage {
        async fn get_token(&self) -> Result<Option<AuthToken>, ApiError> {
            if self.fail_reads {
                return Err(SecretError::RetrievalFailed("keyring locked".into()).into());
            }
            Ok(self.token.read().await.clone())
        }

        async fn store_token(&self, token: &AuthToken) -> Result<(), ApiError> {
            *self.token.write().await = Some(token.clone());
            Ok(())
        }

        async fn delete_token(&self) -> Result<(), ApiError> {
            *self.token.write().await = None;
            Ok(())
        }
    }
}
