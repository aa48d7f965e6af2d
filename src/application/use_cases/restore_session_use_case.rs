//! Session restoration from the persisted token.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::entities::{AuthToken, UserProfile};
use crate::domain::errors::ApiError;
use crate::domain::ports::{AuthPort, TokenStoragePort};

/// Session recovered at startup.
#[derive(Debug, Clone)]
pub struct RestoredSession {
    /// Token read from storage.
    pub token: AuthToken,
    /// Profile the server returned for it.
    pub user: UserProfile,
}

/// Reads the persisted token and confirms it with the identity endpoint.
pub struct RestoreSessionUseCase {
    auth_port: Arc<dyn AuthPort>,
    storage_port: Arc<dyn TokenStoragePort>,
}

impl RestoreSessionUseCase {
    /// Creates the use case over an auth API and a token store.
    #[must_use]
    pub fn new(auth_port: Arc<dyn AuthPort>, storage_port: Arc<dyn TokenStoragePort>) -> Self {
        Self {
            auth_port,
            storage_port,
        }
    }

    /// Returns the stored token, if any, without contacting the API.
    ///
    /// # Errors
    /// Returns error if storage access fails.
    pub async fn stored_token(&self) -> Result<Option<AuthToken>, ApiError> {
        debug!("Checking storage for persisted token");
        self.storage_port.get_token().await
    }

    /// Confirms `token` with `GET /auth/me`.
    ///
    /// # Errors
    /// Returns error if the token is rejected or the API is unreachable.
    pub async fn confirm(&self, token: AuthToken) -> Result<RestoredSession, ApiError> {
        let user = self.auth_port.fetch_profile(&token).await?;
        info!(email = %user.email, "Restored session from stored token");
        Ok(RestoredSession { token, user })
    }
}
