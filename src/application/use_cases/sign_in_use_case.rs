//! Sign-in and sign-out workflow.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::errors::ApiError;
use crate::domain::ports::{AuthGrant, AuthPort, Credentials, Registration, TokenStoragePort};

/// Exchanges credentials for a session and persists the token.
#[derive(Clone)]
pub struct SignInUseCase {
    auth_port: Arc<dyn AuthPort>,
    storage_port: Arc<dyn TokenStoragePort>,
}

impl SignInUseCase {
    /// Creates the use case over an auth API and a token store.
    #[must_use]
    pub fn new(auth_port: Arc<dyn AuthPort>, storage_port: Arc<dyn TokenStoragePort>) -> Self {
        Self {
            auth_port,
            storage_port,
        }
    }

    /// Logs in with email and password.
    ///
    /// # Errors
    /// Returns error if the API rejects the credentials or is unreachable.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthGrant, ApiError> {
        debug!(email = %credentials.email, "Attempting login");

        let grant = self.auth_port.login(credentials).await.map_err(|e| {
            warn!(error = %e, "Login rejected");
            e
        })?;

        Ok(self.persist(grant).await)
    }

    /// Creates an account and signs it in.
    ///
    /// # Errors
    /// Returns error if the API rejects the registration or is unreachable.
    pub async fn register(&self, registration: &Registration) -> Result<AuthGrant, ApiError> {
        debug!(email = %registration.email, "Attempting registration");

        let grant = self.auth_port.register(registration).await.map_err(|e| {
            warn!(error = %e, "Registration rejected");
            e
        })?;

        Ok(self.persist(grant).await)
    }

    /// Stores the token of a fresh grant. A failed write only costs the
    /// session on the next run, so the grant is returned either way.
    async fn persist(&self, grant: AuthGrant) -> AuthGrant {
        info!(
            email = %grant.user.email,
            token = %grant.token,
            "Successfully authenticated"
        );

        match self.storage_port.store_token(&grant.token).await {
            Ok(()) => debug!("Token persisted to storage"),
            Err(e) => tracing::error!(error = %e, "Failed to persist token"),
        }

        grant
    }

    /// Deletes the stored token.
    ///
    /// # Errors
    /// Returns error if deletion fails.
    pub async fn delete_token(&self) -> Result<(), ApiError> {
        debug!("Deleting token from storage");
        match self.storage_port.delete_token().await {
            Ok(()) => {
                info!("Token deleted from storage");
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to delete token from storage");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{AuthToken, UserProfile};
    use crate::domain::ports::mocks::{MockAuthPort, MockTokenStorage};

    fn grant() -> AuthGrant {
        AuthGrant::new(
            AuthToken::new_unchecked("jwt-token-value-123"),
            UserProfile::new("Ana", "ana@example.com"),
        )
    }

    #[tokio::test]
    async fn test_successful_login_persists_token() {
        let mut auth_port = MockAuthPort::new();
        auth_port
            .expect_login()
            .withf(|c| c.email == "ana@example.com")
            .times(1)
            .returning(|_| Ok(grant()));
        let storage_port = Arc::new(MockTokenStorage::new());

        let use_case = SignInUseCase::new(Arc::new(auth_port), storage_port.clone());
        let grant = use_case
            .login(&Credentials::new("ana@example.com", "pw"))
            .await
            .unwrap();

        assert_eq!(grant.user.name, "Ana");
        assert!(storage_port.has_token().await.unwrap());
    }

    #[tokio::test]
    async fn test_rejected_login_stores_nothing() {
        let mut auth_port = MockAuthPort::new();
        auth_port
            .expect_login()
            .returning(|_| Err(ApiError::rejected(401, "Invalid credentials")));
        let storage_port = Arc::new(MockTokenStorage::new());

        let use_case = SignInUseCase::new(Arc::new(auth_port), storage_port.clone());
        let result = use_case.login(&Credentials::new("a@b.c", "bad")).await;

        tokio_test::assert_err!(&result);
        assert!(!storage_port.has_token().await.unwrap());
    }

    #[tokio::test]
    async fn test_register_then_delete_token() {
        let mut auth_port = MockAuthPort::new();
        auth_port.expect_register().times(1).returning(|_| Ok(grant()));
        let storage_port = Arc::new(MockTokenStorage::new());

        let use_case = SignInUseCase::new(Arc::new(auth_port), storage_port.clone());
        let registration = Registration {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            password: "pw".into(),
        };

        tokio_test::assert_ok!(use_case.register(&registration).await);
        tokio_test::assert_ok!(use_case.delete_token().await);
        assert!(!storage_port.has_token().await.unwrap());
    }
}
