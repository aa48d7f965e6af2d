//! Authentication port definition.

use async_trait::async_trait;

use crate::domain::entities::{AuthToken, UserProfile};
use crate::domain::errors::ApiError;

/// Email and password submitted by the login form.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Creates credentials from form input.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Account details submitted by the signup form.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Token and identity returned by a successful login or registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthGrant {
    /// Bearer token for later requests.
    pub token: AuthToken,
    /// Identity the token belongs to.
    pub user: UserProfile,
}

impl AuthGrant {
    /// Pairs a token with its identity.
    #[must_use]
    pub const fn new(token: AuthToken, user: UserProfile) -> Self {
        Self { token, user }
    }
}

/// Port for marketplace authentication endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthPort: Send + Sync {
    /// Resolves the identity behind a bearer token.
    async fn fetch_profile(&self, token: &AuthToken) -> Result<UserProfile, ApiError>;

    /// Exchanges credentials for a token.
    async fn login(&self, credentials: &Credentials) -> Result<AuthGrant, ApiError>;

    /// Creates an account and signs it in.
    async fn register(&self, registration: &Registration) -> Result<AuthGrant, ApiError>;
}
