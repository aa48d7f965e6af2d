//! Marketplace API HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::dto::{AuthResponse, CarsResponse, ErrorResponse, LoginBody, RegisterBody};
use crate::domain::entities::{AuthToken, Car, CarId, Page, Pagination, UserProfile};
use crate::domain::errors::ApiError;
use crate::domain::ports::{
    AuthGrant, AuthPort, CarQuery, CatalogPort, Credentials, FavoritesPort, Registration,
};

/// Default API root.
pub const DEFAULT_API_BASE: &str = "http://localhost:5173/api";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("autosphere/", env!("CARGO_PKG_VERSION"));

/// HTTP adapter for every marketplace endpoint.
#[derive(Debug, Clone)]
pub struct MarketplaceApiClient {
    client: Client,
    base_url: String,
}

impl MarketplaceApiClient {
    /// Creates new client with default base URL.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new() -> Result<Self, ApiError> {
        Self::with_base_url(DEFAULT_API_BASE, DEFAULT_TIMEOUT)
    }

    /// Creates client with custom base URL and request timeout.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::unexpected(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// API root without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send(request: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "Failed to reach marketplace API");
            if e.is_timeout() {
                ApiError::network("request timed out")
            } else if e.is_connect() {
                ApiError::network("failed to connect to marketplace API")
            } else {
                ApiError::network(e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.json::<ErrorResponse>().await.ok();
        Err(error_for_status(status, body))
    }

    async fn fetch<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
        Self::send(request).await?.json::<T>().await.map_err(|e| {
            warn!(error = %e, "Failed to parse API response");
            ApiError::decode(e.to_string())
        })
    }

    fn grant(response: AuthResponse) -> Result<AuthGrant, ApiError> {
        let token = AuthToken::new(response.token)
            .ok_or_else(|| ApiError::decode("response carried an empty token"))?;
        Ok(AuthGrant::new(token, response.user))
    }
}

/// Maps a non-success status and optional error body to an [`ApiError`].
fn error_for_status(status: StatusCode, body: Option<ErrorResponse>) -> ApiError {
    let message = body.map(ErrorResponse::into_message).unwrap_or_default();

    match status {
        StatusCode::UNAUTHORIZED => {
            if message.is_empty() {
                ApiError::unauthorized("invalid or expired token")
            } else {
                ApiError::unauthorized(message)
            }
        }
        StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT | StatusCode::BAD_GATEWAY => {
            ApiError::network(format!("marketplace API unavailable ({status})"))
        }
        _ => ApiError::rejected(status.as_u16(), message),
    }
}

#[async_trait]
impl AuthPort for MarketplaceApiClient {
    async fn fetch_profile(&self, token: &AuthToken) -> Result<UserProfile, ApiError> {
        debug!(token = %token, "Fetching profile");
        Self::fetch(
            self.client
                .get(self.url("auth/me"))
                .header(header::AUTHORIZATION, token.bearer()),
        )
        .await
    }

    async fn login(&self, credentials: &Credentials) -> Result<AuthGrant, ApiError> {
        let body = LoginBody {
            email: &credentials.email,
            password: &credentials.password,
        };
        let response: AuthResponse =
            Self::fetch(self.client.post(self.url("auth/login")).json(&body)).await?;
        Self::grant(response)
    }

    async fn register(&self, registration: &Registration) -> Result<AuthGrant, ApiError> {
        let body = RegisterBody {
            name: &registration.name,
            email: &registration.email,
            password: &registration.password,
        };
        let response: AuthResponse =
            Self::fetch(self.client.post(self.url("auth/register")).json(&body)).await?;
        Self::grant(response)
    }
}

#[async_trait]
impl CatalogPort for MarketplaceApiClient {
    async fn list_cars(&self, query: &CarQuery) -> Result<Page<Car>, ApiError> {
        debug!(?query, "Listing cars");
        let response: CarsResponse =
            Self::fetch(self.client.get(self.url("cars")).query(query)).await?;

        let pagination = response.pagination.unwrap_or_else(|| {
            let total = u64::try_from(response.cars.len()).unwrap_or(u64::MAX);
            Pagination::new(1, 1, total)
        });
        Ok(Page::new(response.cars, pagination))
    }
}

#[async_trait]
impl FavoritesPort for MarketplaceApiClient {
    async fn list_favorites(&self, token: &AuthToken) -> Result<Vec<Car>, ApiError> {
        Self::fetch(
            self.client
                .get(self.url("favorites"))
                .header(header::AUTHORIZATION, token.bearer()),
        )
        .await
    }

    async fn add_favorite(&self, token: &AuthToken, car_id: &CarId) -> Result<(), ApiError> {
        debug!(car_id = %car_id, "Adding favorite");
        Self::send(
            self.client
                .post(self.url(&format!("favorites/{car_id}")))
                .header(header::AUTHORIZATION, token.bearer())
                .json(&serde_json::json!({})),
        )
        .await
        .map(drop)
    }

    async fn remove_favorite(&self, token: &AuthToken, car_id: &CarId) -> Result<(), ApiError> {
        debug!(car_id = %car_id, "Removing favorite");
        Self::send(
            self.client
                .delete(self.url(&format!("favorites/{car_id}")))
                .header(header::AUTHORIZATION, token.bearer()),
        )
        .await
        .map(drop)
    }
}
