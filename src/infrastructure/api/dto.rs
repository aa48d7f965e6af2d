use serde::{Deserialize, Serialize};

use crate::domain::entities::{Car, Pagination, UserProfile};

/// Body of `POST /auth/login`.
#[derive(Debug, Serialize)]
pub struct LoginBody<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Body of `POST /auth/register`.
#[derive(Debug, Serialize)]
pub struct RegisterBody<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// Successful login or registration response.
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

/// `GET /cars` response.
#[derive(Debug, Deserialize)]
pub struct CarsResponse {
    #[serde(default)]
    pub cars: Vec<Car>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Error body of a rejected request. Some routes send `error`, some
/// `message`, some both.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorResponse {
    /// The first non-blank of `error` and `message`, or an empty string.
    pub fn into_message(self) -> String {
        [self.error, self.message]
            .into_iter()
            .flatten()
            .find(|text| !text.trim().is_empty())
            .unwrap_or_default()
    }
}
