//! Favorites port definition.

use async_trait::async_trait;

use crate::domain::entities::{AuthToken, Car, CarId};
use crate::domain::errors::ApiError;

/// Port for the bearer-authenticated favorites endpoints.
#[async_trait]
pub trait FavoritesPort: Send + Sync {
    /// Fetches the full records of every favorited car.
    async fn list_favorites(&self, token: &AuthToken) -> Result<Vec<Car>, ApiError>;

    /// Marks a car as favorite.
    async fn add_favorite(&self, token: &AuthToken, car_id: &CarId) -> Result<(), ApiError>;

    /// Removes a car from favorites.
    async fn remove_favorite(&self, token: &AuthToken, car_id: &CarId) -> Result<(), ApiError>;
}
