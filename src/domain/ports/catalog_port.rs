//! Catalog port for listing queries.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::entities::{Car, CatalogFilters, Page};
use crate::domain::errors::ApiError;

/// Query string of a `GET /cars` request.
///
/// Absent fields are omitted from the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct CarQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_min: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_max: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl CarQuery {
    /// Builds the browse query for `page` from the current filters.
    #[must_use]
    pub fn from_filters(filters: &CatalogFilters, page: u32) -> Self {
        let bounds = filters.price_range.bounds();
        Self {
            page: Some(page),
            search: non_empty(&filters.search_query),
            make: non_empty(&filters.make),
            year: non_empty(&filters.year),
            fuel: non_empty(&filters.fuel),
            price_min: bounds.min,
            price_max: bounds.max,
            featured: None,
            limit: None,
        }
    }

    /// Builds the fixed query for the featured strip.
    #[must_use]
    pub fn featured(limit: u32) -> Self {
        Self {
            featured: Some(true),
            limit: Some(limit),
            ..Self::default()
        }
    }
}

/// Port for the car listing endpoint.
#[async_trait]
pub trait CatalogPort: Send + Sync {
    /// Fetches one page of cars matching `query`.
    async fn list_cars(&self, query: &CarQuery) -> Result<Page<Car>, ApiError>;
}
