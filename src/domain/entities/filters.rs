//! Catalog filter value objects.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Price bucket selectable in the browse filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PriceRange {
    /// No price constraint.
    #[default]
    Any,
    /// Up to 50 000.
    Under50k,
    /// 50 000 to 100 000.
    From50kTo100k,
    /// 100 000 to 200 000.
    From100kTo200k,
    /// 200 000 and above.
    Over200k,
}

/// Inclusive price bounds sent with a listing query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceBounds {
    /// Lowest accepted price.
    pub min: Option<u32>,
    /// Highest accepted price, `None` when open ended.
    pub max: Option<u32>,
}

impl PriceRange {
    /// Every bucket, in display order.
    pub const ALL: [Self; 5] = [
        Self::Any,
        Self::Under50k,
        Self::From50kTo100k,
        Self::From100kTo200k,
        Self::Over200k,
    ];

    /// Maps the bucket to query bounds.
    #[must_use]
    pub const fn bounds(self) -> PriceBounds {
        let (min, max) = match self {
            Self::Any => (None, None),
            Self::Under50k => (None, Some(50_000)),
            Self::From50kTo100k => (Some(50_000), Some(100_000)),
            Self::From100kTo200k => (Some(100_000), Some(200_000)),
            Self::Over200k => (Some(200_000), None),
        };
        PriceBounds { min, max }
    }

    /// Wire representation used by the filter form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Any => "",
            Self::Under50k => "0-50000",
            Self::From50kTo100k => "50000-100000",
            Self::From100kTo200k => "100000-200000",
            Self::Over200k => "200000+",
        }
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognised price bucket.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown price range: {0:?}")]
pub struct UnknownPriceRange(pub String);

impl FromStr for PriceRange {
    type Err = UnknownPriceRange;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|range| range.as_str() == trimmed)
            .ok_or_else(|| UnknownPriceRange(s.to_string()))
    }
}

impl TryFrom<String> for PriceRange {
    type Error = UnknownPriceRange;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PriceRange> for String {
    fn from(value: PriceRange) -> Self {
        value.as_str().to_string()
    }
}

/// Search and filter parameters of the browse view.
///
/// Empty strings mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFilters {
    /// Exact make, e.g. "Toyota".
    #[serde(default)]
    pub make: String,
    /// Price bucket.
    #[serde(default)]
    pub price_range: PriceRange,
    /// Model year.
    #[serde(default)]
    pub year: String,
    /// Fuel type, e.g. "Electric".
    #[serde(default)]
    pub fuel: String,
    /// Free text matched by the server.
    #[serde(default)]
    pub search_query: String,
}

impl CatalogFilters {
    /// Returns whether no filter is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(PriceRange::Any, None, None ; "any")]
    #[test_case(PriceRange::Under50k, None, Some(50_000) ; "under_50k")]
    #[test_case(PriceRange::From50kTo100k, Some(50_000), Some(100_000) ; "from_50k_to_100k")]
    #[test_case(PriceRange::From100kTo200k, Some(100_000), Some(200_000) ; "from_100k_to_200k")]
    #[test_case(PriceRange::Over200k, Some(200_000), None ; "over_200k")]
    fn test_price_bounds(range: PriceRange, min: Option<u32>, max: Option<u32>) {
        assert_eq!(range.bounds(), PriceBounds { min, max });
    }

    #[test_case("", PriceRange::Any ; "empty")]
    #[test_case("0-50000", PriceRange::Under50k ; "under")]
    #[test_case("50000-100000", PriceRange::From50kTo100k ; "mid")]
    #[test_case(" 200000+ ", PriceRange::Over200k ; "padded")]
    fn test_parse_price_range(input: &str, expected: PriceRange) {
        assert_eq!(input.parse::<PriceRange>().unwrap(), expected);
    }

    #[test]
    fn test_unknown_price_range_rejected() {
        let err = "cheap".parse::<PriceRange>().unwrap_err();
        assert_eq!(err, UnknownPriceRange("cheap".to_string()));
    }

    #[test]
    fn test_filters_deserialize_from_toml() {
        let filters: CatalogFilters = toml::from_str(
            r#"
            make = "BMW"
            price_range = "100000-200000"
        "#,
        )
        .unwrap();

        assert_eq!(filters.make, "BMW");
        assert_eq!(filters.price_range, PriceRange::From100kTo200k);
        assert!(filters.year.is_empty());
        assert!(!filters.is_empty());
    }
}
