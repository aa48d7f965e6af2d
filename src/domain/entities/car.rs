//! Car listing entity.

use serde::{Deserialize, Serialize};

/// Stable identifier of a car listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CarId(pub String);

impl CarId {
    /// Returns the identifier as string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CarId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CarId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for CarId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A car record as returned by the listing and favorites endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "CarRecord")]
pub struct Car {
    /// Listing identifier.
    #[serde(rename = "_id")]
    pub id: CarId,
    /// Manufacturer, e.g. "Toyota".
    pub make: String,
    /// Model name, e.g. "Supra".
    pub model: String,
    /// Model year.
    pub year: Option<u16>,
    /// Asking price in whole currency units.
    pub price: Option<f64>,
    /// Fuel type.
    pub fuel: Option<String>,
    /// Odometer reading.
    pub mileage: Option<f64>,
    /// Whether the listing appears in the featured strip.
    pub featured: bool,
    /// Path of the preferred image on the media host.
    pub primary_image_url: Option<String>,
    /// Media-host paths of every image.
    pub image_urls: Vec<String>,
    /// Bare image file names served by the image endpoint.
    pub images: Vec<String>,
}

/// Identifier as sent by the server, either a string or a number.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
    Text(String),
    Unsigned(u64),
    Signed(i64),
}

impl From<WireId> for CarId {
    fn from(value: WireId) -> Self {
        match value {
            WireId::Text(text) => Self(text),
            WireId::Unsigned(n) => Self(n.to_string()),
            WireId::Signed(n) => Self(n.to_string()),
        }
    }
}

/// Wire shape of a car record. Records carry `_id`, `id` or both.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CarRecord {
    #[serde(rename = "_id", default)]
    document_id: Option<WireId>,
    #[serde(default)]
    id: Option<WireId>,
    #[serde(default)]
    make: String,
    #[serde(default)]
    model: String,
    #[serde(default)]
    year: Option<u16>,
    #[serde(default)]
    price: Option<f64>,
    #[serde(default)]
    fuel: Option<String>,
    #[serde(default)]
    mileage: Option<f64>,
    #[serde(default)]
    featured: bool,
    #[serde(default)]
    primary_image_url: Option<String>,
    #[serde(default)]
    image_urls: Vec<String>,
    #[serde(default)]
    images: Vec<String>,
}

impl TryFrom<CarRecord> for Car {
    type Error = &'static str;

    fn try_from(record: CarRecord) -> Result<Self, Self::Error> {
        let id = record
            .document_id
            .or(record.id)
            .ok_or("car record has neither `_id` nor `id`")?;
        Ok(Self {
            id: id.into(),
            make: record.make,
            model: record.model,
            year: record.year,
            price: record.price,
            fuel: record.fuel,
            mileage: record.mileage,
            featured: record.featured,
            primary_image_url: record.primary_image_url,
            image_urls: record.image_urls,
            images: record.images,
        })
    }
}

impl Car {
    /// Creates a bare listing with only identity fields set.
    #[must_use]
    pub fn new(id: impl Into<CarId>, make: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            make: make.into(),
            model: model.into(),
            year: None,
            price: None,
            fuel: None,
            mileage: None,
            featured: false,
            primary_image_url: None,
            image_urls: Vec::new(),
            images: Vec::new(),
        }
    }

    /// Sets the model year.
    #[must_use]
    pub const fn with_year(mut self, year: u16) -> Self {
        self.year = Some(year);
        self
    }

    /// Sets the asking price.
    #[must_use]
    pub const fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// Returns "make model".
    #[must_use]
    pub fn title(&self) -> String {
        format!("{} {}", self.make, self.model)
    }
}
