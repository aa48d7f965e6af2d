//! Car image URL resolution against the media host.

use std::collections::HashSet;

use crate::domain::Car;

/// Builds absolute image URLs for car records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageResolver {
    host: String,
    image_path: String,
    placeholder: String,
}

impl ImageResolver {
    /// Creates a resolver.
    ///
    /// `image_path` is the endpoint serving bare file names, e.g.
    /// `/api/car-image/`.
    #[must_use]
    pub fn new(
        host: impl Into<String>,
        image_path: impl Into<String>,
        placeholder: impl Into<String>,
    ) -> Self {
        let host = host.into().trim_end_matches('/').to_string();
        let mut image_path = image_path.into();
        if !image_path.starts_with('/') {
            image_path.insert(0, '/');
        }
        if !image_path.ends_with('/') {
            image_path.push('/');
        }

        Self {
            host,
            image_path,
            placeholder: placeholder.into(),
        }
    }

    fn on_host(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        if path.starts_with('/') {
            format!("{}{path}", self.host)
        } else {
            format!("{}/{path}", self.host)
        }
    }

    fn served(&self, file_name: &str) -> String {
        format!("{}{}{file_name}", self.host, self.image_path)
    }

    /// URL of the placeholder image.
    #[must_use]
    pub fn placeholder_url(&self) -> String {
        self.served(&self.placeholder)
    }

    /// Returns whether `url` points at the file-name image endpoint.
    #[must_use]
    pub fn is_served_url(&self, url: &str) -> bool {
        url.contains(&self.image_path)
    }

    /// Best single image for a card: primary URL, first full URL, first
    /// file name, then the placeholder.
    #[must_use]
    pub fn primary_url(&self, car: &Car) -> String {
        if let Some(primary) = car.primary_image_url.as_deref().filter(|p| !p.is_empty()) {
            return self.on_host(primary);
        }
        if let Some(first) = car.image_urls.first() {
            return self.on_host(first);
        }
        car.images
            .first()
            .map_or_else(|| self.placeholder_url(), |file| self.served(file))
    }

    /// Every image of a car for a gallery, never empty.
    #[must_use]
    pub fn all_urls(&self, car: &Car) -> Vec<String> {
        if !car.image_urls.is_empty() {
            return car.image_urls.iter().map(|url| self.on_host(url)).collect();
        }
        if !car.images.is_empty() {
            return car.images.iter().map(|file| self.served(file)).collect();
        }
        vec![self.placeholder_url()]
    }
}

/// What to show after an image failed to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageFallback {
    /// Try this URL next.
    Retry(String),
    /// Give up and render a text placeholder with this label.
    Placeholder(String),
}

/// Remembers failed image URLs so fallbacks never loop.
#[derive(Debug, Default)]
pub struct ImageFallbackTracker {
    failed: HashSet<String>,
}

impl ImageFallbackTracker {
    /// Creates a tracker with no failed images.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn label(car: &Car) -> String {
        match car.year {
            Some(year) => format!("{} {} ({year})", car.make, car.model),
            None => car.title(),
        }
    }

    /// Decides the next step after `failed_src` failed to load for `car`.
    pub fn on_error(&mut self, resolver: &ImageResolver, car: &Car, failed_src: &str) -> ImageFallback {
        if !self.failed.insert(failed_src.to_string()) {
            return ImageFallback::Placeholder(Self::label(car));
        }

        if resolver.is_served_url(failed_src) {
            return ImageFallback::Placeholder(Self::label(car));
        }

        let next = car
            .images
            .first()
            .map_or_else(|| resolver.placeholder_url(), |file| resolver.served(file));
        ImageFallback::Retry(next)
    }

    /// Forgets every failure, e.g. after the media host came back.
    pub fn reset(&mut self) {
        self.failed.clear();
    }
}
