//! Application configuration.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use super::args::CliArgs;
use crate::application::{ImageResolver, StoreSettings};
use crate::application::store::DEFAULT_FEATURED_LIMIT;

pub(super) const APP_NAME: &str = "autosphere";
pub(super) const APP_QUALIFIER: &str = "com";
pub(super) const APP_ORGANIZATION: &str = "autosphere";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Converts to tracing level.
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, read from `config.toml` and overridden by CLI flags.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(default)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Marketplace API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Media host settings.
    #[serde(default)]
    pub media: MediaConfig,

    /// Catalog settings.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Toast settings.
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

/// Marketplace API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API root, e.g. `http://localhost:5173/api`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Media host configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Host serving car images.
    #[serde(default = "default_media_host")]
    pub host: String,

    /// Path serving bare image file names.
    #[serde(default = "default_image_path")]
    pub image_path: String,

    /// File name of the placeholder image.
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            host: default_media_host(),
            image_path: default_image_path(),
            placeholder: default_placeholder(),
        }
    }
}

/// Catalog configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Number of cars on the featured strip.
    #[serde(default = "default_featured_limit")]
    pub featured_limit: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            featured_limit: default_featured_limit(),
        }
    }
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// How long a toast stays visible, in milliseconds.
    #[serde(default = "default_notification_duration")]
    pub duration_ms: u64,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_notification_duration(),
        }
    }
}

fn default_base_url() -> String {
    crate::infrastructure::api::DEFAULT_API_BASE.to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_media_host() -> String {
    "http://localhost:5000".to_string()
}

fn default_image_path() -> String {
    "/api/car-image/".to_string()
}

fn default_placeholder() -> String {
    "placeholder.jpg".to_string()
}

fn default_featured_limit() -> u32 {
    DEFAULT_FEATURED_LIMIT
}

fn default_notification_duration() -> u64 {
    3000
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(config_path) = &args.config {
            self.config = Some(config_path.clone());
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(api_url) = &args.api_url {
            self.api.base_url.clone_from(api_url);
        }
        if let Some(media_host) = &args.media_host {
            self.media.host.clone_from(media_host);
        }
        if let Some(timeout) = args.request_timeout {
            self.api.request_timeout_secs = timeout;
        }
    }

    /// HTTP request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.request_timeout_secs)
    }

    /// Store tunables derived from this configuration.
    #[must_use]
    pub fn store_settings(&self) -> StoreSettings {
        StoreSettings {
            featured_limit: self.catalog.featured_limit.max(1),
            notification_duration: Duration::from_millis(self.notifications.duration_ms),
        }
    }

    /// Image URL resolver for the configured media host.
    #[must_use]
    pub fn image_resolver(&self) -> ImageResolver {
        ImageResolver::new(
            &self.media.host,
            &self.media.image_path,
            &self.media.placeholder,
        )
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("autosphere.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }
}
