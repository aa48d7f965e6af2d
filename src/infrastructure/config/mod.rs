//! Application configuration.

/// Settings file schema and defaults.
pub mod app_config;
/// Command-line arguments.
pub mod args;
/// Config file location and persistence.
pub mod storage;

pub use app_config::{
    ApiConfig, AppConfig, CatalogConfig, LogLevel, MediaConfig, NotificationsConfig,
};
pub use args::{BrowseArgs, CliArgs, Command};
pub use storage::{ConfigError, StorageManager};
