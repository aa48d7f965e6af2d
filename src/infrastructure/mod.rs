//! Infrastructure layer with external service adapters.

/// Marketplace REST API client.
pub mod api;
/// Application configuration.
pub mod config;
/// Token storage adapters.
pub mod storage;

pub use api::MarketplaceApiClient;
pub use config::{AppConfig, CliArgs, Command, LogLevel, StorageManager};
pub use storage::KeyringTokenStorage;
