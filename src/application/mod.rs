//! Application layer with the marketplace store, use cases and services.

/// Data transfer objects.
pub mod dto;
/// Stateless and queue services.
pub mod services;
/// Client state store.
pub mod store;
/// Use case implementations.
pub mod use_cases;

pub use dto::{LoginForm, SignupForm};
pub use services::{ImageFallback, ImageFallbackTracker, ImageResolver, NotificationQueue};
pub use store::{MarketplaceStore, StorePorts, StoreSettings, StoreSnapshot};
pub use use_cases::{RestoreSessionUseCase, SignInUseCase};
