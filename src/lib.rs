//! AutoSphere - client for the AutoSphere car marketplace.
//!
//! This crate provides the client-side state store of the marketplace
//! (session, catalog browsing, favorites and toasts) behind ports for the
//! remote API and token storage, plus a command-line front end.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing the store, use cases and DTOs.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing the command runner and rendering.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "autosphere";
