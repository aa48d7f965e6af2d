//! Presentation layer: command runner and text rendering.

/// Command runner.
pub mod app;
/// Plain-text views of store state.
pub mod render;

pub use app::App;
