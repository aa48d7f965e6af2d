//! Domain error types.

mod api_error;
mod secret_error;

pub use api_error::ApiError;
pub use secret_error::SecretError;
