//! Use case implementations.

mod restore_session_use_case;
mod sign_in_use_case;

pub use restore_session_use_case::{RestoreSessionUseCase, RestoredSession};
pub use sign_in_use_case::SignInUseCase;
