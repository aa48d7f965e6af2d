//! Authentication form DTOs.

use zeroize::Zeroize;

use crate::domain::ports::{Credentials, Registration};

/// Fields of the login dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Zeroize)]
#[allow(missing_docs)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// Creates a filled-in form.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Request body for `POST /auth/login`.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.email.trim(), self.password.clone())
    }
}

/// Fields of the signup dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Zeroize)]
#[allow(missing_docs)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    /// Creates a filled-in form.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    /// Returns whether both password fields agree.
    #[must_use]
    pub fn passwords_match(&self) -> bool {
        self.password == self.confirm_password
    }

    /// Request body for `POST /auth/register`; the confirmation is not sent.
    #[must_use]
    pub fn registration(&self) -> Registration {
        Registration {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        }
    }
}
